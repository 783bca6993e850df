//! Animation state machines and the math that drives them.
//!
//! Every animated element owns one small state machine with exactly one
//! forward path: `Pending → Running → Done` for counters, `Pending →
//! Waiting → Done` for reveals. Progress is wall-clock-driven (real
//! elapsed time, not frame count), so duration is independent of how
//! often the caller ticks.

use crate::dom::ElementId;

/// Quartic ease-out: fast start, slow settle.
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// Format an integer with comma thousands grouping ("1,234").
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    if n < 0 {
        format!("-{}", result)
    } else {
        result
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterState {
    Pending,
    Running { started_at: f64 },
    Done,
}

/// One counter element's animation run.
#[derive(Debug, Clone)]
pub struct CounterRun {
    pub element: ElementId,
    pub target: i64,
    pub duration_ms: f64,
    state: CounterState,
}

impl CounterRun {
    pub fn new(element: ElementId, target: i64, duration_ms: f64) -> Self {
        Self {
            element,
            target,
            duration_ms,
            state: CounterState::Pending,
        }
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    /// First-intersection transition. The watch that delivered the event was
    /// already released, so a second call is impossible in normal operation;
    /// the Pending guard is kept as a defensive check against re-entrant
    /// delivery.
    pub fn begin(&mut self, now: f64) {
        if self.state == CounterState::Pending {
            self.state = CounterState::Running { started_at: now };
        }
    }

    /// Advance one frame. Returns the text to display, or None when the run
    /// is not active this frame.
    pub fn frame(&mut self, now: f64) -> Option<String> {
        let started_at = match self.state {
            CounterState::Running { started_at } => started_at,
            _ => return None,
        };

        let progress = ((now - started_at) / self.duration_ms).clamp(0.0, 1.0);
        if progress >= 1.0 {
            self.state = CounterState::Done;
            // Render the exact target, not the eased approximation, so the
            // final displayed number is exactly correct.
            return Some(group_thousands(self.target));
        }

        let eased = ease_out_quart(progress);
        let value = (eased * self.target as f64).floor() as i64;
        Some(group_thousands(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealState {
    Pending,
    Waiting { due_at: f64 },
    Done,
}

/// One reveal element's delayed class swap.
#[derive(Debug, Clone)]
pub struct RevealRun {
    pub element: ElementId,
    pub delay_ms: f64,
    state: RevealState,
}

impl RevealRun {
    pub fn new(element: ElementId, delay_ms: f64) -> Self {
        Self {
            element,
            delay_ms,
            state: RevealState::Pending,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// First-intersection transition: schedule the class swap. The timer is
    /// never cancelled once set.
    pub fn schedule(&mut self, now: f64) {
        if self.state == RevealState::Pending {
            self.state = RevealState::Waiting {
                due_at: now + self.delay_ms,
            };
        }
    }

    /// True exactly once: on the first frame at or past the due time.
    pub fn fire_due(&mut self, now: f64) -> bool {
        match self.state {
            RevealState::Waiting { due_at } if due_at <= now => {
                self.state = RevealState::Done;
                true
            }
            _ => false,
        }
    }
}
