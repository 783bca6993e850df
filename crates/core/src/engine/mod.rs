//! The viewport reveal & counter engine.
//!
//! Discovery happens once, at initialization: marked elements are scanned,
//! their attributes parsed, and a one-shot visibility watch registered per
//! element. Each `tick` consumes fired watches, advances every active run,
//! and emits the frame's DOM mutations as plain data for the caller to
//! apply.

use crate::dom::{Document, ElementId};
use crate::layout::GeometryMap;
use crate::motion::{CounterRun, CounterState, RevealRun, RevealState};
use crate::query::{self, SelectorError};
use crate::viewport::{Viewport, WatchOptions, Watcher};

/// Counters fire once at least half the element is visible.
pub const COUNTER_THRESHOLD: f32 = 0.5;
/// Reveals fire early into visibility, but against a shrunken region.
pub const REVEAL_THRESHOLD: f32 = 0.1;
/// The reveal test region is pulled in 50px on every side, so the swap
/// lands slightly after the element is visually on-screen.
pub const REVEAL_ROOT_MARGIN: f32 = -50.0;
/// Fallback when `data-duration` is absent or malformed.
pub const DEFAULT_DURATION_MS: f64 = 2000.0;

/// Marker selectors and class names the engine scans for and applies.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Elements animated as numeric counters.
    pub counter_selector: String,
    /// Elements revealed on first viewport entry.
    pub reveal_selector: String,
    /// Class removed when a reveal fires.
    pub hidden_class: String,
    /// Class added when a reveal fires.
    pub revealed_class: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            counter_selector: ".counter-number".to_string(),
            reveal_selector: ".invisible".to_string(),
            hidden_class: "invisible".to_string(),
            revealed_class: "in-viewport".to_string(),
        }
    }
}

/// A DOM mutation produced by one frame. Plain data so every frame's output
/// is observable before it is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetText { element: ElementId, text: String },
    AddClass { element: ElementId, class: String },
    RemoveClass { element: ElementId, class: String },
}

/// Apply a frame's effects to the document.
pub fn apply_effects(doc: &mut Document, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::SetText { element, text } => doc.set_text(*element, text),
            Effect::AddClass { element, class } => doc.add_class(*element, class),
            Effect::RemoveClass { element, class } => doc.remove_class(*element, class),
        }
    }
}

pub struct Engine {
    counters: Vec<CounterRun>,
    reveals: Vec<RevealRun>,
    watcher: Watcher,
    hidden_class: String,
    revealed_class: String,
}

impl Engine {
    /// Scan the document for marked elements and register their watches.
    /// Malformed numeric attributes fall back to their defaults; nothing
    /// here is fatal.
    pub fn initialize(doc: &Document, config: &EngineConfig) -> Result<Engine, SelectorError> {
        let mut counters = Vec::new();
        let mut reveals = Vec::new();
        let mut watcher = Watcher::new();

        for element in query::select_str(doc, &config.counter_selector)? {
            let target = parse_int_attr(doc, element, "data-to-value").unwrap_or(0);
            let duration_ms = parse_int_attr(doc, element, "data-duration")
                .filter(|d| *d > 0)
                .map(|d| d as f64)
                .unwrap_or(DEFAULT_DURATION_MS);

            counters.push(CounterRun::new(element, target, duration_ms));
            watcher.observe(
                element,
                WatchOptions {
                    threshold: COUNTER_THRESHOLD,
                    root_margin: 0.0,
                },
            );
        }

        for element in query::select_str(doc, &config.reveal_selector)? {
            let delay_ms = parse_int_attr(doc, element, "data-animation-delay")
                .filter(|d| *d >= 0)
                .map(|d| d as f64)
                .unwrap_or(0.0);

            reveals.push(RevealRun::new(element, delay_ms));
            watcher.observe(
                element,
                WatchOptions {
                    threshold: REVEAL_THRESHOLD,
                    root_margin: REVEAL_ROOT_MARGIN,
                },
            );
        }

        Ok(Engine {
            counters,
            reveals,
            watcher,
            hidden_class: config.hidden_class.clone(),
            revealed_class: config.revealed_class.clone(),
        })
    }

    pub fn counters(&self) -> &[CounterRun] {
        &self.counters
    }

    pub fn reveals(&self) -> &[RevealRun] {
        &self.reveals
    }

    /// Watches not yet fired (elements that have never become visible).
    pub fn pending_watches(&self) -> usize {
        self.watcher.len()
    }

    /// One frame: consume visibility events, advance every active run, and
    /// return this frame's DOM mutations.
    pub fn tick(
        &mut self,
        now: f64,
        viewport: &Viewport,
        geometry: &GeometryMap,
    ) -> Vec<Effect> {
        for event in self.watcher.poll(viewport, geometry) {
            if let Some(counter) = self
                .counters
                .iter_mut()
                .find(|c| c.element == event.element)
            {
                counter.begin(now);
            }
            if let Some(reveal) = self
                .reveals
                .iter_mut()
                .find(|r| r.element == event.element)
            {
                reveal.schedule(now);
            }
        }

        let mut effects = Vec::new();

        for counter in &mut self.counters {
            if let Some(text) = counter.frame(now) {
                effects.push(Effect::SetText {
                    element: counter.element,
                    text,
                });
            }
        }

        for reveal in &mut self.reveals {
            if reveal.fire_due(now) {
                effects.push(Effect::RemoveClass {
                    element: reveal.element,
                    class: self.hidden_class.clone(),
                });
                effects.push(Effect::AddClass {
                    element: reveal.element,
                    class: self.revealed_class.clone(),
                });
            }
        }

        effects
    }

    /// True once every run has reached its terminal state.
    pub fn is_settled(&self) -> bool {
        self.counters
            .iter()
            .all(|c| matches!(c.state(), CounterState::Done))
            && self
                .reveals
                .iter()
                .all(|r| matches!(r.state(), RevealState::Done))
    }
}

fn parse_int_attr(doc: &Document, element: ElementId, name: &str) -> Option<i64> {
    doc.attr(element, name)?.trim().parse::<i64>().ok()
}
