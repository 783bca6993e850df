use crate::dom::ElementId;
use crate::effects::HeaderState;
use serde::Serialize;

/// Serializable snapshot of a page's animation state.
#[derive(Debug, Serialize)]
pub struct PageReport {
    pub clock_ms: f64,
    pub vp: [f32; 2],
    pub scroll: [f32; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_translate_y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallax_y: Option<f32>,
    pub counters: Vec<CounterReport>,
    pub reveals: Vec<RevealReport>,
}

#[derive(Debug, Serialize)]
pub struct CounterReport {
    pub element: ElementId,
    pub target: i64,
    pub duration_ms: f64,
    /// Rendered text at snapshot time ("1,234").
    pub value: String,
    pub state: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RevealReport {
    pub element: ElementId,
    pub delay_ms: f64,
    pub revealed: bool,
    pub state: &'static str,
}

impl PageReport {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("report serializes")
    }
}

/// One-line-per-element text form for terminal use.
pub fn to_compact_string(report: &PageReport) -> String {
    let mut lines = Vec::new();

    for c in &report.counters {
        lines.push(format!(
            "[{}:counter \"{}\" ->{} {}]",
            c.element.0, c.value, c.target, c.state
        ));
    }
    for r in &report.reveals {
        lines.push(format!(
            "[{}:reveal delay={} {}]",
            r.element.0, r.delay_ms, r.state
        ));
    }

    lines.join("\n")
}
