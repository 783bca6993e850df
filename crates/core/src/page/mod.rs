//! The stateful page session: one parsed page, its geometry, the animation
//! engine, the scroll-linked behaviors, and a logical clock, driven
//! explicitly by the caller.

use crate::dom::{Document, ElementId};
use crate::effects::{EffectsConfig, HeaderState, PageEffects};
use crate::engine::{self, Engine, EngineConfig};
use crate::layout::{self, GeometryMap};
use crate::motion::{CounterState, RevealState};
use crate::query::SelectorError;
use crate::report::{CounterReport, PageReport, RevealReport};
use crate::style;
use crate::viewport::Viewport;

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Location path used for active-menu highlighting.
    pub path: String,
    /// Location hash; overrides path matching when present.
    pub hash: Option<String>,
    pub engine: EngineConfig,
    pub effects: EffectsConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1920.0,
            viewport_height: 1080.0,
            path: "/".to_string(),
            hash: None,
            engine: EngineConfig::default(),
            effects: EffectsConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum PageError {
    InvalidSelector(SelectorError),
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::InvalidSelector(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PageError {}

impl From<SelectorError> for PageError {
    fn from(e: SelectorError) -> Self {
        PageError::InvalidSelector(e)
    }
}

pub struct Page {
    doc: Document,
    geometry: GeometryMap,
    viewport: Viewport,
    engine: Engine,
    effects: PageEffects,
    clock_ms: f64,
}

impl Page {
    /// Parse, style, lay out, and initialize. Elements already inside the
    /// viewport animate from the initial frame, without any scroll.
    pub fn load(html: &str, config: PageConfig) -> Result<Page, PageError> {
        let doc = Document::parse(html);
        let styled = style::compute_styles(&doc);
        let geometry =
            layout::compute_geometry(&styled, config.viewport_width, config.viewport_height);

        let engine = Engine::initialize(&doc, &config.engine)?;
        let effects = PageEffects::initialize(&doc, &config.effects)?;

        let mut page = Page {
            doc,
            geometry,
            viewport: Viewport::new(config.viewport_width, config.viewport_height),
            engine,
            effects,
            clock_ms: 0.0,
        };

        let active = page
            .effects
            .set_active_item(&page.doc, &config.path, config.hash.as_deref());
        engine::apply_effects(&mut page.doc, &active);

        page.tick();
        Ok(page)
    }

    /// Scroll to an absolute position, clamped to the page extent. Runs the
    /// scroll-linked behaviors and a zero-elapsed animation frame, the way
    /// scrolling in a live page fires intersection callbacks immediately.
    pub fn scroll_to(&mut self, y: f32) {
        let max_scroll = (self.geometry.page_height() - self.viewport.height).max(0.0);
        let y = y.clamp(0.0, max_scroll);
        self.viewport.scroll_y = y;

        let scroll_effects = self.effects.on_scroll(y);
        engine::apply_effects(&mut self.doc, &scroll_effects);

        self.tick();
    }

    pub fn scroll_by(&mut self, dy: f32) {
        self.scroll_to(self.viewport.scroll_y + dy);
    }

    /// Move the logical clock forward and run one animation frame at the
    /// new time. Elapsed time, not frame count, drives progress: one
    /// `advance(1000)` lands the same state as ten `advance(100)`.
    pub fn advance(&mut self, ms: f64) {
        self.clock_ms += ms.max(0.0);
        self.tick();
    }

    fn tick(&mut self) {
        let frame = self
            .engine
            .tick(self.clock_ms, &self.viewport, &self.geometry);
        engine::apply_effects(&mut self.doc, &frame);
    }

    /// Re-run active-menu highlighting for a new location.
    pub fn set_location(&mut self, path: &str, hash: Option<&str>) {
        let effects = self.effects.set_active_item(&self.doc, path, hash);
        engine::apply_effects(&mut self.doc, &effects);
    }

    pub fn menu_toggle(&mut self) {
        let effects = self.effects.menu_toggle();
        engine::apply_effects(&mut self.doc, &effects);
    }

    /// Close the mobile menu. Outside activation and Escape both route
    /// here.
    pub fn menu_close(&mut self) {
        let effects = self.effects.menu_close();
        engine::apply_effects(&mut self.doc, &effects);
    }

    pub fn menu_is_open(&self) -> bool {
        self.effects.menu_is_open()
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn geometry(&self) -> &GeometryMap {
        &self.geometry
    }

    /// Current rendered text of a counter element.
    pub fn counter_text(&self, element: ElementId) -> Option<String> {
        self.doc.text_content(element)
    }

    pub fn is_revealed(&self, element: ElementId) -> bool {
        self.engine
            .reveals()
            .iter()
            .any(|r| r.element == element && r.state() == RevealState::Done)
    }

    pub fn header_state(&self) -> Option<HeaderState> {
        self.effects.header_state()
    }

    pub fn parallax_offset(&self) -> Option<f32> {
        self.effects.parallax_offset()
    }

    /// Vertical translation of the header in percent of its own height.
    pub fn header_translate_y(&self) -> Option<f32> {
        self.effects.header_translate_y()
    }

    /// Scroll position a smooth-scroll anchor would land on.
    pub fn scroll_target(&self, href: &str) -> Option<f32> {
        self.effects.scroll_target(&self.doc, &self.geometry, href)
    }

    /// True once every animation has reached its terminal state.
    pub fn is_settled(&self) -> bool {
        self.engine.is_settled()
    }

    /// Snapshot of the whole animation state for serialization.
    pub fn report(&self) -> PageReport {
        let counters = self
            .engine
            .counters()
            .iter()
            .map(|c| CounterReport {
                element: c.element,
                target: c.target,
                duration_ms: c.duration_ms,
                value: self.doc.text_content(c.element).unwrap_or_default(),
                state: match c.state() {
                    CounterState::Pending => "pending",
                    CounterState::Running { .. } => "running",
                    CounterState::Done => "done",
                },
            })
            .collect();

        let reveals = self
            .engine
            .reveals()
            .iter()
            .map(|r| RevealReport {
                element: r.element,
                delay_ms: r.delay_ms,
                revealed: r.state() == RevealState::Done,
                state: match r.state() {
                    RevealState::Pending => "pending",
                    RevealState::Waiting { .. } => "waiting",
                    RevealState::Done => "done",
                },
            })
            .collect();

        PageReport {
            clock_ms: self.clock_ms,
            vp: [self.viewport.width, self.viewport.height],
            scroll: [self.viewport.scroll_x, self.viewport.scroll_y],
            header: self.effects.header_state(),
            header_translate_y: self.effects.header_translate_y(),
            parallax_y: self.effects.parallax_offset(),
            counters,
            reveals,
        }
    }
}
