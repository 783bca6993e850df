pub mod dom;
pub mod style;
pub mod query;
pub mod layout;
pub mod viewport;
pub mod motion;
pub mod engine;
pub mod effects;
pub mod page;
pub mod report;

pub use page::{Page, PageConfig, PageError};

/// Load an HTML string into a page session with default configuration.
/// This is the primary entry point for scrolly-core.
pub fn load(html: &str, viewport_width: f32, viewport_height: f32) -> Result<Page, PageError> {
    Page::load(
        html,
        PageConfig {
            viewport_width,
            viewport_height,
            ..Default::default()
        },
    )
}
