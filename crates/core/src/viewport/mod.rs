//! Viewport state and one-shot intersection watching.
//!
//! The watcher is the resource-lifetime boundary of the engine: a watch
//! fires at most once and is released on its first firing. A watch whose
//! element never becomes visible is held until the watcher is dropped.

use crate::dom::ElementId;
use crate::layout::{Bounds, GeometryMap};

/// The visible rect, in page coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

/// How a single watch decides an element has become visible.
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    /// Minimum fraction of the element's area inside the test region.
    pub threshold: f32,
    /// Signed margin applied to all four sides of the viewport before
    /// testing. Negative shrinks the region, so an element at the exact
    /// geometric edge does not count as intersecting.
    pub root_margin: f32,
}

/// Fraction of the element's area inside the (margin-adjusted) viewport.
/// Degenerate elements and regions produce 0.
pub fn intersection_ratio(bounds: &Bounds, viewport: &Viewport, root_margin: f32) -> f32 {
    let area = bounds.area();
    if area <= 0.0 {
        return 0.0;
    }

    // Positive margin expands the region outward, negative shrinks it
    let left = viewport.scroll_x - root_margin;
    let top = viewport.scroll_y - root_margin;
    let right = viewport.scroll_x + viewport.width + root_margin;
    let bottom = viewport.scroll_y + viewport.height + root_margin;
    if right <= left || bottom <= top {
        return 0.0;
    }

    let ix = (bounds.right().min(right) - bounds.x.max(left)).max(0.0);
    let iy = (bounds.bottom().min(bottom) - bounds.y.max(top)).max(0.0);

    (ix * iy) / area
}

/// An element whose watch fired this poll.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityEvent {
    pub element: ElementId,
    pub ratio: f32,
}

struct Watch {
    element: ElementId,
    options: WatchOptions,
}

/// Registry of one-shot visibility watches.
#[derive(Default)]
pub struct Watcher {
    watches: Vec<Watch>,
}

impl Watcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, element: ElementId, options: WatchOptions) {
        self.watches.push(Watch { element, options });
    }

    /// Number of watches still held.
    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Test every held watch against the current viewport. Watches whose
    /// threshold is met fire exactly once and are released before this
    /// returns, so a later poll can never re-fire them.
    pub fn poll(&mut self, viewport: &Viewport, geometry: &GeometryMap) -> Vec<VisibilityEvent> {
        let mut fired = Vec::new();
        self.watches.retain(|watch| {
            let ratio = geometry
                .get(watch.element)
                .map(|b| intersection_ratio(b, viewport, watch.options.root_margin))
                .unwrap_or(0.0);
            if ratio >= watch.options.threshold {
                fired.push(VisibilityEvent {
                    element: watch.element,
                    ratio,
                });
                false
            } else {
                true
            }
        });
        fired
    }
}
