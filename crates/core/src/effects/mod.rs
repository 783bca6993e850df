//! Scroll-linked page behaviors outside the animation engine: header
//! collapse and show/hide, the hero parallax offset, active-menu-item
//! highlighting, the mobile menu, and smooth-scroll target positions.
//!
//! Every landmark is optional. A page without a header, hero, or nav
//! simply skips the dependent behavior.

use crate::dom::{Document, ElementId};
use crate::engine::Effect;
use crate::layout::GeometryMap;
use crate::query::{self, SelectorError};
use serde::Serialize;

/// Scroll depth past which the header gets its collapsed treatment.
const HEADER_COLLAPSE_AT: f32 = 100.0;
/// Scroll depth past which downward scrolling hides the header.
const HEADER_HIDE_AT: f32 = 200.0;
/// Parallax background moves at half scroll speed.
const PARALLAX_FACTOR: f32 = 0.5;
/// Smooth-scroll targets stop this far short of the element.
const SCROLL_TARGET_GAP: f32 = 20.0;

/// Landmark selectors and class names for the page behaviors.
#[derive(Debug, Clone)]
pub struct EffectsConfig {
    pub header_selector: String,
    pub hero_selector: String,
    pub nav_link_selector: String,
    pub menu_selector: String,
    pub menu_toggle_selector: String,
    /// Added to the header once scrolled past the collapse depth.
    pub scrolled_class: String,
    /// Added to the matching nav anchor.
    pub active_item_class: String,
    /// Added to the matching nav anchor's parent.
    pub active_parent_class: String,
    /// Added to the menu while open.
    pub menu_open_class: String,
    /// Added to the toggle while the menu is open.
    pub toggle_active_class: String,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            header_selector: "header".to_string(),
            hero_selector: ".hero".to_string(),
            nav_link_selector: "nav a".to_string(),
            menu_selector: ".nav-menu".to_string(),
            menu_toggle_selector: ".menu-toggle".to_string(),
            scrolled_class: "scrolled".to_string(),
            active_item_class: "item-active".to_string(),
            active_parent_class: "current-menu-item".to_string(),
            menu_open_class: "open".to_string(),
            toggle_active_class: "active".to_string(),
        }
    }
}

/// Header presentation produced by the scroll position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HeaderState {
    /// Past the collapse depth; the `scrolled` class is on.
    pub collapsed: bool,
    /// Scrolling down past the hide depth; translated fully off-screen.
    pub hidden: bool,
}

pub struct PageEffects {
    header: Option<ElementId>,
    hero: Option<ElementId>,
    nav_links: Vec<ElementId>,
    menu: Option<ElementId>,
    menu_toggle: Option<ElementId>,
    config: EffectsConfig,
    last_scroll_top: f32,
    header_state: HeaderState,
    parallax_y: f32,
    menu_open: bool,
}

impl PageEffects {
    pub fn initialize(doc: &Document, config: &EffectsConfig) -> Result<Self, SelectorError> {
        let header = first(doc, &config.header_selector)?;
        let hero = first(doc, &config.hero_selector)?;
        let nav_links = query::select_str(doc, &config.nav_link_selector)?;
        let menu = first(doc, &config.menu_selector)?;
        let menu_toggle = first(doc, &config.menu_toggle_selector)?;

        Ok(Self {
            header,
            hero,
            nav_links,
            menu,
            menu_toggle,
            config: config.clone(),
            last_scroll_top: 0.0,
            header_state: HeaderState::default(),
            parallax_y: 0.0,
            menu_open: false,
        })
    }

    /// Recompute the scroll-linked state for a new scroll position and
    /// return the class mutations it implies.
    pub fn on_scroll(&mut self, scroll_y: f32) -> Vec<Effect> {
        let mut effects = Vec::new();

        if let Some(header) = self.header {
            let collapsed = scroll_y > HEADER_COLLAPSE_AT;
            if collapsed != self.header_state.collapsed {
                effects.push(if collapsed {
                    Effect::AddClass {
                        element: header,
                        class: self.config.scrolled_class.clone(),
                    }
                } else {
                    Effect::RemoveClass {
                        element: header,
                        class: self.config.scrolled_class.clone(),
                    }
                });
            }

            // Hide when scrolling down past the hide depth, show on any
            // upward scroll
            let hidden = scroll_y > self.last_scroll_top && scroll_y > HEADER_HIDE_AT;
            self.header_state = HeaderState { collapsed, hidden };
        }

        if self.hero.is_some() {
            self.parallax_y = scroll_y * PARALLAX_FACTOR;
        }

        self.last_scroll_top = scroll_y;
        effects
    }

    /// Header presentation, when a header landmark exists.
    pub fn header_state(&self) -> Option<HeaderState> {
        self.header.map(|_| self.header_state)
    }

    /// Vertical translation of the header in percent of its own height:
    /// -100.0 while hidden, 0.0 otherwise.
    pub fn header_translate_y(&self) -> Option<f32> {
        self.header
            .map(|_| if self.header_state.hidden { -100.0 } else { 0.0 })
    }

    /// Hero background vertical offset, when a hero landmark exists.
    pub fn parallax_offset(&self) -> Option<f32> {
        self.hero.map(|_| self.parallax_y)
    }

    /// Mark the nav anchors matching the current location. All anchors are
    /// cleared first; every matching anchor (and its parent item) is then
    /// marked. A `#hash` in the location overrides path matching.
    pub fn set_active_item(&self, doc: &Document, path: &str, hash: Option<&str>) -> Vec<Effect> {
        let mut effects = Vec::new();

        for &link in &self.nav_links {
            effects.push(Effect::RemoveClass {
                element: link,
                class: self.config.active_item_class.clone(),
            });
            if let Some(parent) = doc.parent_of(link) {
                effects.push(Effect::RemoveClass {
                    element: parent,
                    class: self.config.active_parent_class.clone(),
                });
            }
        }

        for &link in &self.nav_links {
            let href = match doc.attr(link, "href") {
                Some(h) => h.to_string(),
                None => continue,
            };

            let is_match = match hash {
                Some(hash) => href == hash,
                None => {
                    href == path
                        || (path == "/" && href == "/")
                        || (path.contains(href.as_str()) && href != "/")
                }
            };

            if is_match {
                effects.push(Effect::AddClass {
                    element: link,
                    class: self.config.active_item_class.clone(),
                });
                if let Some(parent) = doc.parent_of(link) {
                    effects.push(Effect::AddClass {
                        element: parent,
                        class: self.config.active_parent_class.clone(),
                    });
                }
            }
        }

        effects
    }

    pub fn menu_is_open(&self) -> bool {
        self.menu_open
    }

    /// Toggle the mobile menu. No-op (empty) when the landmarks are absent.
    pub fn menu_toggle(&mut self) -> Vec<Effect> {
        let (menu, toggle) = match (self.menu, self.menu_toggle) {
            (Some(m), Some(t)) => (m, t),
            _ => return Vec::new(),
        };

        self.menu_open = !self.menu_open;
        if self.menu_open {
            vec![
                Effect::AddClass {
                    element: menu,
                    class: self.config.menu_open_class.clone(),
                },
                Effect::AddClass {
                    element: toggle,
                    class: self.config.toggle_active_class.clone(),
                },
            ]
        } else {
            self.menu_close_effects(menu, toggle)
        }
    }

    /// Close the menu. Outside activation and Escape both land here.
    pub fn menu_close(&mut self) -> Vec<Effect> {
        let (menu, toggle) = match (self.menu, self.menu_toggle) {
            (Some(m), Some(t)) => (m, t),
            _ => return Vec::new(),
        };
        if !self.menu_open {
            return Vec::new();
        }
        self.menu_open = false;
        self.menu_close_effects(menu, toggle)
    }

    fn menu_close_effects(&self, menu: ElementId, toggle: ElementId) -> Vec<Effect> {
        vec![
            Effect::RemoveClass {
                element: menu,
                class: self.config.menu_open_class.clone(),
            },
            Effect::RemoveClass {
                element: toggle,
                class: self.config.toggle_active_class.clone(),
            },
        ]
    }

    /// Scroll position for a smooth-scroll anchor: the target's top minus
    /// the header height and a small gap. None for `#`, unknown targets,
    /// or malformed hrefs.
    pub fn scroll_target(
        &self,
        doc: &Document,
        geometry: &GeometryMap,
        href: &str,
    ) -> Option<f32> {
        let target_id = href.strip_prefix('#')?;
        if target_id.is_empty() {
            return None;
        }

        let element = query::select_str(doc, &format!("#{}", target_id)).ok()?;
        let element = *element.first()?;
        let bounds = geometry.get(element)?;

        let header_height = self
            .header
            .and_then(|h| geometry.get(h))
            .map(|b| b.height)
            .unwrap_or(0.0);

        Some((bounds.y - header_height - SCROLL_TARGET_GAP).max(0.0))
    }
}

fn first(doc: &Document, selector: &str) -> Result<Option<ElementId>, SelectorError> {
    Ok(query::select_str(doc, selector)?.into_iter().next())
}
