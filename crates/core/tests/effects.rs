//! Tests for the scroll-linked page behaviors: header, parallax, menus,
//! and smooth-scroll targets.

use scrolly_core::query;
use scrolly_core::{Page, PageConfig};

const PAGE: &str = r##"
<html><body style="margin: 0;">
    <header style="height: 80px;">
        <nav class="nav-menu"><ul>
            <li><a href="/">Home</a></li>
            <li><a href="/about">About</a></li>
            <li><a href="#stats">Stats</a></li>
        </ul></nav>
        <button class="menu-toggle">menu</button>
    </header>
    <div class="hero" style="height: 600px;">big picture</div>
    <div style="height: 1000px;">content</div>
    <section id="stats" style="height: 400px;">numbers</section>
    <div style="height: 2000px;">tail</div>
</body></html>
"##;

fn load() -> Page {
    Page::load(PAGE, PageConfig::default()).unwrap()
}

#[test]
fn test_header_collapses_past_100() {
    let mut page = load();
    let header = query::select_str(page.document(), "header").unwrap()[0];

    let state = page.header_state().unwrap();
    assert!(!state.collapsed);

    page.scroll_to(150.0);
    assert!(page.header_state().unwrap().collapsed);
    assert!(page.document().has_class(header, "scrolled"));

    page.scroll_to(50.0);
    assert!(!page.header_state().unwrap().collapsed);
    assert!(!page.document().has_class(header, "scrolled"));
}

#[test]
fn test_header_hides_scrolling_down_past_200() {
    let mut page = load();

    page.scroll_to(150.0);
    assert!(!page.header_state().unwrap().hidden);

    page.scroll_to(300.0);
    let state = page.header_state().unwrap();
    assert!(state.hidden);
    assert_eq!(page.header_translate_y(), Some(-100.0));

    // Any upward scroll brings it back
    page.scroll_to(290.0);
    assert!(!page.header_state().unwrap().hidden);
    assert_eq!(page.header_translate_y(), Some(0.0));
}

#[test]
fn test_parallax_tracks_half_scroll_speed() {
    let mut page = load();
    assert_eq!(page.parallax_offset(), Some(0.0));

    page.scroll_to(400.0);
    assert_eq!(page.parallax_offset(), Some(200.0));
}

#[test]
fn test_missing_landmarks_degrade_gracefully() {
    let html = r#"
    <html><body style="margin: 0;">
        <div style="height: 3000px;">no header, no hero, no nav</div>
    </body></html>
    "#;
    let mut page = Page::load(html, PageConfig::default()).unwrap();

    page.scroll_to(500.0);
    assert_eq!(page.header_state(), None);
    assert_eq!(page.parallax_offset(), None);

    // Menu operations are no-ops without the landmarks
    page.menu_toggle();
    assert!(!page.menu_is_open());
}

#[test]
fn test_active_menu_exact_path_match() {
    let mut page = load();
    page.set_location("/about", None);

    let doc = page.document();
    let links = query::select_str(doc, "nav a").unwrap();
    let about = links
        .iter()
        .copied()
        .find(|&l| doc.attr(l, "href") == Some("/about"))
        .unwrap();
    let home = links
        .iter()
        .copied()
        .find(|&l| doc.attr(l, "href") == Some("/"))
        .unwrap();

    assert!(doc.has_class(about, "item-active"));
    assert!(doc.has_class(doc.parent_of(about).unwrap(), "current-menu-item"));
    assert!(!doc.has_class(home, "item-active"));
}

#[test]
fn test_active_menu_root_only_matches_root() {
    let mut page = load();
    page.set_location("/", None);

    let doc = page.document();
    let links = query::select_str(doc, "nav a").unwrap();
    let home = links
        .iter()
        .copied()
        .find(|&l| doc.attr(l, "href") == Some("/"))
        .unwrap();
    let about = links
        .iter()
        .copied()
        .find(|&l| doc.attr(l, "href") == Some("/about"))
        .unwrap();

    assert!(doc.has_class(home, "item-active"));
    assert!(!doc.has_class(about, "item-active"));
}

#[test]
fn test_active_menu_subpath_contains_match() {
    let mut page = load();
    page.set_location("/about/team", None);

    let doc = page.document();
    let links = query::select_str(doc, "nav a").unwrap();
    let about = links
        .iter()
        .copied()
        .find(|&l| doc.attr(l, "href") == Some("/about"))
        .unwrap();
    assert!(doc.has_class(about, "item-active"));
}

#[test]
fn test_active_menu_hash_overrides_path() {
    let mut page = load();
    page.set_location("/about", Some("#stats"));

    let doc = page.document();
    let links = query::select_str(doc, "nav a").unwrap();
    let stats = links
        .iter()
        .copied()
        .find(|&l| doc.attr(l, "href") == Some("#stats"))
        .unwrap();
    let about = links
        .iter()
        .copied()
        .find(|&l| doc.attr(l, "href") == Some("/about"))
        .unwrap();

    assert!(doc.has_class(stats, "item-active"));
    assert!(!doc.has_class(about, "item-active"));
}

#[test]
fn test_menu_toggle_and_close() {
    let mut page = load();
    let doc_menu = query::select_str(page.document(), ".nav-menu").unwrap()[0];
    let doc_toggle = query::select_str(page.document(), ".menu-toggle").unwrap()[0];

    page.menu_toggle();
    assert!(page.menu_is_open());
    assert!(page.document().has_class(doc_menu, "open"));
    assert!(page.document().has_class(doc_toggle, "active"));

    // Escape / outside activation
    page.menu_close();
    assert!(!page.menu_is_open());
    assert!(!page.document().has_class(doc_menu, "open"));
    assert!(!page.document().has_class(doc_toggle, "active"));

    // Closing an already-closed menu changes nothing
    page.menu_close();
    assert!(!page.menu_is_open());
}

#[test]
fn test_smooth_scroll_target_offsets_header() {
    let page = load();
    // #stats sits below header (80) + hero (600) + content (1000)
    let target = page.scroll_target("#stats").unwrap();
    assert_eq!(target, 1680.0 - 80.0 - 20.0);
}

#[test]
fn test_smooth_scroll_bare_hash_and_unknown_target() {
    let page = load();
    assert_eq!(page.scroll_target("#"), None);
    assert_eq!(page.scroll_target("#nope"), None);
}
