//! End-to-end tests for delayed reveal animations.

use scrolly_core::query;
use scrolly_core::{Page, PageConfig};

fn reveal_page(attrs: &str) -> String {
    format!(
        r#"
        <html><body style="margin: 0;">
            <div style="height: 2000px;">spacer</div>
            <div class="invisible card" {} style="height: 100px;">hello</div>
            <div style="height: 1000px;">tail</div>
        </body></html>
        "#,
        attrs
    )
}

fn load(html: &str) -> Page {
    Page::load(html, PageConfig::default()).unwrap()
}

fn reveal_id(page: &Page) -> scrolly_core::dom::ElementId {
    query::select_str(page.document(), ".card").unwrap()[0]
}

#[test]
fn test_reveal_swaps_classes_once_visible() {
    let html = reveal_page("");
    let mut page = load(&html);
    let id = reveal_id(&page);

    assert!(page.document().has_class(id, "invisible"));

    page.scroll_to(1600.0);
    // Zero delay fires on the scroll frame itself
    assert!(page.is_revealed(id));
    assert!(!page.document().has_class(id, "invisible"));
    assert!(page.document().has_class(id, "in-viewport"));
}

#[test]
fn test_reveal_waits_for_delay() {
    let html = reveal_page(r#"data-animation-delay="300""#);
    let mut page = load(&html);
    let id = reveal_id(&page);

    page.scroll_to(1600.0);
    assert!(!page.is_revealed(id));

    page.advance(299.0);
    assert!(!page.is_revealed(id));
    assert!(page.document().has_class(id, "invisible"));

    page.advance(1.0);
    assert!(page.is_revealed(id));
    assert!(page.document().has_class(id, "in-viewport"));
}

#[test]
fn test_reveal_fires_exactly_once() {
    let html = reveal_page(r#"data-animation-delay="100""#);
    let mut page = load(&html);
    let id = reveal_id(&page);

    page.scroll_to(1600.0);
    page.advance(100.0);
    assert!(page.is_revealed(id));

    // Scrolling away and back must not re-run the swap
    page.scroll_to(0.0);
    page.scroll_to(1600.0);
    page.advance(500.0);
    assert!(page.is_revealed(id));
    assert!(page.document().has_class(id, "in-viewport"));
    assert!(!page.document().has_class(id, "invisible"));
}

#[test]
fn test_reveal_edge_of_viewport_is_not_intersecting() {
    let html = reveal_page("");
    let mut page = load(&html);
    let id = reveal_id(&page);

    // 50px of the element inside the viewport, exactly consumed by the
    // -50px margin, so the shrunken region sees nothing
    page.scroll_to(970.0);
    page.advance(100.0);
    assert!(!page.is_revealed(id));

    // 110px past the edge: 60px survives the margin, well past threshold
    page.scroll_to(1030.0);
    page.advance(100.0);
    assert!(page.is_revealed(id));
}

#[test]
fn test_reveal_malformed_delay_defaults_to_zero() {
    let html = reveal_page(r#"data-animation-delay="later""#);
    let mut page = load(&html);
    let id = reveal_id(&page);

    page.scroll_to(1600.0);
    assert!(page.is_revealed(id));
}

#[test]
fn test_reveal_keeps_unrelated_classes() {
    let html = reveal_page("");
    let mut page = load(&html);
    let id = reveal_id(&page);

    page.scroll_to(1600.0);
    assert!(page.document().has_class(id, "card"));
}
