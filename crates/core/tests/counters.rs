//! End-to-end tests for the counter animation engine.

use scrolly_core::query;
use scrolly_core::{Page, PageConfig};

fn counter_page(attrs: &str) -> String {
    format!(
        r#"
        <html><body style="margin: 0;">
            <div style="height: 2000px;">spacer</div>
            <div class="counter-number" {} style="height: 100px;">0</div>
            <div style="height: 1000px;">tail</div>
        </body></html>
        "#,
        attrs
    )
}

fn load(html: &str) -> Page {
    Page::load(html, PageConfig::default()).unwrap()
}

fn counter_id(page: &Page) -> scrolly_core::dom::ElementId {
    query::select_str(page.document(), ".counter-number").unwrap()[0]
}

#[test]
fn test_counter_starts_on_first_intersection() {
    let html = counter_page(r#"data-to-value="500" data-duration="1000""#);
    let mut page = load(&html);
    let id = counter_id(&page);

    // Not visible yet, nothing runs
    page.advance(500.0);
    assert_eq!(page.counter_text(id).as_deref(), Some("0"));
    assert!(!page.is_settled());

    // Fully in view: animation begins on the scroll frame
    page.scroll_to(1600.0);
    page.advance(1000.0);
    assert_eq!(page.counter_text(id).as_deref(), Some("500"));
    assert!(page.is_settled());
}

#[test]
fn test_counter_midpoint_is_eased() {
    let html = counter_page(r#"data-to-value="500" data-duration="1000""#);
    let mut page = load(&html);
    let id = counter_id(&page);

    page.scroll_to(1600.0);
    page.advance(500.0);
    // floor((1 - 0.5^4) * 500) = 468
    assert_eq!(page.counter_text(id).as_deref(), Some("468"));
}

#[test]
fn test_counter_below_threshold_does_not_start() {
    let html = counter_page(r#"data-to-value="500" data-duration="1000""#);
    let mut page = load(&html);
    let id = counter_id(&page);

    // 30px of the 100px element visible: ratio 0.3, threshold is 0.5
    page.scroll_to(950.0);
    page.advance(1000.0);
    assert_eq!(page.counter_text(id).as_deref(), Some("0"));
    assert!(!page.is_settled());
}

#[test]
fn test_counter_missing_duration_defaults_to_2000() {
    let html = counter_page(r#"data-to-value="800""#);
    let mut page = load(&html);
    let id = counter_id(&page);

    page.scroll_to(1600.0);
    page.advance(1000.0);
    // Halfway through the default 2000ms: floor(0.9375 * 800)
    assert_eq!(page.counter_text(id).as_deref(), Some("750"));
    page.advance(1000.0);
    assert_eq!(page.counter_text(id).as_deref(), Some("800"));
}

#[test]
fn test_counter_malformed_attributes_use_defaults() {
    let html = counter_page(r#"data-to-value="lots" data-duration="soon""#);
    let mut page = load(&html);
    let id = counter_id(&page);

    page.scroll_to(1600.0);
    page.advance(2000.0);
    // Target fell back to 0 and duration to 2000, so it settles at "0"
    assert_eq!(page.counter_text(id).as_deref(), Some("0"));
    assert!(page.is_settled());
}

#[test]
fn test_counter_zero_target_stays_zero() {
    let html = counter_page(r#"data-to-value="0" data-duration="1000""#);
    let mut page = load(&html);
    let id = counter_id(&page);

    page.scroll_to(1600.0);
    for _ in 0..10 {
        page.advance(100.0);
        assert_eq!(page.counter_text(id).as_deref(), Some("0"));
    }
    assert!(page.is_settled());
}

#[test]
fn test_counter_does_not_restart_after_leaving_viewport() {
    let html = counter_page(r#"data-to-value="500" data-duration="1000""#);
    let mut page = load(&html);
    let id = counter_id(&page);

    page.scroll_to(1600.0);
    page.advance(500.0);
    assert_eq!(page.counter_text(id).as_deref(), Some("468"));

    // Leave and come back: the run keeps its original start time
    page.scroll_to(0.0);
    page.scroll_to(1600.0);
    page.advance(500.0);
    assert_eq!(page.counter_text(id).as_deref(), Some("500"));
    assert!(page.is_settled());
}

#[test]
fn test_counter_value_is_monotonic() {
    let html = counter_page(r#"data-to-value="1234" data-duration="1000""#);
    let mut page = load(&html);
    let id = counter_id(&page);

    page.scroll_to(1600.0);
    let mut last = -1i64;
    for _ in 0..25 {
        page.advance(50.0);
        let value: i64 = page
            .counter_text(id)
            .unwrap()
            .replace(',', "")
            .parse()
            .unwrap();
        assert!(value >= last);
        last = value;
    }
    assert_eq!(last, 1234);
}

#[test]
fn test_counter_formats_with_thousands_grouping() {
    let html = counter_page(r#"data-to-value="1234567" data-duration="1000""#);
    let mut page = load(&html);
    let id = counter_id(&page);

    page.scroll_to(1600.0);
    page.advance(1000.0);
    assert_eq!(page.counter_text(id).as_deref(), Some("1,234,567"));
}

#[test]
fn test_counter_in_initial_viewport_starts_at_load() {
    let html = r#"
    <html><body style="margin: 0;">
        <div class="counter-number" data-to-value="100" data-duration="1000"
             style="height: 100px;">0</div>
        <div style="height: 3000px;">tail</div>
    </body></html>
    "#;
    let mut page = load(html);
    let id = counter_id(&page);

    // No scroll at all: the load-time frame saw the element
    page.advance(1000.0);
    assert_eq!(page.counter_text(id).as_deref(), Some("100"));
}

#[test]
fn test_frame_cadence_does_not_change_duration() {
    let html = counter_page(r#"data-to-value="500" data-duration="1000""#);

    let mut coarse = load(&html);
    coarse.scroll_to(1600.0);
    coarse.advance(1000.0);

    let mut fine = load(&html);
    fine.scroll_to(1600.0);
    for _ in 0..100 {
        fine.advance(10.0);
    }

    let id = counter_id(&coarse);
    assert_eq!(coarse.counter_text(id), fine.counter_text(id));
}
