//! Whole-page timeline tests: counters, reveals, header, and the report
//! output driving together.

use pretty_assertions::assert_eq;
use scrolly_core::{query, report};
use scrolly_core::{Page, PageConfig};

const LANDING_PAGE: &str = r#"
<html>
<head><title>Acme Builders</title></head>
<body style="margin: 0;">
    <header style="height: 80px;">
        <nav class="nav-menu"><ul>
            <li><a href="/">Home</a></li>
            <li><a href="/projects">Projects</a></li>
        </ul></nav>
        <button class="menu-toggle">menu</button>
    </header>
    <div class="hero" style="height: 900px;">welcome</div>
    <section id="stats" style="height: 400px;">
        <div class="invisible" data-animation-delay="200" style="height: 120px;">
            <div class="counter-number" data-to-value="1250" data-duration="1000"
                 style="height: 60px;">0</div>
        </div>
        <div class="counter-number" data-to-value="98" style="height: 60px;">0</div>
    </section>
    <div style="height: 2000px;">tail</div>
</body></html>
"#;

#[test]
fn test_landing_page_timeline() {
    let mut page = Page::load(LANDING_PAGE, PageConfig::default()).unwrap();

    let counters = query::select_str(page.document(), ".counter-number").unwrap();
    assert_eq!(counters.len(), 2);
    let big = counters[0];
    let small = counters[1];
    let reveal = query::select_str(page.document(), "section div").unwrap()[0];

    // Above the fold nothing has fired
    assert_eq!(page.counter_text(big).as_deref(), Some("0"));
    assert!(!page.is_revealed(reveal));

    // Scroll the stats section into view
    page.scroll_to(700.0);
    assert!(page.header_state().unwrap().collapsed);
    assert_eq!(page.parallax_offset(), Some(350.0));

    // Both counters run; the reveal is still waiting out its delay
    page.advance(100.0);
    assert!(!page.is_revealed(reveal));
    let early: i64 = text_value(&page, big);
    assert!(early > 0);
    assert!(early < 1250);

    page.advance(100.0);
    assert!(page.is_revealed(reveal));

    // Counter with explicit duration finishes at 1000ms
    page.advance(800.0);
    assert_eq!(page.counter_text(big).as_deref(), Some("1,250"));

    // The other counter uses the 2000ms default and is still short
    let small_mid: i64 = text_value(&page, small);
    assert!(small_mid < 98);

    page.advance(1000.0);
    assert_eq!(page.counter_text(small).as_deref(), Some("98"));
    assert!(page.is_settled());
}

#[test]
fn test_report_snapshot() {
    let mut page = Page::load(LANDING_PAGE, PageConfig::default()).unwrap();
    page.scroll_to(700.0);
    page.advance(500.0);

    let report = page.report();
    assert_eq!(report.clock_ms, 500.0);
    assert_eq!(report.scroll, [0.0, 700.0]);
    assert_eq!(report.counters.len(), 2);
    assert_eq!(report.reveals.len(), 1);
    assert!(report.reveals[0].revealed);
    assert_eq!(report.counters[0].state, "running");

    let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
    assert_eq!(json["vp"][0], 1920.0);
    assert_eq!(json["counters"][0]["target"], 1250);
    assert_eq!(json["header"]["collapsed"], true);

    let compact = report::to_compact_string(&report);
    assert_eq!(compact.lines().count(), 3);
    assert!(compact.contains(":counter"));
    assert!(compact.contains(":reveal"));
}

#[test]
fn test_default_load_entry_point() {
    let page = scrolly_core::load(LANDING_PAGE, 1280.0, 720.0).unwrap();
    assert_eq!(page.viewport().width, 1280.0);
    assert_eq!(page.viewport().height, 720.0);
}

#[test]
fn test_counter_and_reveal_marker_config() {
    let html = r#"
    <html><body style="margin: 0;">
        <div class="stat-value" data-to-value="42" data-duration="1000"
             style="height: 60px;">0</div>
        <div style="height: 3000px;">tail</div>
    </body></html>
    "#;
    let mut config = PageConfig::default();
    config.engine.counter_selector = ".stat-value".to_string();

    let mut page = Page::load(html, config).unwrap();
    let id = query::select_str(page.document(), ".stat-value").unwrap()[0];
    page.advance(1000.0);
    assert_eq!(page.counter_text(id).as_deref(), Some("42"));
}

#[test]
fn test_invalid_selector_surfaces_as_page_error() {
    let mut config = PageConfig::default();
    config.engine.counter_selector = "[broken".to_string();
    match Page::load("<html><body></body></html>", config) {
        Err(e) => assert!(e.to_string().contains("invalid selector")),
        Ok(_) => panic!("expected a selector error"),
    }
}

fn text_value(page: &Page, id: scrolly_core::dom::ElementId) -> i64 {
    page.counter_text(id)
        .unwrap()
        .replace(',', "")
        .parse()
        .unwrap()
}
