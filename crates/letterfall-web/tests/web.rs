//! Browser tests for the DOM helpers. Run with `wasm-pack test --headless --firefox`.

use letterfall_web::dom;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn create_sets_class_and_style() {
    let el = dom::create("div", "floating-letter").unwrap();
    dom::set_style(&el, "opacity", "0").unwrap();
    assert_eq!(el.class_name(), "floating-letter");
    assert_eq!(el.style().get_property_value("opacity").unwrap(), "0");
}

#[wasm_bindgen_test]
fn query_all_returns_letters_in_order() {
    let body = dom::body().unwrap();
    let heading = dom::create("h1", "").unwrap();
    for ch in ["W", "A", "L"] {
        let span = dom::create("span", "title-letter").unwrap();
        span.set_text_content(Some(ch));
        heading.append_child(&span).unwrap();
    }
    body.append_child(&heading).unwrap();

    let letters = dom::query_all(&dom::document().unwrap(), ".title-letter").unwrap();
    let text: Vec<String> = letters.iter().filter_map(|l| l.text_content()).collect();
    assert_eq!(text, ["W", "A", "L"]);
    heading.remove();
}

#[wasm_bindgen_test]
fn viewport_is_positive() {
    let vp = dom::viewport().unwrap();
    assert!(vp.width > 0.0 && vp.height > 0.0);
}

#[wasm_bindgen_test]
fn idle_frame_releases_the_loop() {
    let mut runner = letterfall_web::EggRunner::new(letterfall::EggConfig::default(), Vec::new(), 7);
    assert!(runner.claim_frame_loop());
    assert!(!runner.claim_frame_loop());
    assert_eq!(runner.frame(16.0).unwrap(), false);
    assert!(runner.claim_frame_loop());
}
