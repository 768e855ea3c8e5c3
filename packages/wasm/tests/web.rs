//! Browser-side checks, run with `wasm-pack test --headless`

#![cfg(target_arch = "wasm32")]

use pagekit_wasm::{component_types_js, render_button_js, sanitize_svg_js};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn render_button_through_bindings() {
    let html = render_button_js("custom-button", r#"{ "button-text": "Hi" }"#).unwrap();
    assert!(html.ends_with(">Hi</button>"));
}

#[wasm_bindgen_test]
fn sanitize_error_becomes_js_string() {
    let err = sanitize_svg_js("<div/>", None, None).unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("Icon markup must start with an <svg> tag"));
}

#[wasm_bindgen_test]
fn component_types_is_json() {
    assert!(component_types_js().unwrap().starts_with('{'));
}
