use indexmap::IndexMap;
use pagekit_common::{NullSink, TraitKey, TraitSnapshot, TraitValue};
use pagekit_compiler_html::{compile_document, CompileOptions};
use pagekit_editor::{install, ComponentTypeDef, Document, PaletteEntry, PluginOptions};
use pagekit_evaluator::{try_sanitize, StyleResolver};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Everything a host editor needs to register the button types
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Registration<'a> {
    component_types: Vec<&'a ComponentTypeDef>,
    palette: &'a [PaletteEntry],
}

fn parse_traits(traits_json: &str) -> Result<Vec<(TraitKey, TraitValue)>, String> {
    let traits: IndexMap<String, TraitValue> = if traits_json.trim().is_empty() {
        IndexMap::new()
    } else {
        serde_json::from_str(traits_json).map_err(|e| format!("Invalid traits JSON: {}", e))?
    };

    traits
        .into_iter()
        .map(|(name, value)| -> Result<(TraitKey, TraitValue), String> {
            let key = name.parse::<TraitKey>().map_err(|e| e.to_string())?;
            Ok((key, value))
        })
        .collect()
}

fn installed_document() -> Result<Document, String> {
    let mut doc = Document::with_sink(Rc::new(NullSink));
    install(&mut doc, &PluginOptions::default()).map_err(|e| e.to_string())?;
    Ok(doc)
}

pub fn sanitize_svg(raw: &str, size: Option<i64>, color: Option<&str>) -> Result<String, String> {
    try_sanitize(raw, size, color).map_err(|e| e.to_string())
}

pub fn resolve_style(traits_json: &str) -> Result<String, String> {
    let mut snapshot = TraitSnapshot::default();
    for (key, value) in parse_traits(traits_json)? {
        snapshot.set(key, value).map_err(|e| e.to_string())?;
    }
    Ok(StyleResolver::resolve(&snapshot).to_css_text())
}

pub fn render_button(type_name: &str, traits_json: &str) -> Result<String, String> {
    let traits = parse_traits(traits_json)?;
    let mut doc = installed_document()?;
    let id = doc.insert_with(type_name, traits).map_err(|e| e.to_string())?;
    doc.run_pending();

    let options = CompileOptions {
        pretty: false,
        ..Default::default()
    };
    compile_document(&doc, &[id], &options).map_err(|e| e.to_string())
}

pub fn component_types() -> Result<String, String> {
    let doc = installed_document()?;
    let registration = Registration {
        component_types: doc.component_types().collect(),
        palette: doc.palette(),
    };
    serde_json::to_string(&registration).map_err(|e| format!("Serialization error: {}", e))
}

/// Sanitize icon markup for embedding in a button
#[wasm_bindgen(js_name = sanitizeSvg)]
pub fn sanitize_svg_js(raw: &str, size: Option<i32>, color: Option<String>) -> Result<String, JsValue> {
    sanitize_svg(raw, size.map(i64::from), color.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Resolve the inline style for a JSON object of trait values
#[wasm_bindgen(js_name = resolveStyle)]
pub fn resolve_style_js(traits_json: &str) -> Result<String, JsValue> {
    resolve_style(traits_json).map_err(|e| JsValue::from_str(&e))
}

/// Render a button of `type_name` with the given traits to HTML
#[wasm_bindgen(js_name = renderButton)]
pub fn render_button_js(type_name: &str, traits_json: &str) -> Result<String, JsValue> {
    render_button(type_name, traits_json).map_err(|e| JsValue::from_str(&e))
}

/// Component type declarations and palette entries as JSON
#[wasm_bindgen(js_name = componentTypes)]
pub fn component_types_js() -> Result<String, JsValue> {
    component_types().map_err(|e| JsValue::from_str(&e))
}
