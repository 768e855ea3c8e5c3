use crate::{compile_document, compile_instance, compile_to_html, compile_vnode, CompileError, CompileOptions};
use pagekit_common::{NullSink, TraitKey};
use pagekit_editor::{install, Document, EditorError, InstanceId, PluginOptions, CTA_BUTTON, CUSTOM_BUTTON};
use pagekit_evaluator::VNode;
use std::rc::Rc;

fn compact() -> CompileOptions {
    CompileOptions {
        pretty: false,
        ..Default::default()
    }
}

fn document_with_button() -> (Document, InstanceId) {
    let mut doc = Document::with_sink(Rc::new(NullSink));
    install(&mut doc, &PluginOptions::default()).expect("Failed to install");
    let id = doc.insert(CUSTOM_BUTTON, None).expect("Failed to insert");
    doc.run_pending();
    (doc, id)
}

#[test]
fn test_compile_default_button() {
    let (doc, id) = document_with_button();
    let html = compile_instance(doc.instance(id).unwrap(), &compact()).expect("Failed to compile");

    assert!(html.starts_with(r#"<button class="custom-btn" type="button" style="background-color: #007bff;"#));
    assert!(html.contains("display: inline-block;"));
    assert!(html.ends_with(">Click Me!</button>"));
}

#[test]
fn test_pretty_keeps_inline_content_on_one_line() {
    let (doc, id) = document_with_button();
    let html = compile_instance(doc.instance(id).unwrap(), &CompileOptions::default()).unwrap();

    assert_eq!(html.lines().count(), 1);
    assert!(html.ends_with("</button>\n"));
}

#[test]
fn test_icon_markup_emitted_verbatim() {
    let (mut doc, id) = document_with_button();
    doc.set_trait(id, TraitKey::IconType, "svg").unwrap();
    doc.set_trait(id, TraitKey::SvgCode, "<svg><path d=\"M0 0\"/></svg>").unwrap();

    let html = compile_instance(doc.instance(id).unwrap(), &compact()).unwrap();
    assert!(html.contains(r#"<span class="btn-icon""#));
    assert!(html.contains(r#"<path d="M0 0"></path>"#));
    assert!(!html.contains("&lt;span"));
}

#[test]
fn test_attribute_values_escaped() {
    let (mut doc, id) = document_with_button();
    doc.set_trait(id, TraitKey::OnClick, r#"alert("hi & bye")"#).unwrap();

    let html = compile_instance(doc.instance(id).unwrap(), &compact()).unwrap();
    assert!(html.contains(r#"onclick="alert(&quot;hi &amp; bye&quot;)""#));
}

#[test]
fn test_disabled_attribute() {
    let (mut doc, id) = document_with_button();
    doc.set_trait(id, TraitKey::Disabled, true).unwrap();

    let html = compile_instance(doc.instance(id).unwrap(), &compact()).unwrap();
    assert!(html.contains(r#"disabled="disabled""#));
    assert!(html.contains("pointer-events: none;"));
}

#[test]
fn test_full_page() {
    let (doc, id) = document_with_button();
    let options = CompileOptions {
        document: true,
        title: "Buttons".to_string(),
        ..Default::default()
    };
    let html = compile_to_html(&[doc.instance(id).unwrap()], &options).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>\n<html>\n"));
    assert!(html.contains("    <title>Buttons</title>\n"));
    assert!(html.contains("    <button class=\"custom-btn\""));
    assert!(html.ends_with("</body>\n</html>\n"));
}

#[test]
fn test_compile_document_selects_instances() {
    let (mut doc, first) = document_with_button();
    let cta = doc.insert(CTA_BUTTON, None).unwrap();
    doc.run_pending();

    let all = compile_document(&doc, &[], &compact()).unwrap();
    assert!(all.contains("<button"));
    assert!(all.contains("<a class=\"custom-cta\""));

    let only_cta = compile_document(&doc, &[cta], &compact()).unwrap();
    assert!(!only_cta.contains("<button"));

    doc.remove(first).unwrap();
    let err = compile_document(&doc, &[first], &compact()).unwrap_err();
    assert_eq!(err, CompileError::Editor(EditorError::UnknownInstance(first)));
}

#[test]
fn test_nested_elements_indent() {
    let node = VNode::element("div")
        .with_child(VNode::element("span").with_child(VNode::text("a < b")))
        .with_child(VNode::element("br"));

    let html = compile_vnode(&node, &CompileOptions::default()).unwrap();
    assert_eq!(html, "<div>\n  <span>a &lt; b</span>\n  <br />\n</div>\n");
}

#[test]
fn test_style_attribute_merged_with_styles() {
    let node = VNode::element("p")
        .with_attr("style", "margin: 0; color: red")
        .with_style("color", "blue");

    let html = compile_vnode(&node, &compact()).unwrap();
    assert_eq!(html, r#"<p style="margin: 0; color: blue;"></p>"#);
}

#[test]
fn test_invalid_names_rejected() {
    let err = compile_vnode(&VNode::element("bad tag"), &compact()).unwrap_err();
    assert_eq!(err, CompileError::InvalidTagName("bad tag".to_string()));

    let node = VNode::element("div").with_attr("on\"click", "x");
    let err = compile_vnode(&node, &compact()).unwrap_err();
    assert!(matches!(err, CompileError::InvalidAttributeName { .. }));
}

#[test]
fn test_options_from_config_json() {
    let options: CompileOptions = serde_json::from_str(r#"{ "document": true }"#).unwrap();
    assert!(options.document);
    assert!(options.pretty);
    assert_eq!(options.indent, "  ");
}
