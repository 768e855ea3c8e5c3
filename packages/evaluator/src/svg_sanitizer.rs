//! Normalizes author-supplied icon markup for embedding inside a button.

use crate::error::{SanitizeError, SanitizeResult};
use pagekit_common::{Diagnostic, DiagnosticSink};
use pagekit_parser::{parse_fragment, serialize, Element, StyleDeclarations};
use tracing::debug;

/// Sentinel meaning "paint with the inherited text color"
pub const CURRENT_COLOR: &str = "currentColor";

/// Descendant shapes whose `fill`/`stroke` sentinels are substituted
const SHAPE_ELEMENTS: [&str; 5] = ["path", "circle", "rect", "polygon", "line"];

const ROOT_LAYOUT: [(&str, &str); 3] = [
    ("display", "inline-block"),
    ("vertical-align", "middle"),
    ("flex-shrink", "0"),
];

/// Sanitizer that reports rejected markup to a diagnostic sink
pub struct SvgSanitizer<'a> {
    sink: &'a dyn DiagnosticSink,
}

impl<'a> SvgSanitizer<'a> {
    pub fn new(sink: &'a dyn DiagnosticSink) -> Self {
        Self { sink }
    }

    /// Sanitize `raw`, returning an empty string when it is rejected.
    ///
    /// Never fails: rejections are reported to the sink instead.
    pub fn sanitize(&self, raw: &str, size: Option<i64>, color: Option<&str>) -> String {
        match try_sanitize(raw, size, color) {
            Ok(markup) => markup,
            Err(err) => {
                debug!(code = %err.code(), "Rejected icon markup");
                self.sink.report(Diagnostic::warning(err.code(), err.to_string()));
                String::new()
            }
        }
    }
}

/// Fallible core of [`SvgSanitizer::sanitize`]
pub fn try_sanitize(raw: &str, size: Option<i64>, color: Option<&str>) -> SanitizeResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SanitizeError::Empty);
    }
    if !starts_with_svg_tag(trimmed) {
        return Err(SanitizeError::MissingRootTag);
    }

    let fragment = parse_fragment(trimmed)?;
    let mut root = fragment
        .find_first(|el| el.is_named("svg"))
        .cloned()
        .ok_or(SanitizeError::NoRootElement)?;
    root.name = "svg".to_string();

    if let Some(size) = size.filter(|s| *s > 0) {
        let size = size.to_string();
        root.set_attr("width", size.clone());
        root.set_attr("height", size);
    }

    let mut style = StyleDeclarations::parse(root.attr("style").unwrap_or_default());

    if let Some(color) = color.filter(|c| !c.trim().is_empty()) {
        apply_color(&mut root, &mut style, color);
    }

    for (prop, value) in ROOT_LAYOUT {
        style.set(prop, value);
    }
    root.set_attr("style", style.to_css_text());

    Ok(serialize(&root))
}

fn starts_with_svg_tag(markup: &str) -> bool {
    markup
        .get(..4)
        .is_some_and(|head| head.eq_ignore_ascii_case("<svg"))
}

fn apply_color(root: &mut Element, style: &mut StyleDeclarations, color: &str) {
    style.set("color", color);

    let fill_inherits = match root.attr("fill") {
        None => true,
        Some(fill) => fill == CURRENT_COLOR || fill == "none",
    };
    if fill_inherits {
        root.set_attr("fill", color);
    }
    if root.attr("stroke") == Some(CURRENT_COLOR) {
        root.set_attr("stroke", color);
    }

    root.visit_descendants_mut(&mut |el| {
        if !SHAPE_ELEMENTS.iter().any(|shape| el.is_named(shape)) {
            return;
        }
        for paint in ["fill", "stroke"] {
            if el.attr(paint) == Some(CURRENT_COLOR) {
                el.set_attr(paint, color);
            }
        }
    });
}
