//! Trait snapshot → inner markup and display mode

use crate::style_resolver::StyleMap;
use crate::svg_sanitizer::SvgSanitizer;
use pagekit_common::{DiagnosticSink, IconPosition, TraitSnapshot, DEFAULT_TEXT};
use pagekit_parser::escape_text;
use serde::{Deserialize, Serialize};

/// Display mode the composed markup needs from its host element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Text only
    #[default]
    InlineBlock,
    /// Icon and text laid out side by side
    InlineFlex,
}

impl LayoutMode {
    /// Declarations contributed to the element's inline style. These never
    /// overlap with the properties the style resolver produces.
    pub fn declarations(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            LayoutMode::InlineBlock => &[("display", "inline-block")],
            LayoutMode::InlineFlex => &[
                ("display", "inline-flex"),
                ("align-items", "center"),
                ("justify-content", "center"),
                ("gap", "0px"),
            ],
        }
    }

    pub fn apply_to(&self, style: &mut StyleMap) {
        for (prop, value) in self.declarations() {
            style.set(prop, *value);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub markup: String,
    pub layout: LayoutMode,
}

const ICON_WRAPPER_STYLE: &str = "display: inline-flex; align-items: center; line-height: 0;";

/// Builds the button's inner markup from text and icon traits
pub struct ContentComposer<'a> {
    sanitizer: SvgSanitizer<'a>,
}

impl<'a> ContentComposer<'a> {
    pub fn new(sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            sanitizer: SvgSanitizer::new(sink),
        }
    }

    pub fn compose(&self, snapshot: &TraitSnapshot) -> Composition {
        let text = if snapshot.text.is_empty() {
            DEFAULT_TEXT
        } else {
            snapshot.text.as_str()
        };
        let text = escape_text(text);

        let icon = if snapshot.wants_icon() {
            self.sanitizer.sanitize(
                &snapshot.svg_code,
                Some(snapshot.icon_size),
                snapshot.icon_color.as_deref(),
            )
        } else {
            String::new()
        };

        if icon.is_empty() {
            return Composition {
                markup: text.into_owned(),
                layout: LayoutMode::InlineBlock,
            };
        }

        let markup = match snapshot.icon_position {
            IconPosition::Left => format!(
                r#"<span class="btn-icon" style="margin-right: 8px; {}">{}</span><span class="btn-text">{}</span>"#,
                ICON_WRAPPER_STYLE, icon, text
            ),
            IconPosition::Right => format!(
                r#"<span class="btn-text">{}</span><span class="btn-icon" style="margin-left: 8px; {}">{}</span>"#,
                text, ICON_WRAPPER_STYLE, icon
            ),
        };

        Composition {
            markup,
            layout: LayoutMode::InlineFlex,
        }
    }
}
