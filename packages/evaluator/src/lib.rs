//! # PageKit Evaluator
//!
//! Pure functions from a [`TraitSnapshot`](pagekit_common::TraitSnapshot) to
//! what a button displays: its inline style, inner markup, attributes and
//! the sanitized icon embedded in it. Nothing here holds state between calls.

pub mod attribute_sync;
pub mod content_composer;
pub mod error;
pub mod style_resolver;
pub mod svg_sanitizer;
pub mod vdom;

pub use attribute_sync::AttributeSync;
pub use content_composer::{Composition, ContentComposer, LayoutMode};
pub use error::{SanitizeError, SanitizeResult};
pub use style_resolver::{preset_colors, preset_size, StyleMap, StyleResolver};
pub use svg_sanitizer::{try_sanitize, SvgSanitizer, CURRENT_COLOR};
pub use vdom::{AttributeMap, VNode};
