//! # PageKit Common
//!
//! Trait model shared by every PageKit crate: the enumerated [`TraitKey`],
//! widget-facing [`TraitValue`], the per-instance [`TraitSnapshot`] and the
//! structured diagnostics the engine reports instead of raising.

pub mod diagnostic;
pub mod error;
pub mod snapshot;
pub mod traits;

pub use diagnostic::{
    CollectingSink, Diagnostic, DiagnosticCode, DiagnosticLevel, DiagnosticSink, NullSink,
    TracingSink,
};
pub use error::{CommonError, CommonResult};
pub use snapshot::{
    ButtonType, IconPosition, IconType, SizePreset, StylePreset, TraitSnapshot, DEFAULT_ICON_SIZE,
    DEFAULT_TEXT, ICON_SIZE_MAX, ICON_SIZE_MIN,
};
pub use traits::{TraitKey, TraitValue, ValueKind};
