//! # PageKit Editor
//!
//! Reactive engine behind the button component types.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: DefineComponentType, palette, canvas  │
//! └─────────────────────────────────────────────┘
//!                     ↓ set_trait / gestures
//! ┌─────────────────────────────────────────────┐
//! │ editor: TraitStore → ChangeRouter           │
//! │  - one writer path per instance             │
//! │  - synchronous, guarded recompute groups    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ evaluator: style, markup, attributes → VDOM │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagekit_editor::{install, Document, PluginOptions, CUSTOM_BUTTON};
//! use pagekit_common::TraitKey;
//!
//! let mut doc = Document::new();
//! install(&mut doc, &PluginOptions::default())?;
//!
//! let id = doc.insert(CUSTOM_BUTTON, None)?;
//! doc.run_pending();
//!
//! doc.set_trait(id, TraitKey::StylePreset, "danger")?;
//! let vnode = doc.render(id)?;
//! ```

pub mod change_router;
pub mod document;
pub mod errors;
pub mod inline_edit;
pub mod instance;
pub mod plugin;
pub mod registry;
pub mod trait_store;

pub use change_router::{
    default_recomputes, groups_for, AttributeRecompute, ChangeRouter, ContentRecompute, GroupGuards,
    GuardState, Recompute, RecomputeContext, RecomputeGroup, RecomputeGuard, StyleRecompute,
};
pub use document::Document;
pub use errors::{EditorError, EditorResult, RecomputeError};
pub use inline_edit::{Gesture, Prompt, EDIT_HINT_TITLE, EDIT_PROMPT};
pub use instance::{ComponentInstance, InstanceId, Lifecycle, RenderOutput};
pub use plugin::{cta_button_type, custom_button_type, install, PluginOptions, CTA_BUTTON, CUSTOM_BUTTON};
pub use registry::{
    ComponentTypeDef, HostEditor, ModelSpec, PaletteEntry, SelectOption, TraitDef, ViewSpec, Widget,
};
pub use trait_store::{TraitChange, TraitStore};

// Re-export common types for convenience
pub use pagekit_common::{TraitKey, TraitSnapshot, TraitValue};
pub use pagekit_evaluator::VNode;
