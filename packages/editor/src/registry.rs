//! Contracts between the engine and the host editor that embeds it

use crate::change_router::{default_recomputes, ChangeRouter, Recompute};
use crate::errors::EditorResult;
use crate::inline_edit::Gesture;
use pagekit_common::{TraitKey, TraitSnapshot};
use pagekit_evaluator::AttributeMap;
use serde::Serialize;
use std::rc::Rc;

/// Operations a host editor exposes to plugins
pub trait HostEditor {
    fn define_component_type(&mut self, def: ComponentTypeDef) -> EditorResult<()>;

    fn register_palette_entry(&mut self, entry: PaletteEntry) -> EditorResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Editing widget the host shows for a trait
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Widget {
    Text,
    Textarea,
    Select {
        options: Vec<SelectOption>,
    },
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    Color,
    Checkbox,
}

impl Widget {
    pub fn select<'a>(options: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Widget::Select {
            options: options
                .into_iter()
                .map(|(id, label)| SelectOption::new(id, label))
                .collect(),
        }
    }

    pub fn number() -> Self {
        Widget::Number {
            min: None,
            max: None,
        }
    }

    pub fn number_in(min: i64, max: i64) -> Self {
        Widget::Number {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// An editable trait as declared to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraitDef {
    #[serde(rename = "name")]
    pub key: TraitKey,
    pub label: String,
    pub widget: Widget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl TraitDef {
    pub fn new(key: TraitKey, label: impl Into<String>, widget: Widget) -> Self {
        Self {
            key,
            label: label.into(),
            widget,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpec {
    pub tag_name: String,
    pub classes: Vec<String>,
    pub base_attributes: AttributeMap,
    pub defaults: TraitSnapshot,
    pub traits: Vec<TraitDef>,
    #[serde(skip)]
    pub recomputes: Vec<Rc<dyn Recompute>>,
}

impl ModelSpec {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            classes: Vec::new(),
            base_attributes: AttributeMap::new(),
            defaults: TraitSnapshot::default(),
            traits: Vec::new(),
            recomputes: default_recomputes(),
        }
    }

    pub fn declares(&self, key: TraitKey) -> bool {
        self.traits.iter().any(|t| t.key == key)
    }

    /// Router wired to this model's recompute functions
    pub fn router(&self) -> ChangeRouter {
        ChangeRouter::new(self.recomputes.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSpec {
    pub edit_gesture: Gesture,
    pub prompt_message: String,
    /// Attributes added to the element on the editing canvas only
    pub hint_attributes: AttributeMap,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTypeDef {
    pub type_name: String,
    pub model: ModelSpec,
    pub view: ViewSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub type_name: String,
    pub label: String,
    pub preview_markup: String,
    pub category: String,
}
