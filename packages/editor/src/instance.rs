//! A placed component: its traits and everything derived from them

use crate::change_router::{ChangeRouter, GroupGuards};
use crate::errors::EditorResult;
use crate::registry::{ComponentTypeDef, ViewSpec};
use crate::trait_store::{TraitChange, TraitStore};
use pagekit_common::{DiagnosticSink, TraitKey, TraitSnapshot, TraitValue};
use pagekit_evaluator::{AttributeMap, LayoutMode, StyleMap, VNode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    /// Created; first render not yet run. Writes commit without routing.
    Pending,
    Live,
}

/// Derived presentation of one instance
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderOutput {
    pub style: StyleMap,
    pub markup: String,
    pub attributes: AttributeMap,
    pub layout: LayoutMode,
    /// The component type's own attributes; trait-owned entries fall back here
    #[serde(skip)]
    pub base_attributes: AttributeMap,
}

impl RenderOutput {
    pub fn with_attributes(attributes: AttributeMap) -> Self {
        Self {
            base_attributes: attributes.clone(),
            attributes,
            ..Default::default()
        }
    }

    /// Replace the style with `resolved` plus the current layout declarations
    pub fn set_resolved_style(&mut self, mut resolved: StyleMap) {
        self.layout.apply_to(&mut resolved);
        self.style = resolved;
    }
}

pub struct ComponentInstance {
    id: InstanceId,
    type_name: String,
    tag_name: String,
    classes: Vec<String>,
    store: TraitStore,
    output: RenderOutput,
    guards: GroupGuards,
    router: Rc<ChangeRouter>,
    view: ViewSpec,
    lifecycle: Lifecycle,
    sink: Rc<dyn DiagnosticSink>,
}

impl ComponentInstance {
    pub fn new(
        id: InstanceId,
        def: &ComponentTypeDef,
        router: Rc<ChangeRouter>,
        snapshot: TraitSnapshot,
        sink: Rc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            id,
            type_name: def.type_name.clone(),
            tag_name: def.model.tag_name.clone(),
            classes: def.model.classes.clone(),
            store: TraitStore::new(snapshot),
            output: RenderOutput::with_attributes(def.model.base_attributes.clone()),
            guards: GroupGuards::new(),
            router,
            view: def.view.clone(),
            lifecycle: Lifecycle::Pending,
            sink,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_live(&self) -> bool {
        self.lifecycle == Lifecycle::Live
    }

    pub fn view(&self) -> &ViewSpec {
        &self.view
    }

    pub fn store(&self) -> &TraitStore {
        &self.store
    }

    pub fn snapshot(&self) -> &TraitSnapshot {
        self.store.current()
    }

    pub fn output(&self) -> &RenderOutput {
        &self.output
    }

    pub fn guards(&self) -> &GroupGuards {
        &self.guards
    }

    pub fn get_trait(&self, key: TraitKey) -> TraitValue {
        self.store.get(key)
    }

    /// First render: run every group on the full snapshot.
    ///
    /// Returns `false` if the instance was already live.
    pub fn initialize(&mut self) -> bool {
        if self.is_live() {
            return false;
        }
        self.lifecycle = Lifecycle::Live;
        debug!(instance = %self.id, type_name = %self.type_name, "Initial render");
        self.router
            .run_all(&mut self.store, &mut self.output, &self.guards, self.sink.as_ref());
        true
    }

    /// Commit a trait write and, once live, recompute what depends on it
    pub fn set_trait(&mut self, key: TraitKey, value: impl Into<TraitValue>) -> EditorResult<TraitChange> {
        let change = self.store.set(key, value)?;
        if self.is_live() {
            self.router.dispatch(
                &change,
                &mut self.store,
                &mut self.output,
                &self.guards,
                self.sink.as_ref(),
            );
        }
        Ok(change)
    }

    pub fn set_trait_by_name(&mut self, name: &str, value: impl Into<TraitValue>) -> EditorResult<TraitChange> {
        let key: TraitKey = name.parse()?;
        self.set_trait(key, value)
    }

    fn class_list(&self) -> String {
        self.classes.join(" ")
    }

    /// The produced element: tag, class, synced attributes, inline style and
    /// composed markup
    pub fn to_vnode(&self) -> VNode {
        let mut node = VNode::element(&self.tag_name);
        if !self.classes.is_empty() {
            node = node.with_attr("class", self.class_list());
        }
        node.with_attrs(&self.output.attributes)
            .with_styles(&self.output.style)
            .with_child(VNode::raw(&self.output.markup))
    }

    /// [`to_vnode`](Self::to_vnode) plus the editing hints shown on canvas
    pub fn to_editor_vnode(&self) -> VNode {
        self.to_vnode().with_attrs(&self.view.hint_attributes)
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .field("lifecycle", &self.lifecycle)
            .field("version", &self.store.version())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::custom_button_type;
    use pagekit_common::NullSink;

    fn instance() -> ComponentInstance {
        let def = custom_button_type();
        let snapshot = def.model.defaults.clone();
        ComponentInstance::new(
            InstanceId(1),
            &def,
            Rc::new(ChangeRouter::with_defaults()),
            snapshot,
            Rc::new(NullSink),
        )
    }

    #[test]
    fn test_pending_writes_commit_without_rendering() {
        let mut inst = instance();
        inst.set_trait(TraitKey::Text, "Early").unwrap();

        assert_eq!(inst.lifecycle(), Lifecycle::Pending);
        assert_eq!(inst.snapshot().text, "Early");
        assert!(inst.output().markup.is_empty());
        assert!(inst.output().style.is_empty());
    }

    #[test]
    fn test_initialize_renders_full_snapshot_once() {
        let mut inst = instance();
        inst.set_trait(TraitKey::Text, "Early").unwrap();

        assert!(inst.initialize());
        assert!(!inst.initialize());
        assert_eq!(inst.output().markup, "Early");
        assert_eq!(inst.output().style.get("display"), Some("inline-block"));
        assert_eq!(inst.output().attributes.get("type").map(String::as_str), Some("button"));
    }

    #[test]
    fn test_to_vnode_shape() {
        let mut inst = instance();
        inst.initialize();

        let node = inst.to_vnode();
        assert_eq!(node.tag(), Some("button"));
        assert_eq!(node.attr("class"), Some("custom-btn"));
        assert_eq!(node.attr("data-editable"), None);

        let editor_node = inst.to_editor_vnode();
        assert_eq!(editor_node.attr("data-editable"), Some("true"));
    }
}
