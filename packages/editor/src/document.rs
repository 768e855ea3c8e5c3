//! Host-side container for component types and placed instances

use crate::change_router::ChangeRouter;
use crate::errors::{EditorError, EditorResult};
use crate::inline_edit::{Gesture, Prompt};
use crate::instance::{ComponentInstance, InstanceId};
use crate::registry::{ComponentTypeDef, HostEditor, PaletteEntry};
use crate::trait_store::TraitChange;
use indexmap::IndexMap;
use pagekit_common::{DiagnosticSink, TraitKey, TraitSnapshot, TraitValue, TracingSink};
use pagekit_evaluator::VNode;
use std::rc::Rc;
use tracing::{debug, info};

struct RegisteredType {
    def: ComponentTypeDef,
    router: Rc<ChangeRouter>,
}

/// Holds registered component types, the palette and every live instance.
///
/// Inserting an instance only schedules its first render; the next call to
/// [`run_pending`](Document::run_pending) performs it, the way a host editor
/// defers initial rendering to its next turn.
pub struct Document {
    types: IndexMap<String, RegisteredType>,
    palette: Vec<PaletteEntry>,
    instances: IndexMap<InstanceId, ComponentInstance>,
    pending: Vec<InstanceId>,
    next_id: u64,
    sink: Rc<dyn DiagnosticSink>,
}

impl Document {
    pub fn new() -> Self {
        Self::with_sink(Rc::new(TracingSink))
    }

    pub fn with_sink(sink: Rc<dyn DiagnosticSink>) -> Self {
        Self {
            types: IndexMap::new(),
            palette: Vec::new(),
            instances: IndexMap::new(),
            pending: Vec::new(),
            next_id: 1,
            sink,
        }
    }

    pub fn component_type(&self, type_name: &str) -> Option<&ComponentTypeDef> {
        self.types.get(type_name).map(|t| &t.def)
    }

    pub fn component_types(&self) -> impl Iterator<Item = &ComponentTypeDef> {
        self.types.values().map(|t| &t.def)
    }

    pub fn palette(&self) -> &[PaletteEntry] {
        &self.palette
    }

    /// Create an instance of `type_name` from the type's defaults, or from a
    /// persisted snapshot when restoring
    pub fn insert(&mut self, type_name: &str, restore: Option<TraitSnapshot>) -> EditorResult<InstanceId> {
        let registered = self
            .types
            .get(type_name)
            .ok_or_else(|| EditorError::UnknownComponentType(type_name.to_string()))?;

        let snapshot = restore.unwrap_or_else(|| registered.def.model.defaults.clone());
        let id = InstanceId(self.next_id);
        self.next_id += 1;

        let instance = ComponentInstance::new(
            id,
            &registered.def,
            registered.router.clone(),
            snapshot,
            self.sink.clone(),
        );
        self.instances.insert(id, instance);
        self.pending.push(id);

        debug!(instance = %id, type_name, "Instance inserted");
        Ok(id)
    }

    /// Insert with the type's defaults overlaid by `traits`.
    ///
    /// Fails without inserting anything if any value is rejected.
    pub fn insert_with<I>(&mut self, type_name: &str, traits: I) -> EditorResult<InstanceId>
    where
        I: IntoIterator<Item = (TraitKey, TraitValue)>,
    {
        let mut snapshot = self
            .component_type(type_name)
            .ok_or_else(|| EditorError::UnknownComponentType(type_name.to_string()))?
            .model
            .defaults
            .clone();
        for (key, value) in traits {
            snapshot.set(key, value)?;
        }
        self.insert(type_name, Some(snapshot))
    }

    /// Run deferred first renders. Returns how many instances went live.
    pub fn run_pending(&mut self) -> usize {
        let mut rendered = 0;
        for id in std::mem::take(&mut self.pending) {
            if let Some(instance) = self.instances.get_mut(&id) {
                if instance.initialize() {
                    rendered += 1;
                }
            }
        }
        rendered
    }

    pub fn instance(&self, id: InstanceId) -> Option<&ComponentInstance> {
        self.instances.get(&id)
    }

    pub fn instances(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.instances.values()
    }

    fn instance_mut(&mut self, id: InstanceId) -> EditorResult<&mut ComponentInstance> {
        self.instances
            .get_mut(&id)
            .ok_or(EditorError::UnknownInstance(id))
    }

    pub fn set_trait(
        &mut self,
        id: InstanceId,
        key: TraitKey,
        value: impl Into<TraitValue>,
    ) -> EditorResult<TraitChange> {
        self.instance_mut(id)?.set_trait(key, value)
    }

    pub fn set_trait_by_name(
        &mut self,
        id: InstanceId,
        name: &str,
        value: impl Into<TraitValue>,
    ) -> EditorResult<TraitChange> {
        self.instance_mut(id)?.set_trait_by_name(name, value)
    }

    pub fn handle_gesture(
        &mut self,
        id: InstanceId,
        gesture: Gesture,
        prompt: &mut dyn Prompt,
    ) -> EditorResult<Option<TraitChange>> {
        self.instance_mut(id)?.handle_gesture(gesture, prompt)
    }

    pub fn render(&self, id: InstanceId) -> EditorResult<VNode> {
        self.instance(id)
            .map(ComponentInstance::to_vnode)
            .ok_or(EditorError::UnknownInstance(id))
    }

    /// Drop an instance together with all of its derived state
    pub fn remove(&mut self, id: InstanceId) -> EditorResult<()> {
        self.instances
            .shift_remove(&id)
            .ok_or(EditorError::UnknownInstance(id))?;
        self.pending.retain(|p| *p != id);
        debug!(instance = %id, "Instance removed");
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEditor for Document {
    fn define_component_type(&mut self, def: ComponentTypeDef) -> EditorResult<()> {
        if self.types.contains_key(&def.type_name) {
            return Err(EditorError::DuplicateComponentType(def.type_name));
        }
        info!(type_name = %def.type_name, traits = def.model.traits.len(), "Component type defined");

        let router = Rc::new(def.model.router());
        self.types
            .insert(def.type_name.clone(), RegisteredType { def, router });
        Ok(())
    }

    fn register_palette_entry(&mut self, entry: PaletteEntry) -> EditorResult<()> {
        if !self.types.contains_key(&entry.type_name) {
            return Err(EditorError::UnknownComponentType(entry.type_name));
        }
        self.palette.push(entry);
        Ok(())
    }
}
