//! # Change routing
//!
//! Every committed trait write is mapped to the recompute groups that depend
//! on it, and each group's recompute functions run synchronously before the
//! write returns.
//!
//! ## Re-entrancy
//!
//! A recompute may itself write traits (through [`RecomputeContext::set_trait`]).
//! Those writes are routed like any other, except that a group already in
//! flight for the same instance is skipped. Each instance carries a
//! [`GroupGuards`] table; acquiring a group yields a [`RecomputeGuard`] that
//! puts the group back to idle when dropped, on every exit path.

use crate::errors::{EditorResult, RecomputeError};
use crate::instance::RenderOutput;
use crate::trait_store::{TraitChange, TraitStore};
use pagekit_common::{Diagnostic, DiagnosticCode, DiagnosticSink, TraitKey, TraitSnapshot, TraitValue};
use pagekit_evaluator::{AttributeSync, ContentComposer, StyleResolver};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Derived output a recompute function owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecomputeGroup {
    Style,
    Content,
    Attributes,
}

impl RecomputeGroup {
    pub const ALL: [RecomputeGroup; 3] = [
        RecomputeGroup::Style,
        RecomputeGroup::Content,
        RecomputeGroup::Attributes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecomputeGroup::Style => "style",
            RecomputeGroup::Content => "content",
            RecomputeGroup::Attributes => "attributes",
        }
    }

    fn index(self) -> usize {
        match self {
            RecomputeGroup::Style => 0,
            RecomputeGroup::Content => 1,
            RecomputeGroup::Attributes => 2,
        }
    }
}

impl fmt::Display for RecomputeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Groups that must be recomputed when `key` changes
pub fn groups_for(key: TraitKey) -> &'static [RecomputeGroup] {
    match key {
        TraitKey::StylePreset
        | TraitKey::CustomBgColor
        | TraitKey::CustomTextColor
        | TraitKey::SizePreset
        | TraitKey::CustomPadding
        | TraitKey::CustomFontSize
        | TraitKey::BorderRadius => &[RecomputeGroup::Style],
        TraitKey::Disabled => &[RecomputeGroup::Style, RecomputeGroup::Attributes],
        TraitKey::ButtonType | TraitKey::OnClick | TraitKey::Href => &[RecomputeGroup::Attributes],
        TraitKey::Text
        | TraitKey::IconType
        | TraitKey::SvgCode
        | TraitKey::IconPosition
        | TraitKey::IconSize
        | TraitKey::IconColor => &[RecomputeGroup::Content],
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Idle,
    Recomputing,
}

/// Per-instance, per-group re-entrancy state
#[derive(Debug, Default)]
pub struct GroupGuards {
    states: [Cell<GuardState>; 3],
}

impl GroupGuards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, group: RecomputeGroup) -> GuardState {
        self.states[group.index()].get()
    }

    pub fn all_idle(&self) -> bool {
        self.states.iter().all(|s| s.get() == GuardState::Idle)
    }

    /// Mark `group` busy, or `None` if it already is
    pub fn try_acquire(&self, group: RecomputeGroup) -> Option<RecomputeGuard<'_>> {
        let state = &self.states[group.index()];
        if state.get() == GuardState::Recomputing {
            return None;
        }
        state.set(GuardState::Recomputing);
        Some(RecomputeGuard { state, group })
    }
}

/// Holds a group busy until dropped
#[derive(Debug)]
pub struct RecomputeGuard<'a> {
    state: &'a Cell<GuardState>,
    group: RecomputeGroup,
}

impl RecomputeGuard<'_> {
    pub fn group(&self) -> RecomputeGroup {
        self.group
    }
}

impl Drop for RecomputeGuard<'_> {
    fn drop(&mut self) {
        self.state.set(GuardState::Idle);
    }
}

/// A function recomputing one group of derived output
pub trait Recompute: fmt::Debug {
    fn group(&self) -> RecomputeGroup;

    fn name(&self) -> &'static str;

    fn recompute(&self, cx: &mut RecomputeContext<'_>) -> Result<(), RecomputeError>;
}

/// What a recompute function sees while it runs
pub struct RecomputeContext<'a> {
    store: &'a mut TraitStore,
    output: &'a mut RenderOutput,
    router: &'a ChangeRouter,
    guards: &'a GroupGuards,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> RecomputeContext<'a> {
    /// Current values, including the write that triggered this recompute
    pub fn snapshot(&self) -> &TraitSnapshot {
        self.store.current()
    }

    pub fn output(&self) -> &RenderOutput {
        &*self.output
    }

    pub fn output_mut(&mut self) -> &mut RenderOutput {
        &mut *self.output
    }

    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink
    }

    /// Write through the store and route the change right away
    pub fn set_trait(&mut self, key: TraitKey, value: impl Into<TraitValue>) -> EditorResult<TraitChange> {
        let change = self.store.set(key, value)?;
        self.router
            .dispatch(&change, &mut *self.store, &mut *self.output, self.guards, self.sink);
        Ok(change)
    }
}

/// Resolves the inline style; keeps the layout declarations on top
#[derive(Debug, Default)]
pub struct StyleRecompute;

impl Recompute for StyleRecompute {
    fn group(&self) -> RecomputeGroup {
        RecomputeGroup::Style
    }

    fn name(&self) -> &'static str {
        "style"
    }

    fn recompute(&self, cx: &mut RecomputeContext<'_>) -> Result<(), RecomputeError> {
        let resolved = StyleResolver::resolve(cx.snapshot());
        cx.output_mut().set_resolved_style(resolved);
        Ok(())
    }
}

/// Composes inner markup and switches the layout mode
#[derive(Debug, Default)]
pub struct ContentRecompute;

impl Recompute for ContentRecompute {
    fn group(&self) -> RecomputeGroup {
        RecomputeGroup::Content
    }

    fn name(&self) -> &'static str {
        "content"
    }

    fn recompute(&self, cx: &mut RecomputeContext<'_>) -> Result<(), RecomputeError> {
        let composition = ContentComposer::new(cx.sink()).compose(cx.snapshot());
        let resolved = StyleResolver::resolve(cx.snapshot());

        let output = cx.output_mut();
        output.markup = composition.markup;
        output.layout = composition.layout;
        output.set_resolved_style(resolved);
        Ok(())
    }
}

/// Merges trait-driven attributes into the element
#[derive(Debug, Default)]
pub struct AttributeRecompute;

impl Recompute for AttributeRecompute {
    fn group(&self) -> RecomputeGroup {
        RecomputeGroup::Attributes
    }

    fn name(&self) -> &'static str {
        "attributes"
    }

    fn recompute(&self, cx: &mut RecomputeContext<'_>) -> Result<(), RecomputeError> {
        let snapshot = cx.snapshot().clone();
        let RenderOutput {
            attributes,
            base_attributes,
            ..
        } = cx.output_mut();
        AttributeSync::apply(&snapshot, base_attributes, attributes);
        Ok(())
    }
}

pub fn default_recomputes() -> Vec<Rc<dyn Recompute>> {
    vec![
        Rc::new(StyleRecompute),
        Rc::new(ContentRecompute),
        Rc::new(AttributeRecompute),
    ]
}

/// Routes trait changes to recompute functions. Shared by every instance
/// of a component type; the per-instance state is passed in.
#[derive(Debug)]
pub struct ChangeRouter {
    recomputes: Vec<Rc<dyn Recompute>>,
}

impl ChangeRouter {
    pub fn new(recomputes: Vec<Rc<dyn Recompute>>) -> Self {
        Self { recomputes }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_recomputes())
    }

    pub fn recomputes(&self, group: RecomputeGroup) -> impl Iterator<Item = &Rc<dyn Recompute>> {
        self.recomputes.iter().filter(move |r| r.group() == group)
    }

    /// Run the groups subscribed to `change.key`
    pub fn dispatch(
        &self,
        change: &TraitChange,
        store: &mut TraitStore,
        output: &mut RenderOutput,
        guards: &GroupGuards,
        sink: &dyn DiagnosticSink,
    ) {
        debug!(trait_key = %change.key, version = change.version, "Routing trait change");
        self.run_groups(groups_for(change.key), store, output, guards, sink);
    }

    /// Run every group once (first render)
    pub fn run_all(
        &self,
        store: &mut TraitStore,
        output: &mut RenderOutput,
        guards: &GroupGuards,
        sink: &dyn DiagnosticSink,
    ) {
        self.run_groups(&RecomputeGroup::ALL, store, output, guards, sink);
    }

    pub fn run_groups(
        &self,
        groups: &[RecomputeGroup],
        store: &mut TraitStore,
        output: &mut RenderOutput,
        guards: &GroupGuards,
        sink: &dyn DiagnosticSink,
    ) {
        for &group in groups {
            let Some(_guard) = guards.try_acquire(group) else {
                trace!(group = %group, "Recompute already in flight, skipping");
                continue;
            };

            for recompute in self.recomputes(group) {
                let mut cx = RecomputeContext {
                    store: &mut *store,
                    output: &mut *output,
                    router: self,
                    guards,
                    sink,
                };
                if let Err(err) = recompute.recompute(&mut cx) {
                    sink.report(Diagnostic::error(
                        DiagnosticCode::RecomputeFailed,
                        format!("{} recompute failed: {}", recompute.name(), err),
                    ));
                }
            }
        }
    }
}

impl Default for ChangeRouter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_common::{CollectingSink, NullSink};
    use std::cell::RefCell;

    #[test]
    fn test_groups_for_disabled_hits_style_and_attributes() {
        assert_eq!(
            groups_for(TraitKey::Disabled),
            &[RecomputeGroup::Style, RecomputeGroup::Attributes]
        );
        assert_eq!(groups_for(TraitKey::IconColor), &[RecomputeGroup::Content]);
        assert_eq!(groups_for(TraitKey::Href), &[RecomputeGroup::Attributes]);
    }

    #[test]
    fn test_every_key_routes_somewhere() {
        for key in TraitKey::ALL {
            assert!(!groups_for(key).is_empty(), "{} has no group", key);
        }
    }

    #[test]
    fn test_guard_released_on_drop() {
        let guards = GroupGuards::new();
        {
            let guard = guards.try_acquire(RecomputeGroup::Content).unwrap();
            assert_eq!(guard.group(), RecomputeGroup::Content);
            assert!(guards.try_acquire(RecomputeGroup::Content).is_none());
            // Other groups are independent
            assert!(guards.try_acquire(RecomputeGroup::Style).is_some());
        }
        assert!(guards.all_idle());
    }

    #[test]
    fn test_guard_released_on_unwind() {
        let guards = GroupGuards::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = guards.try_acquire(RecomputeGroup::Style).unwrap();
            panic!("recompute blew up");
        }));
        assert!(result.is_err());
        assert_eq!(guards.state(RecomputeGroup::Style), GuardState::Idle);
    }

    /// Writes the text trait from inside the content group
    #[derive(Debug)]
    struct Echo {
        runs: RefCell<u32>,
    }

    impl Recompute for Echo {
        fn group(&self) -> RecomputeGroup {
            RecomputeGroup::Content
        }

        fn name(&self) -> &'static str {
            "echo"
        }

        fn recompute(&self, cx: &mut RecomputeContext<'_>) -> Result<(), RecomputeError> {
            *self.runs.borrow_mut() += 1;
            let text = format!("{}!", cx.snapshot().text);
            cx.set_trait(TraitKey::Text, text)?;
            Ok(())
        }
    }

    #[test]
    fn test_write_from_own_group_is_suppressed() {
        let echo = Rc::new(Echo {
            runs: RefCell::new(0),
        });
        let router = ChangeRouter::new(vec![echo.clone()]);
        let mut store = TraitStore::default();
        let mut output = RenderOutput::default();
        let guards = GroupGuards::new();

        let change = store.set(TraitKey::Text, "Hi").unwrap();
        router.dispatch(&change, &mut store, &mut output, &guards, &NullSink);

        assert_eq!(*echo.runs.borrow(), 1);
        assert_eq!(store.current().text, "Hi!");
        assert!(guards.all_idle());
    }

    #[derive(Debug)]
    struct Failing;

    impl Recompute for Failing {
        fn group(&self) -> RecomputeGroup {
            RecomputeGroup::Style
        }

        fn name(&self) -> &'static str {
            "failing"
        }

        fn recompute(&self, _cx: &mut RecomputeContext<'_>) -> Result<(), RecomputeError> {
            Err(RecomputeError::Failed("boom".to_string()))
        }
    }

    #[test]
    fn test_failure_becomes_diagnostic_and_dispatch_continues() {
        let router = ChangeRouter::new(vec![Rc::new(Failing), Rc::new(AttributeRecompute)]);
        let sink = CollectingSink::new();
        let mut store = TraitStore::default();
        let mut output = RenderOutput::default();
        let guards = GroupGuards::new();

        let change = store.set(TraitKey::Disabled, true).unwrap();
        router.dispatch(&change, &mut store, &mut output, &guards, &sink);

        assert_eq!(sink.codes(), vec![DiagnosticCode::RecomputeFailed]);
        assert!(output.attributes.contains_key("disabled"));
        assert!(guards.all_idle());
    }
}
