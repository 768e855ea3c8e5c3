//! Single writer path for an instance's trait values

use crate::errors::EditorResult;
use pagekit_common::{CommonError, TraitKey, TraitSnapshot, TraitValue};
use serde::Serialize;

/// Notification produced by every committed write
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraitChange {
    pub key: TraitKey,
    pub previous: TraitValue,
    pub current: TraitValue,
    /// Store version after the write
    pub version: u64,
}

impl TraitChange {
    /// Whether the write left the value as it was
    pub fn is_noop(&self) -> bool {
        self.previous == self.current
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraitStore {
    snapshot: TraitSnapshot,
    version: u64,
}

impl TraitStore {
    pub fn new(snapshot: TraitSnapshot) -> Self {
        Self {
            snapshot,
            version: 0,
        }
    }

    pub fn get(&self, key: TraitKey) -> TraitValue {
        self.snapshot.get(key)
    }

    /// Coerce and commit `value`, then return the change.
    ///
    /// A value equal to the current one still commits and bumps the version.
    /// On error nothing is written.
    pub fn set(&mut self, key: TraitKey, value: impl Into<TraitValue>) -> EditorResult<TraitChange> {
        let previous = self.snapshot.get(key);
        self.snapshot.set(key, value.into())?;
        self.version += 1;

        Ok(TraitChange {
            key,
            previous,
            current: self.snapshot.get(key),
            version: self.version,
        })
    }

    /// [`set`](Self::set) addressed by wire name (`"button-text"`)
    pub fn set_by_name(&mut self, name: &str, value: impl Into<TraitValue>) -> EditorResult<TraitChange> {
        let key = TraitKey::from_name(name).ok_or_else(|| CommonError::UnknownTrait(name.to_string()))?;
        self.set(key, value)
    }

    /// Full copy of the current values
    pub fn snapshot(&self) -> TraitSnapshot {
        self.snapshot.clone()
    }

    pub fn current(&self) -> &TraitSnapshot {
        &self.snapshot
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
