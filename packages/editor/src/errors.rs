//! Error types for the editor

use crate::instance::InstanceId;
use pagekit_common::CommonError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error(transparent)]
    Trait(#[from] CommonError),

    #[error("Unknown component type '{0}'")]
    UnknownComponentType(String),

    #[error("Component type '{0}' is already defined")]
    DuplicateComponentType(String),

    #[error("No component instance with id {0}")]
    UnknownInstance(InstanceId),
}

/// Failure reported by a recompute function
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecomputeError {
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

impl From<CommonError> for RecomputeError {
    fn from(e: CommonError) -> Self {
        RecomputeError::Editor(EditorError::Trait(e))
    }
}

pub type EditorResult<T> = Result<T, EditorError>;
