use crate::traits::{TraitKey, ValueKind};
use thiserror::Error;

/// Errors raised by the trait model when a host hands it something it cannot store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommonError {
    #[error("Unknown trait: {0}")]
    UnknownTrait(String),

    #[error("Invalid value for trait '{key}': expected {expected}, found {found}")]
    InvalidTraitValue {
        key: TraitKey,
        expected: ValueKind,
        found: String,
    },

    #[error("Generic error: {0}")]
    Generic(String),
}

impl CommonError {
    pub fn invalid_value(key: TraitKey, found: impl Into<String>) -> Self {
        Self::InvalidTraitValue {
            key,
            expected: key.kind(),
            found: found.into(),
        }
    }
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Generic(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Generic(s.to_string())
    }
}

/// Result type for trait model operations
pub type CommonResult<T> = Result<T, CommonError>;
