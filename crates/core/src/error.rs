//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Keep this focused on deterministic input failures. Storage concerns belong
/// to the persistence layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required value was absent or blank.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was present but could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// True when the failure is a missing value rather than a malformed one.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
