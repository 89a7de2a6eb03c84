//! Error types for the whereabouts crate.

use thiserror::Error;

/// Errors raised at the typed boundary of the assembler.
///
/// Missing filter values are never errors; they simply produce no predicate.
/// These variants cover values of the wrong semantic type.
#[derive(Debug, Error, PartialEq)]
pub enum ConditionError {
    /// A value cannot be used where the assembler expects a given type.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// A time zone specification is not `local`, `utc` or a `±HH:MM` offset.
    #[error("invalid time zone '{0}': expected local, utc or an offset like +05:30")]
    InvalidZone(String),
}

impl ConditionError {
    /// Create an invalid-argument error.
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for whereabouts operations.
pub type Result<T> = std::result::Result<T, ConditionError>;
