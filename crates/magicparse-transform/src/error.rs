//! Per-value transform failures.

use thiserror::Error;

/// A transform rejected a value.
///
/// Carries only the message; the field that ran the transform adds the key
/// and position when it turns this into a field error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransformError {
    message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for transform application.
pub type Result<T> = std::result::Result<T, TransformError>;
