//! Domain-specific error types for DEBTSIM.

use crate::types::DebtId;

/// Errors surfaced to the presentation layer.
#[derive(Debug, thiserror::Error)]
pub enum DebtSimError {
    /// A required numeric or date field is missing or unparsable.
    #[error("Invalid {field}: {reason} (got {value:?})")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The persisted document is absent or not valid JSON.
    #[error("Cannot load {path}: {reason}")]
    MalformedPersistedState { path: String, reason: String },

    #[error("Debt not found: {0}")]
    DebtNotFound(DebtId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialisation error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Chart rendering failed: {0}")]
    Render(String),
}

impl DebtSimError {
    pub(crate) fn invalid(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        DebtSimError::InvalidInput {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        DebtSimError::MalformedPersistedState {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DebtSimError>;
