//! Domain errors

use thiserror::Error;

/// Errors raised when a value falls outside the domain's closed sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("No {kind} at index {index}")]
    IndexOutOfRange { kind: &'static str, index: usize },
}

impl DomainError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
