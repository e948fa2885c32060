//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent rejected inputs and empty results.
/// None of them is fatal: callers report them and keep their state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("driver not found: {0}")]
    NotFound(String),

    #[error("list is empty")]
    EmptyList,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("input out of domain: {input} ({reason})")]
    OutOfDomain { input: String, reason: String },

    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

impl DomainError {
    pub fn out_of_domain(input: impl ToString, reason: impl Into<String>) -> Self {
        Self::OutOfDomain {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
