//! Error types for pointer parsing and resolution.

use thiserror::Error;

/// The category of a [`PointerError`], for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    MalformedPointer,
    MalformedMatchExpression,
}

/// Errors that can occur while parsing or resolving a pointer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// The pointer resolved to nothing under a strict lookup.
    #[error("pointer {pointer:?} not found{}", stall_suffix(.segment))]
    NotFound {
        pointer: String,
        /// The segment at which the walk stalled, if it stalled
        segment: Option<String>,
    },

    /// The pointer is non-empty and does not start with `/`.
    #[error("JSON pointer must be empty or start with a \"/\": {pointer:?}")]
    MalformedPointer { pointer: String },

    /// The text of a `~{...}` segment is not a flat JSON object of literals.
    #[error("malformed match expression {segment:?} in pointer {pointer:?}: {reason}")]
    MalformedMatchExpression {
        pointer: String,
        segment: String,
        reason: String,
    },
}

fn stall_suffix(segment: &Option<String>) -> String {
    match segment {
        Some(segment) => format!(": segment {:?} matched nothing", segment),
        None => ": no scalar value at this location".to_string(),
    }
}

impl PointerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PointerError::NotFound { .. } => ErrorKind::NotFound,
            PointerError::MalformedPointer { .. } => ErrorKind::MalformedPointer,
            PointerError::MalformedMatchExpression { .. } => ErrorKind::MalformedMatchExpression,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// The pointer text the error refers to.
    pub fn pointer(&self) -> &str {
        match self {
            PointerError::NotFound { pointer, .. }
            | PointerError::MalformedPointer { pointer }
            | PointerError::MalformedMatchExpression { pointer, .. } => pointer,
        }
    }
}
