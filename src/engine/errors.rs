//! Error types for attack tree loading.
//!
//! The evaluation core never fails: missing nodes, missing likelihoods and
//! empty child lists all degrade to a numeric default. Errors only surface at
//! the load boundary, where malformed input is rejected before it reaches the
//! tree.

use std::fmt;

use thiserror::Error;

/// Category of a load-boundary validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    EmptyTree,
    EmptyLabel,
    DuplicateLabel,
    MissingRoot,
    MultipleRoots,
    UnknownParent,
    Cycle,
    LikelihoodOutOfRange,
}

/// Validation diagnostic pointing at the offending node when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub kind: ValidationKind,
    pub label: Option<String>,
    pub message: String,
}

impl ValidationDiagnostic {
    pub fn new(kind: ValidationKind, label: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.map(str::to_string),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error")?;
        if let Some(label) = &self.label {
            write!(f, " [node '{}']", label)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Errors that can occur while loading an attack tree.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in the future without breaking changes.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TreeError {
    /// The input document could not be decoded into node records.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Structural validation failure with the offending node attached.
    #[error("{0}")]
    Validation(ValidationDiagnostic),

    /// Reading the input source failed.
    #[error("io error: {0}")]
    Io(String),
}

impl TreeError {
    /// Build a node-scoped validation error.
    pub fn validation(kind: ValidationKind, label: Option<&str>, message: impl Into<String>) -> Self {
        Self::Validation(ValidationDiagnostic::new(kind, label, message))
    }

    /// The validation category, if this is a structural validation failure.
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            Self::Validation(diag) => Some(diag.kind),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TreeError {
    fn from(err: serde_json::Error) -> Self {
        TreeError::ParseError(err.to_string())
    }
}
