//! Errors produced while interpreting SDK values.

use thiserror::Error;

/// The given name is not one of the supported operations.
///
/// Carries the case-folded name, which is what callers echo back to users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown operation: {name}")]
pub struct OperationParseError {
    pub name: String,
}

impl OperationParseError {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
