//! Domain error types for the calculator module.
//!
//! `Display` output is the exact user-facing message returned in
//! `errorMessage`; existing clients match on these strings.

use std::fmt;

use calculator_sdk::Operation;
use thiserror::Error;

/// Which side of the expected argument count a call fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentCount {
    TooFew,
    TooMany,
}

impl fmt::Display for ArgumentCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TooFew => "Not enough",
            Self::TooMany => "Too many",
        })
    }
}

/// Domain-level errors. All are request-local and leave shared state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// `operation` is the case-folded name.
    #[error("Error: unknown operation: {operation}")]
    UnknownOperation { operation: String },

    /// `operation` is the name as the caller spelled it.
    #[error("Error: {count} arguments to perform the operation {operation}")]
    ArityMismatch {
        operation: String,
        count: ArgumentCount,
    },

    #[error(
        "Error: cannot implement operation {operation}. It requires {required} arguments and the stack has only {available} arguments"
    )]
    InsufficientStack {
        operation: String,
        required: usize,
        available: usize,
    },

    #[error("Error while performing operation {}: division by 0", .operation.title())]
    DivisionByZero { operation: Operation },

    #[error("Error while performing operation Factorial: not supported for the negative number")]
    InvalidDomain,

    #[error("Error: cannot remove {count} from the stack. It has only {available} arguments")]
    InvalidRemoveCount { count: i64, available: usize },

    #[error("Error while performing operation {}: result out of range", .operation.title())]
    Overflow { operation: Operation },
}

impl DomainError {
    #[must_use]
    pub fn unknown_operation(operation: impl Into<String>) -> Self {
        Self::UnknownOperation {
            operation: operation.into(),
        }
    }

    #[must_use]
    pub fn too_few(operation: impl Into<String>) -> Self {
        Self::ArityMismatch {
            operation: operation.into(),
            count: ArgumentCount::TooFew,
        }
    }

    #[must_use]
    pub fn too_many(operation: impl Into<String>) -> Self {
        Self::ArityMismatch {
            operation: operation.into(),
            count: ArgumentCount::TooMany,
        }
    }

    #[must_use]
    pub const fn overflow(operation: Operation) -> Self {
        Self::Overflow { operation }
    }
}
