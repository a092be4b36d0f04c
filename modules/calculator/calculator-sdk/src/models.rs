//! Public models for the calculator module.
//!
//! These are transport-agnostic data structures; the REST layer maps them
//! to its own DTOs.

use std::fmt;
use std::str::FromStr;

use crate::error::OperationParseError;

/// Number of operands an operation consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    /// Operand count as a plain number.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Unary => 1,
            Self::Binary => 2,
        }
    }
}

/// A supported calculator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Plus,
    Minus,
    Times,
    Divide,
    Pow,
    Abs,
    Fact,
}

impl Operation {
    pub const ALL: [Self; 7] = [
        Self::Plus,
        Self::Minus,
        Self::Times,
        Self::Divide,
        Self::Pow,
        Self::Abs,
        Self::Fact,
    ];

    /// Canonical lower-case name, as recorded in history.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Times => "times",
            Self::Divide => "divide",
            Self::Pow => "pow",
            Self::Abs => "abs",
            Self::Fact => "fact",
        }
    }

    /// Human-readable name used in evaluation failure messages.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Plus => "Plus",
            Self::Minus => "Minus",
            Self::Times => "Times",
            Self::Divide => "Divide",
            Self::Pow => "Pow",
            Self::Abs => "Abs",
            Self::Fact => "Factorial",
        }
    }

    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::Abs | Self::Fact => Arity::Unary,
            Self::Plus | Self::Minus | Self::Times | Self::Divide | Self::Pow => Arity::Binary,
        }
    }
}

impl FromStr for Operation {
    type Err = OperationParseError;

    /// Case-insensitive parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == folded)
            .ok_or_else(|| OperationParseError::new(folded))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Operands were popped from the shared stack.
    Stack,
    /// Operands were supplied directly by the caller.
    Independent,
}

impl Flavor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stack => "STACK",
            Self::Independent => "INDEPENDENT",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one successful computation. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub flavor: Flavor,
    pub operation: Operation,
    /// Operands exactly as consumed; for stack actions, in pop order.
    pub arguments: Vec<i64>,
    pub result: i64,
}

impl Action {
    #[must_use]
    pub fn new(flavor: Flavor, operation: Operation, arguments: Vec<i64>, result: i64) -> Self {
        Self {
            flavor,
            operation,
            arguments,
            result,
        }
    }
}

/// Which part of the history a query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    Stack,
    Independent,
    /// Stack history followed by independent history.
    #[default]
    All,
}

impl HistoryFilter {
    /// Interprets the raw `flavor` query parameter.
    ///
    /// Matching is exact: only `STACK` and `INDEPENDENT` narrow the result,
    /// anything else (including absence) selects everything.
    #[must_use]
    pub fn from_param(flavor: Option<&str>) -> Self {
        match flavor {
            Some("STACK") => Self::Stack,
            Some("INDEPENDENT") => Self::Independent,
            _ => Self::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("PLUS".parse::<Operation>(), Ok(Operation::Plus));
        assert_eq!("Fact".parse::<Operation>(), Ok(Operation::Fact));
        assert_eq!("dIvIdE".parse::<Operation>(), Ok(Operation::Divide));
    }

    #[test]
    fn test_parse_unknown_reports_folded_name() {
        let err = "SQRT".parse::<Operation>().unwrap_err();
        assert_eq!(err.name, "sqrt");
        assert_eq!(err.to_string(), "unknown operation: sqrt");
    }

    #[test]
    fn test_parse_rejects_padding() {
        assert!(" plus".parse::<Operation>().is_err());
        assert!("".parse::<Operation>().is_err());
    }

    #[test]
    fn test_arity() {
        assert_eq!(Operation::Abs.arity(), Arity::Unary);
        assert_eq!(Operation::Fact.arity(), Arity::Unary);
        for op in [
            Operation::Plus,
            Operation::Minus,
            Operation::Times,
            Operation::Divide,
            Operation::Pow,
        ] {
            assert_eq!(op.arity().count(), 2, "{op}");
        }
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>(), Ok(op));
        }
    }

    #[test]
    fn test_history_filter_from_param() {
        assert_eq!(HistoryFilter::from_param(Some("STACK")), HistoryFilter::Stack);
        assert_eq!(
            HistoryFilter::from_param(Some("INDEPENDENT")),
            HistoryFilter::Independent
        );
        assert_eq!(HistoryFilter::from_param(Some("stack")), HistoryFilter::All);
        assert_eq!(HistoryFilter::from_param(Some("bogus")), HistoryFilter::All);
        assert_eq!(HistoryFilter::from_param(None), HistoryFilter::All);
    }

    #[test]
    fn test_flavor_names() {
        assert_eq!(Flavor::Stack.to_string(), "STACK");
        assert_eq!(Flavor::Independent.to_string(), "INDEPENDENT");
    }
}
