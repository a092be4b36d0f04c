//! Operation engine: maps an operation and its operands to a result.
//!
//! No arity or name checks happen here; callers go through the validator first.

use calculator_sdk::Operation;

use super::error::DomainError;

/// Operands bound to `x` (and `y` for binary operations).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    Unary(i64),
    Binary(i64, i64),
}

impl Operands {
    #[must_use]
    pub const fn x(self) -> i64 {
        match self {
            Self::Unary(x) | Self::Binary(x, _) => x,
        }
    }

    /// Second operand; `0` for unary operands.
    #[must_use]
    pub const fn y(self) -> i64 {
        match self {
            Self::Unary(_) => 0,
            Self::Binary(_, y) => y,
        }
    }

    #[must_use]
    pub fn to_vec(self) -> Vec<i64> {
        match self {
            Self::Unary(x) => vec![x],
            Self::Binary(x, y) => vec![x, y],
        }
    }
}

/// An operation together with the operands it will consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculation {
    pub operation: Operation,
    pub operands: Operands,
}

impl Calculation {
    /// # Errors
    /// See [`evaluate`].
    pub fn evaluate(&self) -> Result<i64, DomainError> {
        evaluate(self.operation, self.operands)
    }
}

/// Computes `operation` over `operands`.
///
/// # Errors
/// - [`DomainError::DivisionByZero`] for `divide` with `y == 0`, or `pow` of zero
///   to a negative exponent
/// - [`DomainError::InvalidDomain`] for `fact` with `x <= 0`
/// - [`DomainError::Overflow`] when the result does not fit in an `i64`
pub fn evaluate(operation: Operation, operands: Operands) -> Result<i64, DomainError> {
    let x = operands.x();
    let y = operands.y();
    let overflow = || DomainError::overflow(operation);

    match operation {
        Operation::Plus => x.checked_add(y).ok_or_else(overflow),
        Operation::Minus => x.checked_sub(y).ok_or_else(overflow),
        Operation::Times => x.checked_mul(y).ok_or_else(overflow),
        Operation::Divide => floor_div(x, y),
        Operation::Pow => pow(x, y),
        Operation::Abs => x.checked_abs().ok_or_else(overflow),
        Operation::Fact => factorial(x),
    }
}

/// Division rounding toward negative infinity.
fn floor_div(x: i64, y: i64) -> Result<i64, DomainError> {
    if y == 0 {
        return Err(DomainError::DivisionByZero {
            operation: Operation::Divide,
        });
    }
    let quotient = x
        .checked_div(y)
        .ok_or(DomainError::overflow(Operation::Divide))?;
    if x % y != 0 && ((x < 0) != (y < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Integer power. Negative exponents yield `floor(x^y)`.
// TODO: decide whether negative exponents should be rejected outright once
// callers relying on the current floor behaviour are known.
fn pow(x: i64, y: i64) -> Result<i64, DomainError> {
    let odd = y % 2 != 0;
    match x {
        0 if y < 0 => Err(DomainError::DivisionByZero {
            operation: Operation::Pow,
        }),
        0 => Ok(i64::from(y == 0)),
        1 => Ok(1),
        -1 => Ok(if odd { -1 } else { 1 }),
        _ if y < 0 => Ok(if x < 0 && odd { -1 } else { 0 }),
        _ => u32::try_from(y)
            .ok()
            .and_then(|exp| x.checked_pow(exp))
            .ok_or(DomainError::overflow(Operation::Pow)),
    }
}

fn factorial(x: i64) -> Result<i64, DomainError> {
    if x <= 0 {
        return Err(DomainError::InvalidDomain);
    }
    (2..=x)
        .try_fold(1_i64, i64::checked_mul)
        .ok_or(DomainError::overflow(Operation::Fact))
}
