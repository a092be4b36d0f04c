//! Pre-execution checks on operation names and operand counts.

use calculator_sdk::{Arity, Operation};

use super::engine::{Calculation, Operands};
use super::error::DomainError;
use super::stack::StackGuard;

/// Resolves an operation name, case-insensitively.
///
/// # Errors
/// Returns [`DomainError::UnknownOperation`] carrying the lower-cased name.
pub fn validate_operation(operation: &str) -> Result<Operation, DomainError> {
    operation
        .parse()
        .map_err(|e: calculator_sdk::OperationParseError| DomainError::unknown_operation(e.name))
}

/// Checks a directly supplied argument list against the operation's arity.
///
/// # Errors
/// - [`DomainError::UnknownOperation`] for an unrecognized name
/// - [`DomainError::ArityMismatch`] when the argument count is wrong
pub fn validate(operation: &str, arguments: &[i64]) -> Result<Calculation, DomainError> {
    let op = validate_operation(operation)?;
    let operands = match (op.arity(), arguments) {
        (Arity::Unary, [x]) => Operands::Unary(*x),
        (Arity::Binary, [x, y]) => Operands::Binary(*x, *y),
        (Arity::Unary, [_, _, ..]) | (Arity::Binary, [_, _, _, ..]) => {
            return Err(DomainError::too_many(operation));
        }
        (_, _) => return Err(DomainError::too_few(operation)),
    };
    Ok(Calculation {
        operation: op,
        operands,
    })
}

/// Validates `operation` and pops its operands off the stack.
///
/// Operands come back in pop order: the top of the stack is `x`.
///
/// # Errors
/// - [`DomainError::UnknownOperation`] for an unrecognized name
/// - [`DomainError::InsufficientStack`] when the stack holds fewer values than
///   the operation needs; the stack is left untouched
pub fn validate_and_pop(
    stack: &mut StackGuard<'_>,
    operation: &str,
) -> Result<Calculation, DomainError> {
    let op = validate_operation(operation)?;
    let required = op.arity().count();
    let available = stack.size();

    let insufficient = || DomainError::InsufficientStack {
        operation: operation.to_owned(),
        required,
        available,
    };
    let popped = stack.pop_n(required).ok_or_else(insufficient)?;
    let operands = match popped.as_slice() {
        [x] => Operands::Unary(*x),
        [x, y] => Operands::Binary(*x, *y),
        _ => {
            stack.restore(&popped);
            return Err(insufficient());
        }
    };
    Ok(Calculation {
        operation: op,
        operands,
    })
}
