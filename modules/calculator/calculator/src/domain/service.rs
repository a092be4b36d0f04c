//! Domain service for the calculator module.
//!
//! Owns the shared stack and the history ledger and runs each request's
//! validate -> evaluate -> record sequence, writing the per-flavor log lines
//! along the way.

use calculator_bootstrap::{INDEPENDENT_LOGGER, STACK_LOGGER};
use calculator_sdk::{Action, Flavor, HistoryFilter};
use tracing::{debug, error, info};

use super::error::DomainError;
use super::history::HistoryLedger;
use super::stack::StackStore;
use super::validator;

/// Calculator state shared by all requests for the life of the process.
#[derive(Debug, Default)]
pub struct CalculatorService {
    stack: StackStore,
    history: HistoryLedger,
}

impl CalculatorService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates an operation over caller-supplied arguments.
    ///
    /// # Errors
    /// Any validation or evaluation [`DomainError`]; history is not touched.
    pub fn calculate(&self, operation: &str, arguments: &[i64]) -> Result<i64, DomainError> {
        let result = validator::validate(operation, arguments)
            .and_then(|calc| Ok((calc.operation, calc.evaluate()?)));
        let (op, result) = result.map_err(|e| log_failure(Flavor::Independent, e))?;

        self.history.record(Action::new(
            Flavor::Independent,
            op,
            arguments.to_vec(),
            result,
        ));

        info!(target: INDEPENDENT_LOGGER, "Performing operation {operation}. Result is {result}");
        debug!(
            target: INDEPENDENT_LOGGER,
            "Performing operation: {operation}({}) = {result}",
            join(arguments)
        );
        Ok(result)
    }

    /// Pops the operation's operands off the stack, evaluates and records it.
    ///
    /// The stack stays locked from the pop until the action is recorded. If
    /// evaluation fails the operands are pushed back before the lock is released.
    ///
    /// # Errors
    /// Any validation or evaluation [`DomainError`]; stack and history are unchanged.
    pub fn operate(&self, operation: &str) -> Result<i64, DomainError> {
        let outcome = {
            let mut stack = self.stack.lock();
            validator::validate_and_pop(&mut stack, operation).and_then(|calc| {
                let arguments = calc.operands.to_vec();
                match calc.evaluate() {
                    Ok(result) => {
                        self.history.record(Action::new(
                            Flavor::Stack,
                            calc.operation,
                            arguments.clone(),
                            result,
                        ));
                        Ok((arguments, result, stack.size()))
                    }
                    Err(e) => {
                        stack.restore(&arguments);
                        Err(e)
                    }
                }
            })
        };
        let (arguments, result, size) = outcome.map_err(|e| log_failure(Flavor::Stack, e))?;

        info!(
            target: STACK_LOGGER,
            "Performing operation {operation}. Result is {result} | stack size: {size}"
        );
        debug!(
            target: STACK_LOGGER,
            "Performing operation: {operation}({}) = {result}",
            join(&arguments)
        );
        Ok(result)
    }

    /// Pushes `arguments` in order and returns the new stack size.
    pub fn push_arguments(&self, arguments: &[i64]) -> usize {
        let (before, after) = {
            let mut stack = self.stack.lock();
            let before = stack.size();
            (before, stack.push_all(arguments))
        };

        info!(
            target: STACK_LOGGER,
            "Adding total of {} argument(s) to the stack | Stack size: {after}",
            arguments.len()
        );
        debug!(
            target: STACK_LOGGER,
            "Adding arguments: {} | Stack size before {before} | stack size after {after}",
            join(arguments)
        );
        after
    }

    /// Removes `count` values from the top of the stack and returns the new size.
    ///
    /// # Errors
    /// [`DomainError::InvalidRemoveCount`] when `count` is not in `1..=size`.
    pub fn remove_arguments(&self, count: i64) -> Result<usize, DomainError> {
        let size = self
            .stack
            .remove(count)
            .map_err(|e| log_failure(Flavor::Stack, e))?;

        info!(
            target: STACK_LOGGER,
            "Removing total {count} argument(s) from the stack | Stack size: {size}"
        );
        Ok(size)
    }

    #[must_use]
    pub fn stack_size(&self) -> usize {
        let (size, contents) = {
            let stack = self.stack.lock();
            (stack.size(), stack.top_first())
        };

        info!(target: STACK_LOGGER, "Stack size is {size}");
        debug!(
            target: STACK_LOGGER,
            "Stack content (first == top): [{}]",
            contents
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        size
    }

    /// Snapshot of the history selected by `filter`.
    #[must_use]
    pub fn history(&self, filter: HistoryFilter) -> Vec<Action> {
        let actions = self.history.query(filter);
        let count = |flavor| actions.iter().filter(|a| a.flavor == flavor).count();

        if matches!(filter, HistoryFilter::Stack | HistoryFilter::All) {
            info!(
                target: STACK_LOGGER,
                "History: So far total {} stack actions",
                count(Flavor::Stack)
            );
        }
        if matches!(filter, HistoryFilter::Independent | HistoryFilter::All) {
            info!(
                target: INDEPENDENT_LOGGER,
                "History: So far total {} independent actions",
                count(Flavor::Independent)
            );
        }
        actions
    }
}

/// Writes the error line for a failed request on the flavor's logger.
fn log_failure(flavor: Flavor, err: DomainError) -> DomainError {
    match flavor {
        Flavor::Stack => {
            error!(target: STACK_LOGGER, "Server encountered an error ! message: {err}");
        }
        Flavor::Independent => {
            error!(target: INDEPENDENT_LOGGER, "Server encountered an error ! message: {err}");
        }
    }
    err
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use calculator_sdk::Operation;

    #[test]
    fn test_calculate_records_independent_action() {
        let svc = CalculatorService::new();
        assert_eq!(svc.calculate("Plus", &[2, 3]), Ok(5));

        let history = svc.history(HistoryFilter::Independent);
        assert_eq!(
            history,
            vec![Action::new(
                Flavor::Independent,
                Operation::Plus,
                vec![2, 3],
                5
            )]
        );
        assert!(svc.history(HistoryFilter::Stack).is_empty());
    }

    #[test]
    fn test_calculate_failure_records_nothing() {
        let svc = CalculatorService::new();
        assert!(svc.calculate("divide", &[1, 0]).is_err());
        assert!(svc.calculate("fact", &[0]).is_err());
        assert!(svc.calculate("plus", &[1]).is_err());
        assert!(svc.history(HistoryFilter::All).is_empty());
    }

    #[test]
    fn test_calculate_does_not_touch_stack() {
        let svc = CalculatorService::new();
        svc.push_arguments(&[9]);
        svc.calculate("abs", &[-1]).unwrap();
        assert_eq!(svc.stack_size(), 1);
    }

    #[test]
    fn test_operate_pops_and_records_in_pop_order() {
        let svc = CalculatorService::new();
        assert_eq!(svc.push_arguments(&[1, 2, 3]), 3);
        assert_eq!(svc.operate("minus"), Ok(1));
        assert_eq!(svc.stack_size(), 1);

        let history = svc.history(HistoryFilter::Stack);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].arguments, vec![3, 2]);
        assert_eq!(history[0].operation, Operation::Minus);
        assert_eq!(history[0].flavor, Flavor::Stack);
    }

    #[test]
    fn test_operate_failure_restores_operands() {
        let svc = CalculatorService::new();
        // top is x = 7, next is y = 0
        svc.push_arguments(&[0, 7]);
        assert_eq!(
            svc.operate("divide"),
            Err(DomainError::DivisionByZero {
                operation: Operation::Divide
            })
        );
        assert_eq!(svc.stack_size(), 2);
        assert!(svc.history(HistoryFilter::All).is_empty());

        // operands are back in their original positions
        assert_eq!(svc.operate("minus"), Ok(7));
    }

    #[test]
    fn test_operate_insufficient_stack() {
        let svc = CalculatorService::new();
        let err = svc.operate("fact").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: cannot implement operation fact. It requires 1 arguments and the stack has only 0 arguments"
        );
    }

    #[test]
    fn test_remove_arguments() {
        let svc = CalculatorService::new();
        svc.push_arguments(&[1, 2, 3]);
        assert_eq!(svc.remove_arguments(2), Ok(1));
        assert!(svc.remove_arguments(2).is_err());
        assert_eq!(svc.stack_size(), 1);
    }

    #[test]
    fn test_history_all_lists_stack_first() {
        let svc = CalculatorService::new();
        svc.calculate("times", &[2, 4]).unwrap();
        svc.push_arguments(&[3]);
        svc.operate("abs").unwrap();

        let flavors: Vec<Flavor> = svc
            .history(HistoryFilter::All)
            .into_iter()
            .map(|a| a.flavor)
            .collect();
        assert_eq!(flavors, vec![Flavor::Stack, Flavor::Independent]);
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&[]), "");
        assert_eq!(join(&[1, -2, 3]), "1,-2,3");
    }
}
