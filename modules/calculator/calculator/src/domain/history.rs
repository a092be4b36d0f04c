//! Append-only history of executed actions, one log per flavor.

use calculator_sdk::{Action, Flavor, HistoryFilter};
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct HistoryLedger {
    stack: RwLock<Vec<Action>>,
    independent: RwLock<Vec<Action>>,
}

impl HistoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self, flavor: Flavor) -> &RwLock<Vec<Action>> {
        match flavor {
            Flavor::Stack => &self.stack,
            Flavor::Independent => &self.independent,
        }
    }

    /// Appends `action` to the log matching its flavor.
    pub fn record(&self, action: Action) {
        self.log(action.flavor).write().push(action);
    }

    /// Snapshot of the selected history, in insertion order.
    ///
    /// [`HistoryFilter::All`] returns stack actions followed by independent ones.
    #[must_use]
    pub fn query(&self, filter: HistoryFilter) -> Vec<Action> {
        match filter {
            HistoryFilter::Stack => self.stack.read().clone(),
            HistoryFilter::Independent => self.independent.read().clone(),
            HistoryFilter::All => {
                let stack = self.stack.read();
                let independent = self.independent.read();
                stack.iter().chain(independent.iter()).cloned().collect()
            }
        }
    }

    #[must_use]
    pub fn len(&self, flavor: Flavor) -> usize {
        self.log(flavor).read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.read().is_empty() && self.independent.read().is_empty()
    }
}
