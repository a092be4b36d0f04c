//! The shared operand stack.
//!
//! Values are pushed at the tail and consumed from the tail. Compound
//! sequences (check size then pop, push then read size) run under one
//! [`StackGuard`] so they are atomic with respect to other requests.

use parking_lot::{Mutex, MutexGuard};

use super::error::DomainError;

#[derive(Debug, Default)]
pub struct StackStore {
    values: Mutex<Vec<i64>>,
}

impl StackStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclusive access for a compound read-modify-write sequence.
    #[must_use]
    pub fn lock(&self) -> StackGuard<'_> {
        StackGuard {
            values: self.values.lock(),
        }
    }

    /// Appends `values` in order and returns the new size.
    pub fn push_all(&self, values: &[i64]) -> usize {
        self.lock().push_all(values)
    }

    /// # Errors
    /// See [`StackGuard::remove`].
    pub fn remove(&self, count: i64) -> Result<usize, DomainError> {
        self.lock().remove(count)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.lock().size()
    }
}

/// Locked view of the stack.
pub struct StackGuard<'a> {
    values: MutexGuard<'a, Vec<i64>>,
}

impl StackGuard<'_> {
    pub fn push_all(&mut self, values: &[i64]) -> usize {
        self.values.extend_from_slice(values);
        self.values.len()
    }

    /// Removes the last `n` values and returns them in pop order (top first).
    ///
    /// Returns `None`, leaving the stack untouched, if fewer than `n` are present.
    pub fn pop_n(&mut self, n: usize) -> Option<Vec<i64>> {
        let split = self.values.len().checked_sub(n)?;
        let mut popped = self.values.split_off(split);
        popped.reverse();
        Some(popped)
    }

    /// Puts values returned by [`pop_n`](Self::pop_n) back where they were.
    pub fn restore(&mut self, popped: &[i64]) {
        self.values.extend(popped.iter().rev());
    }

    /// Removes `count` values from the tail and returns the new size.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidRemoveCount`], leaving the stack untouched,
    /// if `count <= 0` or `count` exceeds the current size.
    pub fn remove(&mut self, count: i64) -> Result<usize, DomainError> {
        let available = self.values.len();
        let invalid = || DomainError::InvalidRemoveCount { count, available };

        let n = usize::try_from(count)
            .ok()
            .filter(|n| (1..=available).contains(n))
            .ok_or_else(invalid)?;
        self.values.truncate(available - n);
        Ok(self.values.len())
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Contents from top to bottom.
    #[must_use]
    pub fn top_first(&self) -> Vec<i64> {
        self.values.iter().rev().copied().collect()
    }
}
