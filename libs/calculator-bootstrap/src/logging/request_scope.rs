//! Binds a request number to everything a request logs.
//!
//! The number lives in a task-local, so concurrent requests never see each
//! other's numbers regardless of which worker thread they run on.

use std::future::Future;

tokio::task_local! {
    static REQUEST_NUMBER: u64;
}

/// Runs `fut` with `number` as the current request number.
pub async fn scope_request<F: Future>(number: u64, fut: F) -> F::Output {
    REQUEST_NUMBER.scope(number, fut).await
}

/// Request number of the request being served on this task, if any.
#[must_use]
pub fn current_request_number() -> Option<u64> {
    REQUEST_NUMBER.try_with(|n| *n).ok()
}
