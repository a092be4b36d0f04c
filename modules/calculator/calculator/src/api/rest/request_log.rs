//! Request numbering and access logging.
//!
//! Every request gets the next number from a process-wide counter. The number
//! is bound to the request's task for its whole lifetime, so every line logged
//! while serving it ends with `| request #N `.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use calculator_bootstrap::REQUEST_LOGGER;
use calculator_bootstrap::logging::scope_request;
use tracing::{debug, info};

/// Monotonic request counter shared by all clones.
#[derive(Debug, Clone, Default)]
pub struct RequestCounter(Arc<AtomicU64>);

impl RequestCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next request number, starting at 1.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

pub async fn request_log(
    State(counter): State<RequestCounter>,
    req: Request,
    next: Next,
) -> Response {
    let number = counter.next();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    scope_request(number, async move {
        let started = Instant::now();
        info!(
            target: REQUEST_LOGGER,
            "Incoming request | #{number} | resource: {path} | HTTP Verb {method}"
        );

        let response = next.run(req).await;

        debug!(
            target: REQUEST_LOGGER,
            "request #{number} duration: {:.1}ms",
            started.elapsed().as_secs_f64() * 1000.0
        );
        response
    })
    .await
}
