use std::sync::Arc;

use axum::Router;
use axum::extract::Extension;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use calculator_bootstrap::LogLevels;

use crate::domain::service::CalculatorService;

use super::handlers;
use super::request_log::{RequestCounter, request_log};

/// Builds the HTTP surface of the calculator.
///
/// Every route runs behind the request-numbering middleware.
#[must_use]
pub fn build_router(service: Arc<CalculatorService>, levels: LogLevels) -> Router {
    Router::new()
        .route("/calculator/health", get(handlers::health))
        .route(
            "/calculator/independent/calculate",
            post(handlers::calculate),
        )
        .route("/calculator/stack/size", get(handlers::stack_size))
        .route(
            "/calculator/stack/arguments",
            put(handlers::push_arguments).delete(handlers::remove_arguments),
        )
        .route("/calculator/stack/operate", get(handlers::operate))
        .route("/calculator/history", get(handlers::history))
        .route(
            "/logs/level",
            get(handlers::get_log_level).put(handlers::set_log_level),
        )
        .layer(Extension(service))
        .layer(Extension(levels))
        .layer(from_fn_with_state(RequestCounter::new(), request_log))
}
