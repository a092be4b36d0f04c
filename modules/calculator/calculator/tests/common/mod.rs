#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for calculator integration tests

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use calculator::{CalculatorService, build_router};
use calculator_bootstrap::{INDEPENDENT_LOGGER, LogLevel, LogLevels, REQUEST_LOGGER, STACK_LOGGER};
use serde_json::Value;
use tower::ServiceExt as _;

pub fn create_levels() -> LogLevels {
    LogLevels::detached([
        (REQUEST_LOGGER.to_owned(), LogLevel::Info),
        (STACK_LOGGER.to_owned(), LogLevel::Info),
        (INDEPENDENT_LOGGER.to_owned(), LogLevel::Debug),
    ])
}

pub fn create_router() -> Router {
    build_router(Arc::new(CalculatorService::new()), create_levels())
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, "GET", uri, None).await
}

pub async fn push(router: &Router, arguments: &[i64]) -> (StatusCode, Value) {
    send(
        router,
        "PUT",
        "/calculator/stack/arguments",
        Some(serde_json::json!({ "arguments": arguments })),
    )
    .await
}

pub async fn calculate(router: &Router, operation: &str, arguments: &[i64]) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        "/calculator/independent/calculate",
        Some(serde_json::json!({ "arguments": arguments, "operation": operation })),
    )
    .await
}

pub fn result(body: &Value) -> &Value {
    &body["result"]
}

pub fn error_message(body: &Value) -> &str {
    body["errorMessage"].as_str().expect("errorMessage")
}
