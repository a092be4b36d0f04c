//! REST error mapping for the calculator module.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use calculator_bootstrap::LoggingError;

use super::dto::ErrorResponse;
use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a handler can hand back to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Domain(_)
            | Self::Logging(LoggingError::UnknownLogger(_) | LoggingError::InvalidLevel(_)) => {
                StatusCode::CONFLICT
            }
            Self::Logging(LoggingError::Reload { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error_message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
