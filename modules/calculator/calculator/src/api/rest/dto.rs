//! REST DTOs for the calculator module.

use calculator_sdk::Action;
use serde::{Deserialize, Serialize};

/// Body of `POST /calculator/independent/calculate`.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateRequest {
    pub arguments: Vec<i64>,
    pub operation: String,
}

/// Body of `PUT /calculator/stack/arguments`.
#[derive(Debug, Clone, Deserialize)]
pub struct StackArgumentsRequest {
    pub arguments: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperateQuery {
    pub operation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveQuery {
    pub count: i64,
}

/// `flavor` is matched exactly; anything other than `STACK` or
/// `INDEPENDENT` selects the full history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub flavor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogLevelQuery {
    #[serde(rename = "logger-name")]
    pub logger_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetLogLevelQuery {
    #[serde(rename = "logger-name")]
    pub logger_name: String,
    #[serde(rename = "logger-level")]
    pub logger_level: String,
}

/// Success envelope: `{"result": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultResponse<T> {
    pub result: T,
}

impl<T> ResultResponse<T> {
    #[must_use]
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

/// Wire form of a history entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionDto {
    pub flavor: String,
    pub operation: String,
    pub arguments: Vec<i64>,
    pub result: i64,
}

impl From<Action> for ActionDto {
    fn from(action: Action) -> Self {
        Self {
            flavor: action.flavor.as_str().to_owned(),
            operation: action.operation.as_str().to_owned(),
            arguments: action.arguments,
            result: action.result,
        }
    }
}

/// Error envelope: `{"errorMessage": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_message: String,
}
