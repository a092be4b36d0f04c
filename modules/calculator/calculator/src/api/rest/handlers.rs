use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Query};
use calculator_bootstrap::{LogLevel, LogLevels, LoggingError, STACK_LOGGER};
use calculator_sdk::HistoryFilter;

use crate::domain::service::CalculatorService;

use super::dto::{
    ActionDto, CalculateRequest, HistoryQuery, LogLevelQuery, OperateQuery, RemoveQuery,
    ResultResponse, SetLogLevelQuery, StackArgumentsRequest,
};
use super::error::ApiResult;

pub async fn health() -> Json<&'static str> {
    Json("OK")
}

pub async fn calculate(
    Extension(svc): Extension<Arc<CalculatorService>>,
    Json(req): Json<CalculateRequest>,
) -> ApiResult<Json<ResultResponse<i64>>> {
    let result = svc.calculate(&req.operation, &req.arguments)?;
    Ok(Json(ResultResponse::new(result)))
}

pub async fn stack_size(
    Extension(svc): Extension<Arc<CalculatorService>>,
) -> Json<ResultResponse<usize>> {
    Json(ResultResponse::new(svc.stack_size()))
}

pub async fn push_arguments(
    Extension(svc): Extension<Arc<CalculatorService>>,
    Json(req): Json<StackArgumentsRequest>,
) -> Json<ResultResponse<usize>> {
    Json(ResultResponse::new(svc.push_arguments(&req.arguments)))
}

pub async fn operate(
    Extension(svc): Extension<Arc<CalculatorService>>,
    Query(query): Query<OperateQuery>,
) -> ApiResult<Json<ResultResponse<i64>>> {
    let result = svc.operate(&query.operation)?;
    Ok(Json(ResultResponse::new(result)))
}

pub async fn remove_arguments(
    Extension(svc): Extension<Arc<CalculatorService>>,
    Query(query): Query<RemoveQuery>,
) -> ApiResult<Json<ResultResponse<usize>>> {
    let size = svc.remove_arguments(query.count)?;
    Ok(Json(ResultResponse::new(size)))
}

pub async fn history(
    Extension(svc): Extension<Arc<CalculatorService>>,
    Query(query): Query<HistoryQuery>,
) -> Json<ResultResponse<Vec<ActionDto>>> {
    let filter = HistoryFilter::from_param(query.flavor.as_deref());
    let actions = svc.history(filter).into_iter().map(ActionDto::from).collect();
    Json(ResultResponse::new(actions))
}

pub async fn get_log_level(
    Extension(levels): Extension<LogLevels>,
    Query(query): Query<LogLevelQuery>,
) -> ApiResult<Json<LogLevel>> {
    let level = levels.level(&query.logger_name).map_err(log_level_failure)?;
    Ok(Json(level))
}

pub async fn set_log_level(
    Extension(levels): Extension<LogLevels>,
    Query(query): Query<SetLogLevelQuery>,
) -> ApiResult<Json<LogLevel>> {
    let level = levels
        .set_level(&query.logger_name, &query.logger_level)
        .map_err(log_level_failure)?;
    tracing::info!(logger = %query.logger_name, %level, "log level changed");
    Ok(Json(level))
}

fn log_level_failure(err: LoggingError) -> LoggingError {
    tracing::error!(target: STACK_LOGGER, "Server encountered an error ! message: {err}");
    err
}
