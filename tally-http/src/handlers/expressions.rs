//! Handlers for expression submission and polling.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::error::AppError;
use crate::models::{
    ListExpressionsResponse, SubmitExpressionRequest, SubmitExpressionResponse, TaskIdQuery,
};
use crate::server::AppState;
use tally_core::expression_store::ExpressionRecord;

/// Submit an expression for evaluation
///
/// Creates a lifecycle record and dispatches the expression to the next
/// agent in round-robin order. Returns immediately; poll `/status` and
/// `/result` for the outcome.
#[utoipa::path(
    post,
    path = "/compute",
    request_body = SubmitExpressionRequest,
    responses(
        (status = 202, description = "Expression accepted", body = SubmitExpressionResponse),
        (status = 400, description = "Empty or missing expression"),
        (status = 500, description = "Internal error")
    )
)]
#[axum::debug_handler]
pub async fn submit_expression(
    State(state): State<AppState>,
    Json(request): Json<SubmitExpressionRequest>,
) -> Result<(StatusCode, Json<SubmitExpressionResponse>), AppError> {
    if request.expr.trim().is_empty() {
        return Err(AppError::Validation("expr must not be empty".to_string()));
    }

    let record = state
        .dispatcher
        .submit(&request.expr)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitExpressionResponse {
            id: record.id,
            status: record.status,
        }),
    ))
}

/// Get the lifecycle record for an expression
#[utoipa::path(
    get,
    path = "/status",
    params(("task_id" = String, Query, description = "Expression identifier")),
    responses(
        (status = 200, description = "Expression found", body = ExpressionRecord),
        (status = 404, description = "Unknown expression id")
    )
)]
#[axum::debug_handler]
pub async fn get_status(
    State(state): State<AppState>,
    Query(query): Query<TaskIdQuery>,
) -> Result<Json<ExpressionRecord>, AppError> {
    let record = state
        .store
        .get(&query.task_id)
        .ok_or_else(|| AppError::NotFound {
            expression_id: query.task_id.clone(),
        })?;
    Ok(Json(record))
}

/// Get the result of a finished expression
///
/// Answers only once the expression has reached a terminal state. The
/// record then carries a result (completed) or a structured error (failed).
#[utoipa::path(
    get,
    path = "/result",
    params(("task_id" = String, Query, description = "Expression identifier")),
    responses(
        (status = 200, description = "Expression finished", body = ExpressionRecord),
        (status = 400, description = "Expression still pending or processing"),
        (status = 404, description = "Unknown expression id")
    )
)]
#[axum::debug_handler]
pub async fn get_result(
    State(state): State<AppState>,
    Query(query): Query<TaskIdQuery>,
) -> Result<Json<ExpressionRecord>, AppError> {
    let record = state
        .store
        .get(&query.task_id)
        .ok_or_else(|| AppError::NotFound {
            expression_id: query.task_id.clone(),
        })?;

    if !record.status.is_terminal() {
        return Err(AppError::NotFinished {
            expression_id: record.id,
        });
    }

    Ok(Json(record))
}

/// List all expression records
#[utoipa::path(
    get,
    path = "/expressions",
    responses(
        (status = 200, description = "Snapshot of all expressions", body = ListExpressionsResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_expressions(State(state): State<AppState>) -> Json<ListExpressionsResponse> {
    Json(ListExpressionsResponse {
        expressions: state.store.list(),
    })
}
