//! Handler for the agent-side evaluation endpoint.

use axum::{Json, http::StatusCode};
use tracing::{info, warn};

use tally_core::eval::evaluate;
use tally_core::task::{TaskErrorResponse, TaskFailure, TaskRequest, TaskResponse};

/// Evaluate a task
///
/// Runs the expression through the full pipeline (tokenize, parse,
/// evaluate) and returns the numeric result, or the structured failure the
/// coordinator will record on the owning expression.
#[utoipa::path(
    post,
    path = "/task",
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Expression evaluated", body = TaskResponse),
        (status = 400, description = "Evaluation failed", body = TaskErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn evaluate_task(
    Json(task): Json<TaskRequest>,
) -> Result<Json<TaskResponse>, (StatusCode, Json<TaskErrorResponse>)> {
    match evaluate(&task.expression) {
        Ok(result) => {
            info!(task_id = %task.id, result, "task evaluated");
            Ok(Json(TaskResponse {
                id: task.id,
                result,
            }))
        }
        Err(err) => {
            warn!(task_id = %task.id, %err, "task evaluation failed");
            Err((
                StatusCode::BAD_REQUEST,
                Json(TaskErrorResponse {
                    error: TaskFailure::from(&err),
                    id: task.id,
                }),
            ))
        }
    }
}
