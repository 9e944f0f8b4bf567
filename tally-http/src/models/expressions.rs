//! Models for expression submission and polling.

use serde::{Deserialize, Serialize};
use tally_core::expression_store::{ExpressionRecord, ExpressionStatus};
use utoipa::ToSchema;

/// Expression submission request model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitExpressionRequest {
    /// Arithmetic expression text, e.g. `(2+3)*sqrt(9)`
    #[serde(default)]
    pub expr: String,
}

/// Expression submission response model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitExpressionResponse {
    /// Identifier for polling `/status` and `/result`
    pub id: String,
    /// Status at the time of the response
    pub status: ExpressionStatus,
}

/// Query parameters identifying one expression
#[derive(Debug, Clone, Deserialize)]
pub struct TaskIdQuery {
    pub task_id: String,
}

/// Snapshot of all expression records
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListExpressionsResponse {
    pub expressions: Vec<ExpressionRecord>,
}
