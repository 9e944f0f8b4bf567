//! Agent-side task routes.

use axum::{Router, routing::post};

use crate::handlers::evaluate_task;

/// Create the task evaluation routes.
pub fn routes() -> Router {
    Router::new().route("/task", post(evaluate_task))
}
