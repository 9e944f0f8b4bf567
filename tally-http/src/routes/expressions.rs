//! Expression lifecycle routes.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{get_result, get_status, list_expressions, submit_expression};
use crate::server::AppState;

/// Create the expression routes with state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/compute", post(submit_expression))
        .route("/status", get(get_status))
        .route("/result", get(get_result))
        .route("/expressions", get(list_expressions))
}
