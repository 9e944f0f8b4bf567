//! Agent registration routes.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{list_agents, register_agent};
use crate::server::AppState;

/// Create the agent management routes with state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/agents/register", post(register_agent))
        .route("/agents", get(list_agents))
}
