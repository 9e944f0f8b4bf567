//! Router assembly and OpenAPI documentation.

pub mod agents;
pub mod expressions;
pub mod tasks;

use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::{
    ListAgentsResponse, ListExpressionsResponse, RegisterAgentRequest, SubmitExpressionRequest,
    SubmitExpressionResponse,
};
use crate::server::AppState;
use tally_core::agent_registry::Agent;
use tally_core::expression_store::{ExpressionRecord, ExpressionStatus};
use tally_core::task::{FailureKind, TaskErrorResponse, TaskFailure, TaskRequest, TaskResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::expressions::submit_expression,
        handlers::expressions::get_status,
        handlers::expressions::get_result,
        handlers::expressions::list_expressions,
        handlers::agents::register_agent,
        handlers::agents::list_agents,
    ),
    components(schemas(
        SubmitExpressionRequest,
        SubmitExpressionResponse,
        ListExpressionsResponse,
        RegisterAgentRequest,
        ListAgentsResponse,
        Agent,
        ExpressionRecord,
        ExpressionStatus,
        TaskFailure,
        FailureKind,
    ))
)]
struct CoordinatorApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::tasks::evaluate_task),
    components(schemas(TaskRequest, TaskResponse, TaskErrorResponse, TaskFailure, FailureKind))
)]
struct AgentApiDoc;

/// Create the coordinator router with all API routes.
pub fn create_coordinator_router() -> Router<AppState> {
    Router::new()
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", CoordinatorApiDoc::openapi()),
        )
        .route("/health", get(health_check))
        .merge(expressions::routes())
        .merge(agents::routes())
}

/// Create the agent router.
pub fn create_agent_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", AgentApiDoc::openapi()))
        .route("/health", get(health_check))
        .merge(tasks::routes())
}

/// Health check endpoint for process monitoring
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
