//! Handlers for agent registration and listing.

use axum::{Json, extract::State};

use crate::error::AppError;
use crate::models::{ListAgentsResponse, RegisterAgentRequest};
use crate::server::AppState;
use tally_core::agent_registry::Agent;

/// Register an agent
///
/// Idempotent by id: re-registering a known id updates its address and
/// keeps its round-robin slot.
#[utoipa::path(
    post,
    path = "/agents/register",
    request_body = RegisterAgentRequest,
    responses(
        (status = 200, description = "Agent registered", body = Agent),
        (status = 400, description = "Empty id or address")
    )
)]
#[axum::debug_handler]
pub async fn register_agent(
    State(state): State<AppState>,
    Json(request): Json<RegisterAgentRequest>,
) -> Result<Json<Agent>, AppError> {
    if request.id.trim().is_empty() || request.address.trim().is_empty() {
        return Err(AppError::Validation(
            "id and address must not be empty".to_string(),
        ));
    }

    let agent = Agent {
        id: request.id,
        address: request.address,
    };
    state.registry.register(agent.clone()).await;
    Ok(Json(agent))
}

/// List registered agents
#[utoipa::path(
    get,
    path = "/agents",
    responses((status = 200, description = "Registered agents", body = ListAgentsResponse))
)]
#[axum::debug_handler]
pub async fn list_agents(State(state): State<AppState>) -> Json<ListAgentsResponse> {
    Json(ListAgentsResponse {
        agents: state.registry.list().await,
    })
}
