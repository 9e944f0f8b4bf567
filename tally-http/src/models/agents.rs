//! Models for agent registration.

use serde::{Deserialize, Serialize};
use tally_core::agent_registry::Agent;
use utoipa::ToSchema;

/// Agent registration request model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterAgentRequest {
    /// Stable identifier chosen by the agent
    pub id: String,
    /// Base URL where the coordinator can reach the agent
    pub address: String,
}

/// Registered agents response model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListAgentsResponse {
    pub agents: Vec<Agent>,
}
