//! Registry of worker agents and the round-robin selection cursor.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};
use utoipa::ToSchema;

/// A remote evaluation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Agent {
    /// Stable identifier chosen by the agent
    pub id: String,
    /// Base URL of the agent's HTTP surface, e.g. `http://127.0.0.1:8081`
    pub address: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("no agents available")]
    NoAgentsAvailable,
}

pub type AgentResult<T> = Result<T, AgentError>;

#[derive(Debug, Default)]
struct RegistryInner {
    agents: Vec<Agent>,
    cursor: usize,
}

/// Shared set of registered agents.
///
/// Selection is strict round-robin over registration order. The cursor
/// advances under the same lock as the selection, so concurrent submitters
/// each observe a distinct slot.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryInner::default())),
        }
    }

    /// Registers an agent, or updates its address if the id is already
    /// known. Re-registration keeps the agent's original round-robin slot.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn register(&self, agent: Agent) {
        let mut inner = self.inner.lock().await;
        match inner
            .agents
            .iter_mut()
            .find(|existing| existing.id == agent.id)
        {
            Some(existing) => {
                info!(agent_id = %agent.id, address = %agent.address, "updated agent address");
                existing.address = agent.address;
            }
            None => {
                info!(agent_id = %agent.id, address = %agent.address, "registered agent");
                inner.agents.push(agent);
            }
        }
    }

    /// Selects the next agent in round-robin order.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn next_agent(&self) -> AgentResult<Agent> {
        let mut inner = self.inner.lock().await;
        if inner.agents.is_empty() {
            return Err(AgentError::NoAgentsAvailable);
        }
        // Clamp in case the agent set shrank since the last selection.
        if inner.cursor >= inner.agents.len() {
            inner.cursor = 0;
        }
        let agent = inner.agents[inner.cursor].clone();
        inner.cursor = (inner.cursor + 1) % inner.agents.len();
        debug!(agent_id = %agent.id, "selected agent");
        Ok(agent)
    }

    /// Snapshot of all registered agents in registration order.
    pub async fn list(&self) -> Vec<Agent> {
        self.inner.lock().await.agents.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.agents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.agents.is_empty()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
