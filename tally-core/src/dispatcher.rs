//! Task dispatch: assigns expressions to agents and reconciles outcomes.

use reqwest::StatusCode;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::agent_registry::{Agent, AgentRegistry};
use crate::config::DispatchConfig;
use crate::expression_store::{ExpressionRecord, ExpressionStore, StoreError, StoreResult, Transition};
use crate::task::{TaskErrorResponse, TaskFailure, TaskOutcome, TaskRequest, TaskResponse};

/// Errors from one attempted agent call.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("request to agent {agent_id} timed out after {timeout_ms} ms")]
    Timeout { agent_id: String, timeout_ms: u64 },

    #[error("failed to reach agent {agent_id}: {source}")]
    Unreachable {
        agent_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("agent {agent_id} returned unexpected status {status}")]
    UnexpectedStatus {
        agent_id: String,
        status: StatusCode,
    },

    #[error("failed to decode response from agent {agent_id}: {source}")]
    InvalidResponse {
        agent_id: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Creates expression records, assigns each to an agent, and drives every
/// record to exactly one terminal state.
///
/// Submission is fire-and-forget: the HTTP round trip to the agent runs on
/// a spawned task, and the outcome lands in the store through
/// [`on_agent_response`](Self::on_agent_response).
#[derive(Clone)]
pub struct Dispatcher {
    store: ExpressionStore,
    registry: AgentRegistry,
    client: reqwest::Client,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(store: ExpressionStore, registry: AgentRegistry, config: DispatchConfig) -> Self {
        Self {
            store,
            registry,
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Accepts a new expression: creates its record, picks an agent, and
    /// fires the asynchronous send.
    ///
    /// Returns once the record is in its post-submission state. With no
    /// agents registered the record fails immediately; otherwise it is
    /// processing by the time this returns and the terminal transition
    /// happens later, off the submitting request.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn submit(&self, expression: &str) -> StoreResult<ExpressionRecord> {
        let record = self.store.create(expression);

        let agent = match self.registry.next_agent().await {
            Ok(agent) => agent,
            Err(err) => {
                warn!(expression_id = %record.id, "no agents available for dispatch");
                return self.store.transition(
                    &record.id,
                    Transition::Failed {
                        failure: TaskFailure::dispatch_failed(err.to_string()),
                    },
                );
            }
        };

        let processing = self.store.transition(&record.id, Transition::Processing)?;

        let task = TaskRequest {
            id: processing.id.clone(),
            expression: processing.expression.clone(),
        };
        info!(expression_id = %task.id, agent_id = %agent.id, "dispatching task");

        let dispatcher = self.clone();
        tokio::spawn(async move {
            dispatcher.send_task(agent, task).await;
        });

        Ok(processing)
    }

    /// Records the outcome of an agent call on the owning record.
    ///
    /// Outcomes for unknown ids and for records already in a terminal state
    /// are logged and dropped, which makes duplicate or late responses
    /// harmless.
    pub fn on_agent_response(&self, task_id: &str, outcome: TaskOutcome) {
        let transition = match outcome {
            TaskOutcome::Completed { result } => Transition::Completed { result },
            TaskOutcome::Failed { failure } => Transition::Failed { failure },
        };

        match self.store.transition(task_id, transition) {
            Ok(record) => {
                info!(expression_id = %task_id, status = ?record.status, "recorded agent response");
            }
            Err(StoreError::NotFound { .. }) => {
                error!(expression_id = %task_id, "agent response for unknown expression");
            }
            Err(StoreError::InvalidTransition { from, .. }) => {
                warn!(expression_id = %task_id, ?from, "dropped agent response for finished expression");
            }
        }
    }

    /// Runs one agent call under the configured timeout and records the
    /// outcome. Every failure mode funnels into a dispatch failure so the
    /// record still reaches a terminal state.
    async fn send_task(&self, agent: Agent, task: TaskRequest) {
        let outcome = match timeout(
            self.config.request_timeout,
            self.call_agent(&agent, &task),
        )
        .await
        {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                warn!(expression_id = %task.id, agent_id = %agent.id, %err, "task dispatch failed");
                TaskOutcome::Failed {
                    failure: TaskFailure::dispatch_failed(err.to_string()),
                }
            }
            Err(_) => {
                let err = DispatchError::Timeout {
                    agent_id: agent.id.clone(),
                    timeout_ms: self.config.request_timeout.as_millis() as u64,
                };
                warn!(expression_id = %task.id, agent_id = %agent.id, %err, "task dispatch timed out");
                TaskOutcome::Failed {
                    failure: TaskFailure::dispatch_failed(err.to_string()),
                }
            }
        };

        self.on_agent_response(&task.id, outcome);
    }

    /// Posts the task to the agent's `/task` endpoint and interprets the
    /// response. 200 carries a result, 400 carries a structured failure,
    /// anything else is a dispatch error.
    async fn call_agent(&self, agent: &Agent, task: &TaskRequest) -> DispatchResult<TaskOutcome> {
        let url = format!("{}/task", agent.address.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(task)
            .send()
            .await
            .map_err(|source| DispatchError::Unreachable {
                agent_id: agent.id.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::OK => {
                let body: TaskResponse =
                    response
                        .json()
                        .await
                        .map_err(|source| DispatchError::InvalidResponse {
                            agent_id: agent.id.clone(),
                            source,
                        })?;
                Ok(TaskOutcome::Completed {
                    result: body.result,
                })
            }
            StatusCode::BAD_REQUEST => {
                let body: TaskErrorResponse =
                    response
                        .json()
                        .await
                        .map_err(|source| DispatchError::InvalidResponse {
                            agent_id: agent.id.clone(),
                            source,
                        })?;
                Ok(TaskOutcome::Failed {
                    failure: body.error,
                })
            }
            status => Err(DispatchError::UnexpectedStatus {
                agent_id: agent.id.clone(),
                status,
            }),
        }
    }
}
