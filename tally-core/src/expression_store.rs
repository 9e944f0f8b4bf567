//! Lifecycle records for submitted expressions.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::task::TaskFailure;

/// Lifecycle states of a submitted expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ExpressionStatus {
    /// Completed and Failed are terminal: no transition leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExpressionStatus::Completed | ExpressionStatus::Failed)
    }
}

/// A submitted expression and everything recorded about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExpressionRecord {
    /// Unique identifier assigned at submission
    pub id: String,
    /// The raw expression text as submitted
    pub expression: String,
    /// Current lifecycle status
    pub status: ExpressionStatus,
    /// Numeric result, present exactly when completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    /// Failure details, present exactly when failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TaskFailure>,
}

/// A requested status change, carrying the payload the target status
/// requires. A result or an error can never be recorded without moving to
/// the matching status.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Processing,
    Completed { result: f64 },
    Failed { failure: TaskFailure },
}

impl Transition {
    fn target_status(&self) -> ExpressionStatus {
        match self {
            Transition::Processing => ExpressionStatus::Processing,
            Transition::Completed { .. } => ExpressionStatus::Completed,
            Transition::Failed { .. } => ExpressionStatus::Failed,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("expression not found: {expression_id}")]
    NotFound { expression_id: String },

    #[error("invalid transition for {expression_id}: {from:?} -> {to:?}")]
    InvalidTransition {
        expression_id: String,
        from: ExpressionStatus,
        to: ExpressionStatus,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Concurrent map of expression records keyed by id.
///
/// All mutation after creation goes through [`transition`](Self::transition),
/// which enforces the monotonic lifecycle
/// `pending → processing → {completed, failed}` atomically per record.
#[derive(Debug, Clone)]
pub struct ExpressionStore {
    expressions: Arc<DashMap<String, ExpressionRecord>>,
}

impl ExpressionStore {
    pub fn new() -> Self {
        Self {
            expressions: Arc::new(DashMap::new()),
        }
    }

    /// Creates a new pending record with a fresh id.
    pub fn create(&self, expression: &str) -> ExpressionRecord {
        let record = ExpressionRecord {
            id: Uuid::new_v4().to_string(),
            expression: expression.to_string(),
            status: ExpressionStatus::Pending,
            result: None,
            error: None,
        };
        self.expressions.insert(record.id.clone(), record.clone());
        debug!(expression_id = %record.id, "created expression record");
        record
    }

    pub fn get(&self, id: &str) -> Option<ExpressionRecord> {
        self.expressions.get(id).map(|entry| entry.value().clone())
    }

    /// Snapshot of every record. Iteration order is not meaningful.
    pub fn list(&self) -> Vec<ExpressionRecord> {
        self.expressions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Applies a status transition atomically.
    ///
    /// Valid transitions are pending → processing, pending → failed,
    /// processing → completed, and processing → failed. Anything else is
    /// rejected with [`StoreError::InvalidTransition`] and leaves the
    /// record untouched, so a record that reached a terminal state never
    /// changes again.
    pub fn transition(&self, id: &str, transition: Transition) -> StoreResult<ExpressionRecord> {
        let mut entry = self
            .expressions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound {
                expression_id: id.to_string(),
            })?;

        let from = entry.status;
        let to = transition.target_status();
        if !Self::is_valid_transition(from, to) {
            warn!(expression_id = %id, ?from, ?to, "rejected invalid status transition");
            return Err(StoreError::InvalidTransition {
                expression_id: id.to_string(),
                from,
                to,
            });
        }

        match transition {
            Transition::Processing => {}
            Transition::Completed { result } => entry.result = Some(result),
            Transition::Failed { failure } => entry.error = Some(failure),
        }
        entry.status = to;
        debug!(expression_id = %id, ?from, ?to, "expression status updated");
        Ok(entry.value().clone())
    }

    fn is_valid_transition(from: ExpressionStatus, to: ExpressionStatus) -> bool {
        matches!(
            (from, to),
            (ExpressionStatus::Pending, ExpressionStatus::Processing)
                | (ExpressionStatus::Pending, ExpressionStatus::Failed)
                | (ExpressionStatus::Processing, ExpressionStatus::Completed)
                | (ExpressionStatus::Processing, ExpressionStatus::Failed)
        )
    }
}

impl Default for ExpressionStore {
    fn default() -> Self {
        Self::new()
    }
}
