//! Wire types exchanged between the coordinator and agents.
//!
//! The failure taxonomy here is the contract of the whole system: an agent
//! classifies every evaluation failure as a [`FailureKind`], the dispatcher
//! carries it back verbatim, and the store records it on the failed
//! expression, so a client polling the coordinator sees the same category
//! the evaluator produced.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analyzer::ParseError;
use crate::eval::EvalError;

/// A unit of work sent to one agent for one expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskRequest {
    /// Identifier of the owning expression record
    pub id: String,
    /// Raw expression text to evaluate
    pub expression: String,
}

/// Successful evaluation response from an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    pub id: String,
    pub result: f64,
}

/// Failed evaluation response from an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskErrorResponse {
    pub id: String,
    pub error: TaskFailure,
}

/// Failure categories preserved across the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Malformed expression: bad characters, misplaced operators, leftovers
    SyntaxError,
    /// Expression ended where more input was required
    UnexpectedEndOfInput,
    /// A parenthesized group was never closed
    MissingCloseParen,
    /// Function name outside the supported set
    UnknownFunction,
    /// Division with a zero divisor
    DivisionByZero,
    /// Modulo with a zero divisor
    ModuloByZero,
    /// Modulo with non-integer operands
    InvalidModulo,
    /// The coordinator could not get an answer from any agent
    DispatchFailed,
}

/// A structured evaluation or dispatch failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl TaskFailure {
    pub fn dispatch_failed(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::DispatchFailed,
            message: message.into(),
        }
    }
}

impl From<&EvalError> for TaskFailure {
    fn from(err: &EvalError) -> Self {
        let kind = match err {
            EvalError::Tokenize(_) => FailureKind::SyntaxError,
            EvalError::Parse(parse_err) => match parse_err {
                ParseError::UnexpectedEof { .. } => FailureKind::UnexpectedEndOfInput,
                ParseError::MissingCloseParen { .. } => FailureKind::MissingCloseParen,
                _ => FailureKind::SyntaxError,
            },
            EvalError::UnknownFunction { .. } => FailureKind::UnknownFunction,
            EvalError::DivisionByZero => FailureKind::DivisionByZero,
            EvalError::ModuloByZero => FailureKind::ModuloByZero,
            EvalError::InvalidModulo => FailureKind::InvalidModulo,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Outcome of one agent call, as observed by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Completed { result: f64 },
    Failed { failure: TaskFailure },
}
