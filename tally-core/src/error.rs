//! Top-level error type tying the core modules together.

use thiserror::Error;

use crate::agent_registry::AgentError;
use crate::analyzer::ParseError;
use crate::dispatcher::DispatchError;
use crate::eval::EvalError;
use crate::expression_store::StoreError;
use crate::tokenizer::token::TokenizerError;

/// Unified error for callers that cross module boundaries.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tokenize error: {0}")]
    Tokenize(#[from] TokenizerError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Eval error: {0}")]
    Eval(#[from] EvalError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }
}
