//! # Evaluation Component
//!
//! Executes parsed expression trees and exposes [`evaluate`], the one-call
//! pipeline from expression text to numeric value. This is the code an
//! agent runs for every task it receives.
//!
//! Arithmetic failures are ordinary values here, never panics: division by
//! zero, modulo misuse, and unknown functions each have their own
//! [`EvalError`] variant so the failure category survives all the way to
//! the wire.

pub mod expression;

pub use expression::ExpressionEvaluator;

use thiserror::Error;

use crate::analyzer::parsers::parse_expression;
use crate::analyzer::{ParseError, Parser};
use crate::tokenizer::token::{Token, Tokenizer, TokenizerError};

/// Errors produced while evaluating an expression, from tokenization
/// through arithmetic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("{0}")]
    Tokenize(#[from] TokenizerError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("unknown function: {name}")]
    UnknownFunction { name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("modulo requires integer operands")]
    InvalidModulo,
}

pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluates an arithmetic expression string to a single numeric value.
///
/// Runs the full pipeline: tokenize, parse, evaluate. The parse must
/// consume every token; leftover input is reported as a trailing-token
/// syntax error.
#[tracing::instrument(level = "debug")]
pub fn evaluate(input: &str) -> EvalResult<f64> {
    let spans = Tokenizer::new().tokenize(input)?;
    let tokens: Vec<Token> = spans.into_iter().map(|span| span.token).collect();

    let (consumed, expression) = parse_expression().parse(&tokens, 0)?;
    if consumed < tokens.len() {
        return Err(ParseError::TrailingToken {
            found: tokens[consumed].to_string(),
            position: consumed,
        }
        .into());
    }

    ExpressionEvaluator::new().eval_expression(&expression)
}
