//! # Tally: Distributed Arithmetic Expression Evaluation
//!
//! Tally evaluates arithmetic expressions across a pool of remote worker
//! agents. A coordinator accepts expressions over HTTP, hands each one to an
//! agent in round-robin order, and tracks the expression's lifecycle until a
//! result or a failure is recorded.
//!
//! ## Expression Pipeline
//!
//! Every expression runs through the same three stages, whether it is
//! evaluated by an agent process or directly in tests:
//!
//! ```text
//! Expression Text → Tokenizer → Analyzer → Evaluator
//! ```
//!
//! ### Stage 1: Tokenization
//! The [`tokenizer`] module turns the raw expression string into a sequence
//! of tokens (numbers, identifiers, operators, delimiters), skipping
//! whitespace and rejecting characters outside the expression alphabet.
//!
//! ### Stage 2: Parsing
//! The [`analyzer`] module turns the token sequence into an abstract syntax
//! tree ([`ast`]) using a parser combinator system with an explicit cursor
//! over the immutable token slice.
//!
//! ### Stage 3: Evaluation
//! The [`eval`] module walks the tree and produces a numeric value, with
//! distinguished errors for division by zero, unknown functions, and modulo
//! misuse. [`eval::evaluate`] runs the full pipeline in one call.
//!
//! ## Coordination
//!
//! The [`agent_registry`] tracks worker endpoints and hands them out in
//! round-robin order. The [`expression_store`] owns every expression's
//! lifecycle record and enforces the monotonic transitions
//! `pending → processing → {completed, failed}`. The [`dispatcher`] ties
//! the two together: it creates the record, picks an agent, posts the task,
//! and records exactly one terminal outcome per expression.

pub mod agent_registry;
pub mod analyzer;
pub mod ast;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod eval;
pub mod expression_store;
pub mod task;
pub mod tokenizer;

pub use error::{CoreResult, Error};
pub use eval::evaluate;
