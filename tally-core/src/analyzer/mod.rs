//! # Analyzer Component
//!
//! The analyzer performs syntactic analysis of the token stream, producing
//! the abstract syntax tree defined in [`crate::ast`].
//!
//! It is built as a parser combinator system: small parsers over the token
//! slice are composed with combinators ([`combinators`], constructed via
//! [`prelude`]) into the expression grammar in [`parsers::expression`].
//! Every parser implements the [`Parser`] trait, taking the input slice and
//! a cursor position and returning the new position with the parsed value,
//! or a [`ParseError`] that classifies what went wrong and where.

pub mod combinators;
pub mod core;
pub mod parsers;
pub mod prelude;

pub use core::{ParseError, ParseResult, Parser};
