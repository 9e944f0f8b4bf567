//! Grammar parsers built from the combinator system.

pub mod expression;

pub use expression::parse_expression;
