//! # Tokenizer Component
//!
//! The tokenizer performs lexical analysis of arithmetic expression text,
//! transforming the raw string into a structured token stream for the
//! parser.
//!
//! ## Design Principles
//!
//! * **Position Information**: Each token carries a span (line, column,
//!   start/end byte offsets) so later stages can point at the offending
//!   input precisely.
//! * **Small Alphabet**: Only numbers, function identifiers, arithmetic
//!   operators, and parentheses are legal. Anything else fails tokenization
//!   with a descriptive error instead of being passed along.
//! * **Whitespace Insensitivity**: Spaces, tabs, and newlines between
//!   tokens are consumed and never appear in the output stream.
//!
//! ## Component Structure
//!
//! * [`token`]: Core token types and the tokenizer implementation
//! * [`symbol`]: Operator and delimiter parsing
//! * [`literal`]: Numeric literal parsing

pub mod literal;
pub mod symbol;
pub mod token;

pub use token::{Token, TokenSpan, Tokenizer, TokenizerError, TokenizerResult};
