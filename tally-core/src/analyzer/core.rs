//! # Core Parser Definitions
//!
//! Defines the fundamental parser interface and error types that form the
//! foundation of the expression parser combinator system.

use thiserror::Error;

/// Parser trait defines the core parsing interface.
///
/// All parsers in the system implement this trait, which takes an input
/// slice and a position, and returns either a success result with a new
/// position and output value, or a parse error.
pub trait Parser<I, O> {
    /// Attempts to parse the input starting at the given position.
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O>;
}

/// Result type for parsing operations.
///
/// On success contains the new position and the parsed value.
pub type ParseResult<O> = Result<(usize, O), ParseError>;

/// Error type for parsing operations.
///
/// Every variant carries the token position it refers to, so failures can
/// be reported against the source even after the parse has backtracked.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Input ended where a token was required
    #[error("unexpected end of expression at position {position} (context: {context:?})")]
    UnexpectedEof {
        position: usize,
        context: Option<String>,
    },

    /// A specific token was required but something else was found
    #[error("expected {expected}, found {found} at position {position} (context: {context:?})")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
        context: Option<String>,
    },

    /// No grammar alternative matched at this position
    #[error("no grammar rule matched at position {position} (context: {context:?})")]
    NoAlternative {
        position: usize,
        context: Option<String>,
    },

    /// A parenthesized group or function argument was never closed
    #[error("missing closing parenthesis at position {position}")]
    MissingCloseParen { position: usize },

    /// Input continued past a complete expression
    #[error("unexpected token {found} after end of expression at position {position}")]
    TrailingToken { found: String, position: usize },
}

impl ParseError {
    /// Appends a grammar rule name to the error's context chain.
    ///
    /// Contexts accumulate inner-to-outer, so the chain reads as the path
    /// the parser took into the grammar. Terminal classifications
    /// ([`MissingCloseParen`](ParseError::MissingCloseParen),
    /// [`TrailingToken`](ParseError::TrailingToken)) are left untouched.
    pub fn with_context(self, ctx: &str) -> Self {
        let chain = |context: Option<String>| {
            Some(match context {
                Some(existing) => format!("{} -> {}", existing, ctx),
                None => ctx.to_string(),
            })
        };
        match self {
            ParseError::UnexpectedEof { position, context } => ParseError::UnexpectedEof {
                position,
                context: chain(context),
            },
            ParseError::UnexpectedToken {
                expected,
                found,
                position,
                context,
            } => ParseError::UnexpectedToken {
                expected,
                found,
                position,
                context: chain(context),
            },
            ParseError::NoAlternative { position, context } => ParseError::NoAlternative {
                position,
                context: chain(context),
            },
            other => other,
        }
    }

    /// The token position the error refers to.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedEof { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::NoAlternative { position, .. }
            | ParseError::MissingCloseParen { position }
            | ParseError::TrailingToken { position, .. } => *position,
        }
    }
}
