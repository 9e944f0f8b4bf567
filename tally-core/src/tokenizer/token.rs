use nom::{
    IResult,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::multispace1,
    error::{VerboseError, context},
};
use thiserror::Error;

use super::literal::parse_number;
use super::symbol::{Delimiter, Operator, parse_delimiter, parse_operator};

/// Result type shared by the nom-based token parsers.
pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Result type for tokenization as a whole.
pub type TokenizerResult<T> = Result<T, TokenizerError>;

/// A single lexical element of an arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal, always carried as a 64-bit float
    Number(f64),
    /// Function name such as `sqrt` or `cos`
    Identifier(String),
    /// Arithmetic operator
    Operator(Operator),
    /// Grouping delimiter
    Delimiter(Delimiter),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Operator(op) => write!(f, "{}", op),
            Token::Delimiter(delimiter) => write!(f, "{}", delimiter),
        }
    }
}

/// A token together with its location in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpan {
    pub token: Token,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

/// Source location of a tokenizer failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line: {}, column: {}, start: {}, end: {}",
            self.line, self.column, self.start, self.end
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("Parse error: {message} at position {span}")]
    ParseError {
        message: String,
        found: String,
        span: Span,
    },
}

/// Streaming tokenizer over an expression string.
///
/// Tracks the current byte offset plus 1-based line and column so every
/// emitted [`TokenSpan`] and every error can name its location.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    current_position: usize,
    current_line: usize,
    current_column: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            current_position: 0,
            current_line: 1,
            current_column: 1,
        }
    }

    /// Tokenizes an expression string, skipping whitespace between tokens.
    ///
    /// Returns the full token stream or the first lexical error. The error
    /// carries up to 20 characters of the offending input.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn tokenize(&mut self, input: &str) -> TokenizerResult<Vec<TokenSpan>> {
        let mut tokens = Vec::new();
        let mut remaining = input;

        while !remaining.is_empty() {
            if let Ok((rest, skipped)) = skip_whitespace(remaining) {
                self.update_position(skipped);
                remaining = rest;
                continue;
            }

            let start_position = self.current_position;
            let start_line = self.current_line;
            let start_column = self.current_column;

            match parse_token(remaining) {
                Ok((rest, token)) => {
                    let consumed = &remaining[..remaining.len() - rest.len()];
                    self.update_position(consumed);

                    tokens.push(TokenSpan {
                        token,
                        start: start_position,
                        end: self.current_position,
                        line: start_line,
                        column: start_column,
                    });

                    remaining = rest;
                }
                Err(e) => {
                    let found = remaining.chars().take(20).collect::<String>();
                    let span = Span {
                        start: start_position,
                        end: start_position + 1,
                        line: start_line,
                        column: start_column,
                    };
                    let error = match e {
                        nom::Err::Incomplete(needed) => TokenizerError::ParseError {
                            message: format!("Incomplete input, {:?}", needed),
                            found,
                            span,
                        },
                        nom::Err::Error(e) | nom::Err::Failure(e) => TokenizerError::ParseError {
                            message: nom::error::convert_error(remaining, e),
                            found,
                            span,
                        },
                    };
                    tracing::error!("{}", error);
                    return Err(error);
                }
            }
        }

        Ok(tokens)
    }

    fn update_position(&mut self, text: &str) {
        for c in text.chars() {
            self.current_position += c.len_utf8();
            if c == '\n' {
                self.current_line += 1;
                self.current_column = 1;
            } else {
                self.current_column += 1;
            }
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_token(input: &str) -> ParserResult<Token> {
    context(
        "token",
        alt((parse_number, parse_identifier, parse_operator, parse_delimiter)),
    )(input)
}

fn skip_whitespace(input: &str) -> ParserResult<&str> {
    multispace1(input)
}

/// Parses a function identifier: a run of ASCII letters.
fn parse_identifier(input: &str) -> ParserResult<Token> {
    let (remaining, name) = context(
        "identifier",
        take_while1(|c: char| c.is_ascii_alphabetic()),
    )(input)?;
    Ok((remaining, Token::Identifier(name.to_string())))
}
