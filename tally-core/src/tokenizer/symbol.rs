//! Operator and delimiter tokens.
//!
//! Each symbol is a strum-derived enum variant whose serialized form is the
//! literal character, so matching and diagnostics share one canonical
//! spelling.

use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, value},
    error::context,
};
use strum_macros::{AsRefStr, Display, EnumString};

use super::token::{ParserResult, Token};

/// Arithmetic operators.
#[derive(Debug, Clone, PartialEq, EnumString, Display, AsRefStr)]
pub enum Operator {
    /// Addition (`+`)
    #[strum(serialize = "+")]
    Plus,
    /// Subtraction (`-`), doubling as prefix negation
    #[strum(serialize = "-")]
    Minus,
    /// Multiplication (`*`)
    #[strum(serialize = "*")]
    Multiply,
    /// Division (`/`)
    #[strum(serialize = "/")]
    Divide,
    /// Modulo (`%`), defined for integer operands only
    #[strum(serialize = "%")]
    Percent,
}

/// Grouping delimiters.
#[derive(Debug, Clone, PartialEq, EnumString, Display, AsRefStr)]
pub enum Delimiter {
    /// Opening parenthesis (`(`)
    #[strum(serialize = "(")]
    OpenParen,
    /// Closing parenthesis (`)`)
    #[strum(serialize = ")")]
    CloseParen,
}

pub fn parse_operator(input: &str) -> ParserResult<Token> {
    context(
        "operator",
        map(
            alt((
                value(Operator::Plus, tag(Operator::Plus.as_ref())),
                value(Operator::Minus, tag(Operator::Minus.as_ref())),
                value(Operator::Multiply, tag(Operator::Multiply.as_ref())),
                value(Operator::Divide, tag(Operator::Divide.as_ref())),
                value(Operator::Percent, tag(Operator::Percent.as_ref())),
            )),
            Token::Operator,
        ),
    )(input)
}

pub fn parse_delimiter(input: &str) -> ParserResult<Token> {
    context(
        "delimiter",
        map(
            alt((
                value(Delimiter::OpenParen, tag(Delimiter::OpenParen.as_ref())),
                value(Delimiter::CloseParen, tag(Delimiter::CloseParen.as_ref())),
            )),
            Token::Delimiter,
        ),
    )(input)
}
