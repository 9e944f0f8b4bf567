//! Numeric literal parsing.

use nom::{
    bytes::complete::take_while1,
    combinator::{map, map_res},
    error::context,
};

use super::token::{ParserResult, Token};

/// Parses a numeric literal: the longest run of digits and dots, converted
/// to `f64`. Runs that are not a valid float (`1.2.3`, a lone `.`) fail the
/// conversion and are rejected.
pub fn parse_number(input: &str) -> ParserResult<Token> {
    context(
        "number",
        map(
            map_res(
                take_while1(|c: char| c.is_ascii_digit() || c == '.'),
                |s: &str| s.parse::<f64>(),
            ),
            Token::Number,
        ),
    )(input)
}
