//! # Parser Prelude
//!
//! Constructor functions for the combinators in
//! [`combinators`](super::combinators). Grammar code imports this module
//! and composes parsers through these functions.

use std::fmt;

use super::combinators::{
    AsUnit, Choice, Delimited, Equal, Lazy, Many, Map, MapErr, Satisfy, Tuple2, WithContext,
};
use super::core::{ParseError, Parser};

/// Matches exactly the given input element.
pub fn equal<I>(value: I) -> Equal<I>
where
    I: Clone + PartialEq + fmt::Display,
{
    Equal::new(value)
}

/// Matches an element the predicate accepts, labeled for error messages.
pub fn satisfy<I, O, F>(f: F, expected: &str) -> Satisfy<I, O, F>
where
    I: fmt::Display,
    F: Fn(&I) -> Option<O>,
{
    Satisfy::new(f, expected)
}

/// Tries each parser in order, returning the first success.
pub fn choice<I, O>(parsers: Vec<Box<dyn Parser<I, O>>>) -> Choice<I, O> {
    Choice::new(parsers)
}

/// Applies the parser zero or more times.
pub fn many<I, O, P>(parser: P) -> Many<P>
where
    P: Parser<I, O>,
{
    Many::new(parser)
}

/// Transforms the parser's output.
pub fn map<I, O1, O2, P, F>(parser: P, f: F) -> Map<P, F, O1>
where
    P: Parser<I, O1>,
    F: Fn(O1) -> O2,
{
    Map::new(parser, f)
}

/// Transforms the parser's error.
pub fn map_err<I, O, P, F>(parser: P, f: F) -> MapErr<P, F>
where
    P: Parser<I, O>,
    F: Fn(ParseError) -> ParseError,
{
    MapErr::new(parser, f)
}

/// Discards the parser's output.
pub fn as_unit<I, O, P>(parser: P) -> AsUnit<P, O>
where
    P: Parser<I, O>,
{
    AsUnit::new(parser)
}

/// Applies two parsers in sequence.
pub fn tuple2<I, O1, O2, P1, P2>(parser1: P1, parser2: P2) -> Tuple2<P1, P2>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    Tuple2::new(parser1, parser2)
}

/// Parses content between two delimiters, keeping only the content.
pub fn delimited<I, O, L, P, R>(left: L, parser: P, right: R) -> Delimited<L, P, R>
where
    L: Parser<I, ()>,
    P: Parser<I, O>,
    R: Parser<I, ()>,
{
    Delimited::new(left, parser, right)
}

/// Defers parser construction, breaking grammar recursion.
pub fn lazy<I, O, P, F>(f: F) -> Lazy<P, F>
where
    P: Parser<I, O>,
    F: Fn() -> P,
{
    Lazy::new(f)
}

/// Labels a parser with the grammar rule it implements.
pub fn with_context<I, O, P>(parser: P, context: &str) -> WithContext<P>
where
    P: Parser<I, O>,
{
    WithContext::new(parser, context)
}
