//! # Parser Combinators
//!
//! The combinator structs that compose small parsers into the expression
//! grammar. Construct them through the functions in
//! [`prelude`](super::prelude) rather than directly.

use std::fmt;
use std::marker::PhantomData;

use super::core::{ParseError, ParseResult, Parser};

/// Matches one specific input element.
pub struct Equal<I> {
    value: I,
}

impl<I> Equal<I> {
    pub fn new(value: I) -> Self {
        Self { value }
    }
}

impl<I: Clone + PartialEq + fmt::Display> Parser<I, I> for Equal<I> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<I> {
        match input.get(pos) {
            Some(found) if *found == self.value => Ok((pos + 1, found.clone())),
            Some(found) => Err(ParseError::UnexpectedToken {
                expected: self.value.to_string(),
                found: found.to_string(),
                position: pos,
                context: None,
            }),
            None => Err(ParseError::UnexpectedEof {
                position: pos,
                context: None,
            }),
        }
    }
}

/// Matches an element accepted by a predicate, mapping it to an output.
///
/// The label names what was expected, for error reporting.
pub struct Satisfy<I, O, F> {
    f: F,
    expected: String,
    _phantom: PhantomData<(I, O)>,
}

impl<I, O, F> Satisfy<I, O, F>
where
    F: Fn(&I) -> Option<O>,
{
    pub fn new(f: F, expected: &str) -> Self {
        Self {
            f,
            expected: expected.to_string(),
            _phantom: PhantomData,
        }
    }
}

impl<I, O, F> Parser<I, O> for Satisfy<I, O, F>
where
    I: fmt::Display,
    F: Fn(&I) -> Option<O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        match input.get(pos) {
            Some(found) => (self.f)(found).map(|value| (pos + 1, value)).ok_or_else(|| {
                ParseError::UnexpectedToken {
                    expected: self.expected.clone(),
                    found: found.to_string(),
                    position: pos,
                    context: None,
                }
            }),
            None => Err(ParseError::UnexpectedEof {
                position: pos,
                context: None,
            }),
        }
    }
}

/// Tries each alternative in order and returns the first success.
///
/// On failure, the error that got furthest into the input wins, so a
/// classification made deep inside an alternative (a missing close paren,
/// say) survives the backtracking. When every alternative fails at the
/// starting position the result is [`ParseError::NoAlternative`], unless
/// the input simply ended there.
pub struct Choice<I, O> {
    parsers: Vec<Box<dyn Parser<I, O>>>,
}

impl<I, O> Choice<I, O> {
    pub fn new(parsers: Vec<Box<dyn Parser<I, O>>>) -> Self {
        Self { parsers }
    }
}

impl<I, O> Parser<I, O> for Choice<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        let mut furthest: Option<ParseError> = None;

        for parser in &self.parsers {
            match parser.parse(input, pos) {
                Ok(result) => return Ok(result),
                Err(e) => {
                    let keep = match &furthest {
                        Some(best) => e.position() > best.position(),
                        None => true,
                    };
                    if keep {
                        furthest = Some(e);
                    }
                }
            }
        }

        match furthest {
            Some(e)
                if e.position() > pos || matches!(e, ParseError::UnexpectedEof { .. }) =>
            {
                Err(e)
            }
            _ => Err(ParseError::NoAlternative {
                position: pos,
                context: None,
            }),
        }
    }
}

/// Applies a parser zero or more times, collecting the outputs.
pub struct Many<P> {
    parser: P,
}

impl<P> Many<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<I, O, P> Parser<I, Vec<O>> for Many<P>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<Vec<O>> {
        let mut results = Vec::new();
        let mut pos = pos;
        while let Ok((new_pos, value)) = self.parser.parse(input, pos) {
            results.push(value);
            pos = new_pos;
        }
        Ok((pos, results))
    }
}

/// Transforms a parser's output with a function.
pub struct Map<P, F, O1> {
    parser: P,
    f: F,
    _phantom: PhantomData<O1>,
}

impl<P, F, O1> Map<P, F, O1> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I, O1, O2, P, F> Parser<I, O2> for Map<P, F, O1>
where
    P: Parser<I, O1>,
    F: Fn(O1) -> O2,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O2> {
        self.parser
            .parse(input, pos)
            .map(|(new_pos, value)| (new_pos, (self.f)(value)))
    }
}

/// Transforms a parser's error with a function, leaving successes alone.
pub struct MapErr<P, F> {
    parser: P,
    f: F,
}

impl<P, F> MapErr<P, F> {
    pub fn new(parser: P, f: F) -> Self {
        Self { parser, f }
    }
}

impl<I, O, P, F> Parser<I, O> for MapErr<P, F>
where
    P: Parser<I, O>,
    F: Fn(ParseError) -> ParseError,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        self.parser.parse(input, pos).map_err(|e| (self.f)(e))
    }
}

/// Discards a parser's output, keeping only the position advance.
pub struct AsUnit<P, O> {
    parser: P,
    _phantom: PhantomData<O>,
}

impl<P, O> AsUnit<P, O> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, P> Parser<I, ()> for AsUnit<P, O>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<()> {
        self.parser.parse(input, pos).map(|(new_pos, _)| (new_pos, ()))
    }
}

/// Applies two parsers in sequence, pairing their outputs.
pub struct Tuple2<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Tuple2<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self { parser1, parser2 }
    }
}

impl<I, O1, O2, P1, P2> Parser<I, (O1, O2)> for Tuple2<P1, P2>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<(O1, O2)> {
        let (pos, value1) = self.parser1.parse(input, pos)?;
        let (pos, value2) = self.parser2.parse(input, pos)?;
        Ok((pos, (value1, value2)))
    }
}

/// Parses content between two delimiters, keeping only the content.
pub struct Delimited<L, P, R> {
    left: L,
    parser: P,
    right: R,
}

impl<L, P, R> Delimited<L, P, R> {
    pub fn new(left: L, parser: P, right: R) -> Self {
        Self { left, parser, right }
    }
}

impl<I, O, L, P, R> Parser<I, O> for Delimited<L, P, R>
where
    L: Parser<I, ()>,
    P: Parser<I, O>,
    R: Parser<I, ()>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        let (pos, _) = self.left.parse(input, pos)?;
        let (pos, value) = self.parser.parse(input, pos)?;
        let (pos, _) = self.right.parse(input, pos)?;
        Ok((pos, value))
    }
}

/// Defers parser construction until parse time, breaking grammar recursion.
pub struct Lazy<P, F> {
    f: F,
    _phantom: PhantomData<P>,
}

impl<P, F> Lazy<P, F>
where
    F: Fn() -> P,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, P, F> Parser<I, O> for Lazy<P, F>
where
    P: Parser<I, O>,
    F: Fn() -> P,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        (self.f)().parse(input, pos)
    }
}

/// Labels a parser with the grammar rule it implements.
pub struct WithContext<P> {
    parser: P,
    context: String,
}

impl<P> WithContext<P> {
    pub fn new(parser: P, context: &str) -> Self {
        Self {
            parser,
            context: context.to_string(),
        }
    }
}

impl<I, O, P> Parser<I, O> for WithContext<P>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        self.parser
            .parse(input, pos)
            .map_err(|e| e.with_context(&self.context))
    }
}
