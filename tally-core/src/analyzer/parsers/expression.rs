//! # Expression Grammar
//!
//! The arithmetic grammar, built from the combinator prelude:
//!
//! ```text
//! expression     := additive
//! additive       := multiplicative (('+' | '-') multiplicative)*
//! multiplicative := unary (('*' | '/' | '%') unary)*
//! unary          := '-' unary | primary
//! primary        := number | function '(' expression ')' | '(' expression ')'
//! ```
//!
//! Binary operators of equal precedence associate left; the folds below
//! build the tree in source order.

use crate::analyzer::core::ParseError;
use crate::analyzer::prelude::{
    as_unit, choice, delimited, equal, lazy, many, map, map_err, satisfy, tuple2, with_context,
};
use crate::analyzer::Parser;
use crate::ast;
use crate::tokenizer::symbol::{Delimiter, Operator};
use crate::tokenizer::token::Token;

/// Parses a complete arithmetic expression.
///
/// The returned parser stops at the first position that cannot continue the
/// grammar; callers decide whether leftover input is an error.
pub fn parse_expression() -> impl Parser<Token, ast::Expression> {
    with_context(lazy(parse_additive), "expression")
}

fn parse_additive() -> impl Parser<Token, ast::Expression> {
    map(
        tuple2(
            lazy(parse_multiplicative),
            many(tuple2(
                choice(vec![
                    Box::new(parse_operator_add()),
                    Box::new(parse_operator_subtract()),
                ]),
                lazy(parse_multiplicative),
            )),
        ),
        fold_binary_ops,
    )
}

fn parse_multiplicative() -> impl Parser<Token, ast::Expression> {
    map(
        tuple2(
            lazy(parse_unary),
            many(tuple2(
                choice(vec![
                    Box::new(parse_operator_multiply()),
                    Box::new(parse_operator_divide()),
                    Box::new(parse_operator_modulo()),
                ]),
                lazy(parse_unary),
            )),
        ),
        fold_binary_ops,
    )
}

fn fold_binary_ops(
    (first, rest): (
        ast::Expression,
        Vec<(ast::BinaryOperator, ast::Expression)>,
    ),
) -> ast::Expression {
    rest.into_iter()
        .fold(first, |left, (op, right)| ast::Expression::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
}

fn parse_unary() -> impl Parser<Token, ast::Expression> {
    with_context(
        choice(vec![
            Box::new(map(
                tuple2(
                    as_unit(equal(Token::Operator(Operator::Minus))),
                    lazy(parse_unary),
                ),
                |(_, operand)| ast::Expression::Negate(Box::new(operand)),
            )),
            Box::new(parse_primary()),
        ]),
        "unary",
    )
}

fn parse_primary() -> impl Parser<Token, ast::Expression> {
    with_context(
        choice(vec![
            Box::new(parse_number()),
            Box::new(parse_function_call()),
            Box::new(parse_parenthesized()),
        ]),
        "primary",
    )
}

fn parse_number() -> impl Parser<Token, ast::Expression> {
    satisfy(
        |token: &Token| match token {
            Token::Number(value) => Some(ast::Expression::Number(*value)),
            _ => None,
        },
        "number",
    )
}

fn parse_function_call() -> impl Parser<Token, ast::Expression> {
    map(
        tuple2(parse_function_name(), parse_parenthesized()),
        |(function, argument)| ast::Expression::FunctionCall {
            function,
            argument: Box::new(argument),
        },
    )
}

fn parse_function_name() -> impl Parser<Token, String> {
    satisfy(
        |token: &Token| match token {
            Token::Identifier(name) => Some(name.clone()),
            _ => None,
        },
        "function name",
    )
}

/// `'(' expression ')'`, used both for grouping and for function arguments.
///
/// Once the opening parenthesis has matched, running out of input inside the
/// group is reported as a missing closing parenthesis rather than a bare
/// end-of-input.
fn parse_parenthesized() -> impl Parser<Token, ast::Expression> {
    delimited(
        as_unit(equal(Token::Delimiter(Delimiter::OpenParen))),
        map_err(lazy(parse_expression), |e| match e {
            ParseError::UnexpectedEof { position, .. } => {
                ParseError::MissingCloseParen { position }
            }
            other => other,
        }),
        parse_close_paren(),
    )
}

fn parse_close_paren() -> impl Parser<Token, ()> {
    map_err(
        as_unit(equal(Token::Delimiter(Delimiter::CloseParen))),
        |e| ParseError::MissingCloseParen {
            position: e.position(),
        },
    )
}

fn parse_operator_add() -> impl Parser<Token, ast::BinaryOperator> {
    map(equal(Token::Operator(Operator::Plus)), |_| {
        ast::BinaryOperator::Add
    })
}

fn parse_operator_subtract() -> impl Parser<Token, ast::BinaryOperator> {
    map(equal(Token::Operator(Operator::Minus)), |_| {
        ast::BinaryOperator::Subtract
    })
}

fn parse_operator_multiply() -> impl Parser<Token, ast::BinaryOperator> {
    map(equal(Token::Operator(Operator::Multiply)), |_| {
        ast::BinaryOperator::Multiply
    })
}

fn parse_operator_divide() -> impl Parser<Token, ast::BinaryOperator> {
    map(equal(Token::Operator(Operator::Divide)), |_| {
        ast::BinaryOperator::Divide
    })
}

fn parse_operator_modulo() -> impl Parser<Token, ast::BinaryOperator> {
    map(equal(Token::Operator(Operator::Percent)), |_| {
        ast::BinaryOperator::Modulo
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, Expression};
    use crate::tokenizer::token::Tokenizer;
    use pretty_assertions::assert_eq;

    fn tokens(input: &str) -> Vec<Token> {
        Tokenizer::new()
            .tokenize(input)
            .unwrap()
            .into_iter()
            .map(|span| span.token)
            .collect()
    }

    fn parse(input: &str) -> Result<(usize, Expression), ParseError> {
        parse_expression().parse(&tokens(input), 0)
    }

    fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Expression {
        Expression::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_parse_number() {
        let (pos, expr) = parse("42").unwrap();
        assert_eq!(pos, 1);
        assert_eq!(expr, Expression::Number(42.0));
    }

    #[test]
    fn test_parse_addition() {
        let (pos, expr) = parse("5+3").unwrap();
        assert_eq!(pos, 3);
        assert_eq!(
            expr,
            binary(
                BinaryOperator::Add,
                Expression::Number(5.0),
                Expression::Number(3.0)
            )
        );
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let (_, expr) = parse("2+3*4").unwrap();
        assert_eq!(
            expr,
            binary(
                BinaryOperator::Add,
                Expression::Number(2.0),
                binary(
                    BinaryOperator::Multiply,
                    Expression::Number(3.0),
                    Expression::Number(4.0)
                )
            )
        );
    }

    #[test]
    fn test_subtraction_associates_left() {
        let (_, expr) = parse("10-2-3").unwrap();
        assert_eq!(
            expr,
            binary(
                BinaryOperator::Subtract,
                binary(
                    BinaryOperator::Subtract,
                    Expression::Number(10.0),
                    Expression::Number(2.0)
                ),
                Expression::Number(3.0)
            )
        );
    }

    #[test]
    fn test_modulo_shares_multiplicative_precedence() {
        let (_, expr) = parse("10%3+1").unwrap();
        assert_eq!(
            expr,
            binary(
                BinaryOperator::Add,
                binary(
                    BinaryOperator::Modulo,
                    Expression::Number(10.0),
                    Expression::Number(3.0)
                ),
                Expression::Number(1.0)
            )
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let (_, expr) = parse("(2+3)*4").unwrap();
        assert_eq!(
            expr,
            binary(
                BinaryOperator::Multiply,
                binary(
                    BinaryOperator::Add,
                    Expression::Number(2.0),
                    Expression::Number(3.0)
                ),
                Expression::Number(4.0)
            )
        );
    }

    #[test]
    fn test_function_call() {
        let (_, expr) = parse("sqrt(16)").unwrap();
        assert_eq!(
            expr,
            Expression::FunctionCall {
                function: "sqrt".to_string(),
                argument: Box::new(Expression::Number(16.0)),
            }
        );
    }

    #[test]
    fn test_function_call_with_nested_expression() {
        let (_, expr) = parse("log(2.718*1)").unwrap();
        assert_eq!(
            expr,
            Expression::FunctionCall {
                function: "log".to_string(),
                argument: Box::new(binary(
                    BinaryOperator::Multiply,
                    Expression::Number(2.718),
                    Expression::Number(1.0)
                )),
            }
        );
    }

    #[test]
    fn test_unary_minus() {
        let (_, expr) = parse("-5+3").unwrap();
        assert_eq!(
            expr,
            binary(
                BinaryOperator::Add,
                Expression::Negate(Box::new(Expression::Number(5.0))),
                Expression::Number(3.0)
            )
        );
    }

    #[test]
    fn test_unary_minus_nests() {
        let (_, expr) = parse("--5").unwrap();
        assert_eq!(
            expr,
            Expression::Negate(Box::new(Expression::Negate(Box::new(Expression::Number(
                5.0
            )))))
        );
    }

    #[test]
    fn test_unary_minus_on_group() {
        let (_, expr) = parse("-(2+3)").unwrap();
        assert_eq!(
            expr,
            Expression::Negate(Box::new(binary(
                BinaryOperator::Add,
                Expression::Number(2.0),
                Expression::Number(3.0)
            )))
        );
    }

    #[test]
    fn test_unterminated_function_argument() {
        let error = parse("sqrt(").unwrap_err();
        assert_eq!(error, ParseError::MissingCloseParen { position: 2 });
    }

    #[test]
    fn test_unterminated_group() {
        let error = parse("(2+3").unwrap_err();
        assert_eq!(error, ParseError::MissingCloseParen { position: 4 });
    }

    #[test]
    fn test_group_closed_by_wrong_token() {
        let error = parse("(2 5").unwrap_err();
        assert_eq!(error, ParseError::MissingCloseParen { position: 2 });
    }

    #[test]
    fn test_empty_input_is_eof() {
        let error = parse("").unwrap_err();
        assert!(matches!(error, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_leftover_input_is_not_consumed() {
        let (pos, expr) = parse("2 3").unwrap();
        assert_eq!(pos, 1);
        assert_eq!(expr, Expression::Number(2.0));
    }

    #[test]
    fn test_operator_without_left_operand() {
        let error = parse("*2").unwrap_err();
        assert!(matches!(
            error,
            ParseError::NoAlternative { .. } | ParseError::UnexpectedToken { .. }
        ));
    }
}
