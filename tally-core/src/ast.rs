//! Abstract syntax tree for arithmetic expressions.

/// A parsed arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Numeric literal
    Number(f64),
    /// Unary negation (`-x`)
    Negate(Box<Expression>),
    /// Named function applied to one argument, e.g. `sqrt(16)`
    FunctionCall {
        function: String,
        argument: Box<Expression>,
    },
    /// Binary arithmetic operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

/// Binary operators, in evaluation semantics rather than source spelling.
#[derive(Debug, Clone, PartialEq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}
