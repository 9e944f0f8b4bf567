use super::{EvalError, EvalResult};
use crate::ast::{BinaryOperator, Expression};

/// Walks a parsed expression tree and computes its numeric value.
///
/// Evaluation is pure: the same tree always produces the same result, and
/// arithmetic failures come back as [`EvalError`] values.
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn eval_expression(&self, expr: &Expression) -> EvalResult<f64> {
        match expr {
            Expression::Number(value) => Ok(*value),
            Expression::Negate(operand) => Ok(-self.eval_expression(operand)?),
            Expression::FunctionCall { function, argument } => {
                let arg = self.eval_expression(argument)?;
                self.apply_function(function, arg)
            }
            Expression::BinaryOp { op, left, right } => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                self.eval_binary_op(op, left, right)
            }
        }
    }

    fn eval_binary_op(&self, op: &BinaryOperator, left: f64, right: f64) -> EvalResult<f64> {
        match op {
            BinaryOperator::Add => self.eval_add(left, right),
            BinaryOperator::Subtract => self.eval_subtract(left, right),
            BinaryOperator::Multiply => self.eval_multiply(left, right),
            BinaryOperator::Divide => self.eval_divide(left, right),
            BinaryOperator::Modulo => self.eval_modulo(left, right),
        }
    }

    fn eval_add(&self, left: f64, right: f64) -> EvalResult<f64> {
        Ok(left + right)
    }

    fn eval_subtract(&self, left: f64, right: f64) -> EvalResult<f64> {
        Ok(left - right)
    }

    fn eval_multiply(&self, left: f64, right: f64) -> EvalResult<f64> {
        Ok(left * right)
    }

    fn eval_divide(&self, left: f64, right: f64) -> EvalResult<f64> {
        if right == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(left / right)
    }

    /// Modulo is defined for integer operands only, matching the usual
    /// behavior of `%` in integer arithmetic.
    fn eval_modulo(&self, left: f64, right: f64) -> EvalResult<f64> {
        if left.fract() != 0.0 || right.fract() != 0.0 {
            return Err(EvalError::InvalidModulo);
        }
        if right == 0.0 {
            return Err(EvalError::ModuloByZero);
        }
        Ok(((left as i64) % (right as i64)) as f64)
    }

    fn apply_function(&self, name: &str, arg: f64) -> EvalResult<f64> {
        match name {
            "sqrt" => Ok(arg.sqrt()),
            "sin" => Ok(arg.sin()),
            "cos" => Ok(arg.cos()),
            "log" => Ok(arg.ln()),
            _ => Err(EvalError::UnknownFunction {
                name: name.to_string(),
            }),
        }
    }
}

impl Default for ExpressionEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
