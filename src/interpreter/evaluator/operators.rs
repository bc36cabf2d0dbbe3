use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    util::num::nums_equal,
};

impl Interpreter {
    /// Applies a unary operator to an evaluated operand.
    ///
    /// `-` negates a number and rejects everything else; `!` negates
    /// truthiness and accepts any value.
    pub(crate) fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => {
                let number = value.as_num(RuntimeError::OperandMustBeNumber { line })?;
                Ok(Value::Num(-number))
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.truthy())),
        }
    }

    /// Applies an arithmetic, comparison or equality operator to evaluated
    /// operands.
    ///
    /// Arithmetic requires numbers, with `+` additionally accepting two
    /// strings for concatenation; a divisor within epsilon of zero is an
    /// error. The ordering comparisons are numeric and resolve ties by
    /// epsilon first: `<=` and `>=` hold for epsilon-equal operands, `<` and
    /// `>` never do. `==` and `!=` use structural equality over any pair of
    /// values.
    pub(crate) fn eval_binary(left: &Value,
                              op: BinaryOperator,
                              right: &Value,
                              line: usize)
                              -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => match (left, right) {
                (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a + b)),
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
                _ => Err(RuntimeError::AddOperandsMismatch { line }),
            },
            BinaryOperator::Sub => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Value::Num(a - b))
            },
            BinaryOperator::Mul => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Value::Num(a * b))
            },
            BinaryOperator::Div => {
                let (a, b) = numeric_operands(left, right, line)?;
                if nums_equal(b, 0.0) {
                    return Err(RuntimeError::DivisionByZero { line });
                }
                Ok(Value::Num(a / b))
            },
            BinaryOperator::Pow => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Value::Num(a.powf(b)))
            },
            BinaryOperator::Less => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Value::Bool(!nums_equal(a, b) && a < b))
            },
            BinaryOperator::LessEqual => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Value::Bool(nums_equal(a, b) || a < b))
            },
            BinaryOperator::Greater => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Value::Bool(!nums_equal(a, b) && a > b))
            },
            BinaryOperator::GreaterEqual => {
                let (a, b) = numeric_operands(left, right, line)?;
                Ok(Value::Bool(nums_equal(a, b) || a > b))
            },
            BinaryOperator::Equal => Ok(Value::Bool(left.equals(right))),
            BinaryOperator::NotEqual => Ok(Value::Bool(!left.equals(right))),
        }
    }
}

fn numeric_operands(left: &Value, right: &Value, line: usize) -> EvalResult<(f64, f64)> {
    let a = left.as_num(RuntimeError::OperandsMustBeNumbers { line })?;
    let b = right.as_num(RuntimeError::OperandsMustBeNumbers { line })?;
    Ok((a, b))
}
