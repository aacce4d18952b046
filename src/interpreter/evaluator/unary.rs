use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// Evaluates a unary operation on a value.
///
/// Supported operators:
/// - `Negate`: integer negation.
/// - `Not`: boolean negation.
///
/// # Example
/// ```
/// use gcl::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::eval_unary, value::Value},
/// };
///
/// assert_eq!(eval_unary(UnaryOperator::Negate, Value::Integer(5), 1).unwrap(),
///            Value::Integer(-5));
/// assert_eq!(eval_unary(UnaryOperator::Not, Value::Bool(false), 1).unwrap(),
///            Value::Bool(true));
/// ```
pub fn eval_unary(op: UnaryOperator, value: Value, line: usize) -> EvalResult<Value> {
    match op {
        UnaryOperator::Negate => {
            let n = value.as_integer(line)?;
            n.checked_neg()
             .map(Value::Integer)
             .ok_or(RuntimeError::Overflow { line })
        },
        UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),
    }
}
