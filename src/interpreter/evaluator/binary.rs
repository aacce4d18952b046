use std::io::Write;

use log::trace;

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        memory::Memory,
        value::Value,
    },
};

impl<W: Write> Evaluator<W> {
    /// Evaluates a binary operation node.
    ///
    /// `&&` and `||` decide from their left operand when they can and only
    /// then evaluate the right one. Every other operator, including the strict
    /// `&` and `|`, evaluates both operands left to right before combining
    /// them.
    ///
    /// # Parameters
    /// - `left`: Left operand.
    /// - `op`: The operator.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    /// - `memory`: The program state to read from.
    pub fn eval_binary_op(&self,
                          left: &Expr,
                          op: BinaryOperator,
                          right: &Expr,
                          line: usize,
                          memory: &Memory)
                          -> EvalResult<Value> {
        match op {
            BinaryOperator::AndCut => {
                if !self.eval_bool(left, memory)? {
                    trace!("line {line}: '&&' short-circuited on a false left operand");
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval_bool(right, memory)?))
            },
            BinaryOperator::OrCut => {
                if self.eval_bool(left, memory)? {
                    trace!("line {line}: '||' short-circuited on a true left operand");
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval_bool(right, memory)?))
            },
            _ => {
                let left = self.eval(left, memory)?;
                let right = self.eval(right, memory)?;
                eval_binary(op, left, right, line)
            },
        }
    }
}

/// Combines two already evaluated operands.
///
/// Arithmetic and the ordering comparisons require integers; logical
/// operators require booleans. `=` and `!=` also accept an absent array
/// element: it equals only another absent value and differs from every
/// integer. Any other mix is a `TypeMismatch`.
///
/// # Example
/// ```
/// use gcl::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::eval_binary, value::Value},
/// };
///
/// let sum = eval_binary(BinaryOperator::Add, Value::Integer(3), Value::Integer(4), 1).unwrap();
/// assert_eq!(sum, Value::Integer(7));
///
/// let cmp = eval_binary(BinaryOperator::LessEqual, Value::Integer(3), Value::Integer(4), 1).unwrap();
/// assert_eq!(cmp, Value::Bool(true));
///
/// let eq = eval_binary(BinaryOperator::Equal, Value::Absent, Value::Integer(0), 1).unwrap();
/// assert_eq!(eq, Value::Bool(false));
///
/// assert!(eval_binary(BinaryOperator::Add, Value::Absent, Value::Integer(4), 1).is_err());
/// assert!(eval_binary(BinaryOperator::Less, Value::Absent, Value::Integer(4), 1).is_err());
/// ```
pub fn eval_binary(op: BinaryOperator, left: Value, right: Value, line: usize) -> EvalResult<Value> {
    use BinaryOperator::{
        And, AndCut, Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual, Or, OrCut,
    };
    use Value::{Absent, Bool, Integer};

    let result = match (op, left, right) {
        (_, Integer(a), Integer(b)) if op.is_arithmetic() => {
            return eval_arithmetic(op, a, b, line).map(Integer);
        },
        (Equal, Integer(a), Integer(b)) => a == b,
        (NotEqual, Integer(a), Integer(b)) => a != b,
        (Greater, Integer(a), Integer(b)) => a > b,
        (GreaterEqual, Integer(a), Integer(b)) => a >= b,
        (Less, Integer(a), Integer(b)) => a < b,
        (LessEqual, Integer(a), Integer(b)) => a <= b,
        (Equal | NotEqual, Absent, Absent) => op == Equal,
        (Equal | NotEqual, Absent, Integer(_)) | (Equal | NotEqual, Integer(_), Absent) => {
            op == NotEqual
        },
        (And | AndCut, Bool(a), Bool(b)) => a && b,
        (Or | OrCut, Bool(a), Bool(b)) => a || b,
        _ => return Err(mismatch(op, left, right, line)),
    };

    Ok(Bool(result))
}

/// Integer arithmetic with overflow checks.
///
/// Division truncates toward zero and the remainder takes the sign of the
/// dividend, so `a == (a / b) * b + a % b` always holds.
///
/// # Errors
/// - `DivisionByZero` for `/` or `%` with `b == 0`.
/// - `Overflow` when the result does not fit in an `i64`.
/// - `TypeMismatch` when `op` is not one of `+ - * / %`.
///
/// # Example
/// ```
/// use gcl::{ast::BinaryOperator, interpreter::evaluator::binary::eval_arithmetic};
///
/// assert_eq!(eval_arithmetic(BinaryOperator::Div, -7, 2, 1).unwrap(), -3);
/// assert_eq!(eval_arithmetic(BinaryOperator::Mod, -7, 2, 1).unwrap(), -1);
/// assert!(eval_arithmetic(BinaryOperator::Div, 1, 0, 1).is_err());
/// assert!(eval_arithmetic(BinaryOperator::Less, 1, 2, 1).is_err());
/// ```
pub fn eval_arithmetic(op: BinaryOperator, a: i64, b: i64, line: usize) -> EvalResult<i64> {
    let result = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Sub => a.checked_sub(b),
        BinaryOperator::Mul => a.checked_mul(b),
        BinaryOperator::Div | BinaryOperator::Mod if b == 0 => {
            return Err(RuntimeError::DivisionByZero { line });
        },
        BinaryOperator::Div => a.checked_div(b),
        BinaryOperator::Mod => a.checked_rem(b),
        _ => {
            return Err(RuntimeError::TypeMismatch { details: format!("{op} is not an arithmetic operator"),
                                                    line });
        },
    };

    result.ok_or(RuntimeError::Overflow { line })
}

fn mismatch(op: BinaryOperator, left: Value, right: Value, line: usize) -> RuntimeError {
    RuntimeError::TypeMismatch { details: format!("Cannot use {op} on {} and {}",
                                                  left.type_name(),
                                                  right.type_name()),
                                 line }
}
