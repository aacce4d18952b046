use std::io::Write;

use crate::{
    ast::{Command, Expr, GuardedCommand},
    error::RuntimeError,
    interpreter::{
        evaluator::unary::eval_unary,
        memory::Memory,
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a command finished.
///
/// `Break` and `Continue` travel upward through sequencing until the nearest
/// enclosing `do` consumes them. They are ordinary results, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Completed; continue with the next command.
    Normal,
    /// A `break` was executed.
    Break,
    /// A `continue` was executed.
    Continue,
}

/// Tree-walking evaluator for guarded command programs.
///
/// The evaluator holds no program state. Memory is passed explicitly into
/// every call, so the same evaluator can execute any number of independent
/// runs. The only thing it owns is the sink `print` writes to.
///
/// ## Usage
///
/// ```
/// use gcl::{
///     interpreter::{
///         evaluator::core::{Evaluator, Signal},
///         memory::Memory,
///         parser::core::parse_source,
///     },
/// };
///
/// let program = parse_source("x := 6 * 7; print x").unwrap();
/// let mut memory = Memory::new();
/// let mut evaluator = Evaluator::with_output(Vec::<u8>::new());
///
/// let signal = evaluator.exec(&program, &mut memory).unwrap();
///
/// assert_eq!(signal, Signal::Normal);
/// assert_eq!(memory.read_var("x"), Some(42));
/// assert_eq!(evaluator.into_output(), b"42\n");
/// ```
pub struct Evaluator<W: Write> {
    pub(crate) out: W,
}

impl<W: Write> Evaluator<W> {
    /// Creates an evaluator that prints to `out`.
    pub const fn with_output(out: W) -> Self {
        Self { out }
    }

    /// Consumes the evaluator and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Expressions
    /// have no side effects, so memory is only read.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `memory`: The program state to read from.
    ///
    /// # Returns
    /// An integer, a boolean, or `Value::Absent` for an array read outside
    /// the array.
    pub fn eval(&self, expr: &Expr, memory: &Memory) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(*value)),
            Expr::Variable { name, line } => Self::eval_variable(name, *line, memory),
            Expr::ArrayIndex { array, index, .. } => {
                self.eval_array_index(array, index, memory)
            },
            Expr::UnaryOp { op, expr, line } => {
                let value = self.eval(expr, memory)?;
                eval_unary(*op, value, *line)
            },
            Expr::BinaryOp { left, op, right, line } => {
                self.eval_binary_op(left, *op, right, *line, memory)
            },
            Expr::Grouping { expr, .. } => self.eval(expr, memory),
        }
    }

    /// Looks up a variable by name.
    ///
    /// # Errors
    /// `UndefinedVariable` if the name was never initialized or assigned.
    pub fn eval_variable(name: &str, line: usize, memory: &Memory) -> EvalResult<Value> {
        memory.read_var(name)
              .map(Value::Integer)
              .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                               line })
    }

    /// Reads `array[index]`.
    ///
    /// The index must evaluate to an integer. A missing array or an index
    /// outside `[0, len)` is not an error: the result is `Value::Absent`.
    pub fn eval_array_index(&self, array: &str, index: &Expr, memory: &Memory) -> EvalResult<Value> {
        let index = self.eval_integer(index, memory)?;
        Ok(memory.read_array_element(array, index).into())
    }

    /// Evaluates an expression that must produce an integer.
    pub fn eval_integer(&self, expr: &Expr, memory: &Memory) -> EvalResult<i64> {
        self.eval(expr, memory)?.as_integer(expr.line_number())
    }

    /// Evaluates an expression that must produce a boolean.
    pub fn eval_bool(&self, expr: &Expr, memory: &Memory) -> EvalResult<bool> {
        self.eval(expr, memory)?.as_bool(expr.line_number())
    }

    /// Splits a guarded command into its only guard and command.
    ///
    /// # Errors
    /// `UnsupportedConstruct` for a `[]` choice between several guards.
    pub(crate) fn single_guard(body: &GuardedCommand) -> EvalResult<(&Expr, &Command)> {
        match body {
            GuardedCommand::Cond { guard, command, .. } => Ok((guard, command.as_ref())),
            GuardedCommand::Case { line, .. } => {
                Err(RuntimeError::UnsupportedConstruct { construct: format!("multiple guards in '{body}'"),
                                                         line:      *line, })
            },
        }
    }
}
