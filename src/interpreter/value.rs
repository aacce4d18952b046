use crate::{ast::LiteralValue, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Represents a runtime value in the interpreter.
///
/// Expressions evaluate to integers or booleans. Reading an array element that
/// does not exist yields `Absent`, which is neither. It can be printed and
/// tested with `=`/`!=`, where it differs from every integer; any other use
/// is a type mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A boolean, produced by comparisons, logic and the `true`/`false`
    /// literals. Guards must evaluate to one.
    Bool(bool),
    /// The result of reading outside an array, or from an array that does not
    /// exist.
    Absent,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Self::Absent, Self::Integer)
    }
}

impl From<LiteralValue> for Value {
    fn from(v: LiteralValue) -> Self {
        match v {
            LiteralValue::Integer(n) => Self::Integer(n),
            LiteralValue::Bool(b) => Self::Bool(b),
        }
    }
}

impl Value {
    /// Converts the value to `i64`, or returns an error if it is not an
    /// integer.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use gcl::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Integer(3).as_integer(1).unwrap(), 3);
    /// assert!(Value::Absent.as_integer(1).is_err());
    /// ```
    pub fn as_integer(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(RuntimeError::TypeMismatch { details: format!("expected an integer, found {}",
                                                                   self.type_name()),
                                                  line }),
        }
    }

    /// Converts the value to `bool`, or returns an error if it is not a
    /// boolean.
    ///
    /// Used for guards and logical operations.
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::TypeMismatch { details: format!("expected a boolean, found {}",
                                                                   self.type_name()),
                                                  line }),
        }
    }

    /// Name of the value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Bool(_) => "boolean",
            Self::Absent => "absent value",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Absent => write!(f, "absent"),
        }
    }
}
