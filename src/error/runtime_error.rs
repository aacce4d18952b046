#[derive(Debug, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
///
/// Every variant is fatal and aborts the run. Out-of-range array accesses are
/// deliberately absent from this list: reads produce an absent value and
/// writes are ignored.
pub enum RuntimeError {
    /// Tried to read a variable that was never assigned or initialized.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Reached a construct that is recognized but has no semantics, such as a
    /// guarded command with several alternatives.
    UnsupportedConstruct {
        /// The construct, rendered as source text.
        construct: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Attempted division (or remainder) by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `print` could not write to its output.
    OutputFailed {
        /// The underlying I/O error, rendered.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, line } => {
                write!(f, "Error on line {line}: Undefined variable '{name}'.")
            },
            Self::TypeMismatch { details, line } => {
                write!(f, "Error on line {line}: Type mismatch: {details}.")
            },
            Self::UnsupportedConstruct { construct, line } => write!(f,
                                                                     "Error on line {line}: Unsupported construct: {construct}"),
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Integer overflow while trying to compute result."),
            Self::OutputFailed { details, line } => {
                write!(f, "Error on line {line}: Failed to print: {details}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
