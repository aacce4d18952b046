/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unexpected tokens, missing delimiters, oversized literals and
/// premature end of input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing a program:
/// undefined variables, type mismatches, unsupported constructs and
/// arithmetic faults.
pub mod runtime_error;
/// Control-flow graph construction errors.
pub mod graph_error;

pub use graph_error::GraphError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure surfaced by the public entry points.
///
/// A program is parsed and then either evaluated or compiled into a
/// control-flow graph; each phase contributes its own error type, and this
/// enum unifies them for callers that drive the whole pipeline.
#[derive(Debug)]
pub enum Error {
    /// The program text could not be parsed.
    Parse(ParseError),
    /// Evaluation aborted.
    Runtime(RuntimeError),
    /// Control-flow graph construction aborted.
    Graph(GraphError),
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

impl From<GraphError> for Error {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
            Self::Graph(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
            Self::Graph(e) => Some(e),
        }
    }
}
