#[derive(Debug, PartialEq, Eq)]
/// Represents all errors that can occur while building a control-flow graph.
pub enum GraphError {
    /// The builder reached a guarded command with several alternatives.
    UnsupportedConstruct {
        /// The construct, rendered as source text.
        construct: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// The node counter disagrees with the number of nodes in the graph after
    /// construction. Indicates a defect in the builder, not in the program.
    GraphInvariantViolation {
        /// The value of the allocation counter.
        counter: usize,
        /// The number of nodes in the graph, including entry and exit.
        nodes:   usize,
    },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedConstruct { construct, line } => write!(f,
                                                                     "Error on line {line}: Cannot build a control-flow graph for: {construct}"),
            Self::GraphInvariantViolation { counter, nodes } => write!(f,
                                                                       "Internal error: node counter is {counter} but the graph holds {nodes} nodes."),
        }
    }
}

impl std::error::Error for GraphError {}
