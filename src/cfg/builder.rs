use log::{debug, trace};
use petgraph::graph::NodeIndex;

use crate::{
    ast::{Command, Expr, GuardedCommand},
    cfg::graph::{Action, ProgramGraph},
    error::GraphError,
};

/// Builds a [`ProgramGraph`] from a parsed command by recursive
/// decomposition between a start and an end node.
///
/// A builder is consumed by [`CfgBuilder::build`]; each graph gets a fresh
/// one, so the node counter always starts at `1`.
///
/// # Example
/// ```
/// use gcl::{cfg::CfgBuilder, interpreter::parser::core::parse_source};
///
/// let command = parse_source("y := 1; do x > 0 -> y := x * y; x := x - 1 od").unwrap();
/// let graph = CfgBuilder::new().build(&command).unwrap();
///
/// assert_eq!(graph.node_count(), 5);
/// assert_eq!(graph.edge_count(), 5);
/// ```
#[derive(Debug)]
pub struct CfgBuilder {
    graph:   ProgramGraph,
    counter: usize,
}

impl Default for CfgBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CfgBuilder {
    /// Creates a builder holding only the entry and exit nodes.
    #[must_use]
    pub fn new() -> Self {
        Self { graph:   ProgramGraph::new(),
               counter: 1, }
    }

    /// Decomposes `command` between entry and exit and returns the finished
    /// graph.
    ///
    /// # Errors
    /// - `UnsupportedConstruct` if the program contains a guarded command
    ///   with more than one alternative.
    /// - `GraphInvariantViolation` if the node counter disagrees with the
    ///   number of nodes created.
    pub fn build(mut self, command: &Command) -> Result<ProgramGraph, GraphError> {
        let (entry, exit) = (self.graph.entry(), self.graph.exit());
        self.make_edge(command, entry, exit)?;
        self.finish()
    }

    fn finish(self) -> Result<ProgramGraph, GraphError> {
        let nodes = self.graph.node_count();
        if self.counter != nodes - 1 {
            return Err(GraphError::GraphInvariantViolation { counter: self.counter,
                                                             nodes });
        }
        debug!("built graph with {nodes} nodes and {} edges",
               self.graph.edge_count());
        Ok(self.graph)
    }

    fn make_node(&mut self) -> NodeIndex {
        let node = self.graph.add_point(self.counter);
        trace!("allocated q{}", self.counter);
        self.counter += 1;
        node
    }

    fn make_edge(&mut self,
                 command: &Command,
                 start: NodeIndex,
                 end: NodeIndex)
                 -> Result<(), GraphError> {
        match command {
            Command::Sequence { .. } => {
                let mut current = command;
                let mut from = start;
                while let Command::Sequence { first, second } = current {
                    let middle = self.make_node();
                    self.make_edge(first, from, middle)?;
                    from = middle;
                    current = second.as_ref();
                }
                self.make_edge(current, from, end)
            },
            Command::If { body, .. } => self.make_guarded_edge(body, start, end),
            Command::Do { body, .. } => {
                let guard = single_guard(body)?;
                self.make_guarded_edge(body, start, start)?;
                self.add(start, end, Action::Guard(guard.negated()));
                Ok(())
            },
            Command::Assign { .. }
            | Command::ArrayAssign { .. }
            | Command::ReadVar { .. }
            | Command::ReadArray { .. }
            | Command::Write { .. }
            | Command::Skip { .. }
            | Command::Break { .. }
            | Command::Continue { .. }
            | Command::Print { .. } => {
                self.add(start, end, Action::Command(command.clone()));
                Ok(())
            },
        }
    }

    /// `start --guard--> n`, then the guarded command from `n` to `end`.
    ///
    /// No edge is added for a false guard.
    fn make_guarded_edge(&mut self,
                         body: &GuardedCommand,
                         start: NodeIndex,
                         end: NodeIndex)
                         -> Result<(), GraphError> {
        match body {
            GuardedCommand::Cond { guard, command, .. } => {
                let after_guard = self.make_node();
                self.add(start, after_guard, Action::Guard(guard.clone()));
                self.make_edge(command, after_guard, end)
            },
            GuardedCommand::Case { .. } => Err(unsupported(body)),
        }
    }

    fn add(&mut self, start: NodeIndex, end: NodeIndex, action: Action) {
        trace!("edge {} -> {}: {action}",
               self.graph.point(start),
               self.graph.point(end));
        self.graph.add_transition(start, end, action);
    }
}

fn single_guard(body: &GuardedCommand) -> Result<&Expr, GraphError> {
    match body {
        GuardedCommand::Cond { guard, .. } => Ok(guard),
        GuardedCommand::Case { .. } => Err(unsupported(body)),
    }
}

fn unsupported(body: &GuardedCommand) -> GraphError {
    GraphError::UnsupportedConstruct { construct: format!("multiple guards in '{body}'"),
                                       line:      body.line_number(), }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_mismatch_is_reported() {
        let mut builder = CfgBuilder::new();
        builder.make_node();
        builder.counter += 1;

        assert_eq!(builder.finish().unwrap_err(),
                   GraphError::GraphInvariantViolation { counter: 3,
                                                         nodes:   3, });
    }

    #[test]
    fn skip_is_a_single_edge() {
        let graph = CfgBuilder::new().build(&Command::Skip { line: 1 }).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges(),
                   vec![("Entry".to_string(), "Exit".to_string(), "skip".to_string())]);
    }
}
