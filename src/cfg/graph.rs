use std::fmt;

use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::ast::{Command, Expr};

/// A node of the control-flow graph: a point between atomic commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramPoint {
    /// Where execution starts (id `0`).
    Entry,
    /// Where execution ends (sentinel id `-1`).
    Exit,
    /// An intermediate point, numbered from `1` in allocation order.
    Point(usize),
}

impl ProgramPoint {
    /// Numeric identifier of the point: `0` for entry, `-1` for exit.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn id(self) -> i64 {
        match self {
            Self::Entry => 0,
            Self::Exit => -1,
            Self::Point(n) => n as i64,
        }
    }
}

impl fmt::Display for ProgramPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => write!(f, "Entry"),
            Self::Exit => write!(f, "Exit"),
            Self::Point(n) => write!(f, "q{n}"),
        }
    }
}

/// What happens along an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// An atomic command is executed.
    Command(Command),
    /// A guard is tested; the edge is taken when it holds.
    Guard(Expr),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(command) => write!(f, "{command}"),
            Self::Guard(guard) => write!(f, "{guard}"),
        }
    }
}

/// An edge of the control-flow graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The command or guard this edge stands for.
    pub action: Action,
    /// `action` rendered as program text.
    pub label:  String,
}

/// A control-flow graph.
///
/// Nodes and edges live in a single `petgraph` arena and are addressed by
/// index. Entry and exit are created with the graph; everything else is added
/// by [`crate::cfg::CfgBuilder`] during one construction pass and never
/// changed afterwards.
#[derive(Debug, Clone)]
pub struct ProgramGraph {
    graph: DiGraph<ProgramPoint, Transition>,
    entry: NodeIndex,
    exit:  NodeIndex,
}

impl ProgramGraph {
    pub(crate) fn new() -> Self {
        let mut graph = DiGraph::new();
        let entry = graph.add_node(ProgramPoint::Entry);
        let exit = graph.add_node(ProgramPoint::Exit);
        Self { graph, entry, exit }
    }

    pub(crate) fn add_point(&mut self, number: usize) -> NodeIndex {
        self.graph.add_node(ProgramPoint::Point(number))
    }

    pub(crate) fn add_transition(&mut self,
                                 from: NodeIndex,
                                 to: NodeIndex,
                                 action: Action)
                                 -> EdgeIndex {
        let label = action.to_string();
        self.graph.add_edge(from, to, Transition { action, label })
    }

    /// Index of the entry node.
    #[must_use]
    pub const fn entry(&self) -> NodeIndex {
        self.entry
    }

    /// Index of the exit node.
    #[must_use]
    pub const fn exit(&self) -> NodeIndex {
        self.exit
    }

    /// Number of nodes, entry and exit included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The program point stored at `index`.
    ///
    /// # Panics
    /// If `index` does not belong to this graph.
    #[must_use]
    pub fn point(&self, index: NodeIndex) -> ProgramPoint {
        self.graph[index]
    }

    /// Node labels in creation order: `"Entry"`, `"Exit"`, then `"q1"`,
    /// `"q2"`, ...
    #[must_use]
    pub fn nodes(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|i| self.graph[i].to_string())
            .collect()
    }

    /// Edges in creation order as `(source, destination, label)`.
    #[must_use]
    pub fn edges(&self) -> Vec<(String, String, String)> {
        self.transitions()
            .map(|(from, to, t)| (from.to_string(), to.to_string(), t.label.clone()))
            .collect()
    }

    /// Edges in creation order with their endpoints.
    pub fn transitions(&self) -> impl Iterator<Item = (ProgramPoint, ProgramPoint, &Transition)> {
        self.graph.edge_references().map(|e| {
                                        (self.graph[e.source()], self.graph[e.target()], e.weight())
                                    })
    }

    /// Edges ending at `node`.
    #[must_use]
    pub fn in_edges(&self, node: NodeIndex) -> Vec<&Transition> {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| e.weight())
            .collect()
    }

    /// Edges starting at `node`.
    #[must_use]
    pub fn out_edges(&self, node: NodeIndex) -> Vec<&Transition> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| e.weight())
            .collect()
    }

    /// Node indices in creation order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    /// The underlying `petgraph` graph, for analyses that want its
    /// algorithms.
    #[must_use]
    pub const fn as_graph(&self) -> &DiGraph<ProgramPoint, Transition> {
        &self.graph
    }
}
