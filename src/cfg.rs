//! Control-flow graph construction.
//!
//! A program is compiled into a graph whose nodes are program points and
//! whose edges are atomic transitions, each labeled with either a command or
//! a guard. The graph is built without running the program and is meant as
//! input for later analyses.

/// Graph model: program points, transitions and the graph that owns them.
pub mod graph;

/// Recursive decomposition of a command into the graph.
pub mod builder;

/// Graphviz export.
mod dot;

pub use builder::CfgBuilder;
pub use graph::{Action, ProgramGraph, ProgramPoint, Transition};
