//! # gcl
//!
//! gcl is an interpreter and control-flow-graph builder for the Guarded
//! Command Language written in Rust.
//! It parses programs built from assignments, guarded alternation (`if`) and
//! repetition (`do`), evaluates them over an explicit memory of integer
//! variables and arrays, and compiles them into program graphs for analysis.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use log::debug;

/// Defines the structure of parsed programs.
///
/// This module declares the `Expr`, `GuardedCommand` and `Command` enums that
/// represent a program as a tree. The AST is built by the parser and consumed
/// by both the evaluator and the control-flow-graph builder; its `Display`
/// implementations render nodes back to source text for edge labels and error
/// messages.
pub mod ast;
/// Control-flow graph construction.
///
/// Compiles a parsed command into a directed graph of program points joined
/// by command and guard transitions, and exports it as an edge list or in
/// Graphviz DOT format.
pub mod cfg;
/// Provides unified error types for parsing, evaluation and graph
/// construction.
///
/// Every variant carries the source line it refers to, so callers can report
/// failures without access to the AST.
pub mod error;
/// Orchestrates program execution.
///
/// Ties together the lexer, parser, value representation, memory and
/// evaluator.
///
/// # Responsibilities
/// - Turns source text into a command tree.
/// - Executes commands against an explicit memory.
/// - Propagates `break`/`continue` as control signals rather than errors.
pub mod interpreter;

pub use crate::{
    ast::Command,
    cfg::ProgramGraph,
    error::Error,
    interpreter::memory::{Arrays, Channel, Channels, Memory, Variables},
};
use crate::{
    cfg::CfgBuilder,
    interpreter::{evaluator::core::Evaluator, parser::core::parse_source},
};

/// A program held as source text.
///
/// Parsing happens on demand; every `run` builds a fresh memory from the
/// containers it is given, so runs never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    code: String,
}

impl Program {
    /// Wraps program text.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Reads program text from a file.
    pub fn read_file(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }

    /// The program text.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Parses the program into its root command.
    pub fn parse(&self) -> Result<Command, Error> {
        Ok(parse_source(&self.code)?)
    }

    /// Runs the program, printing to stdout, and returns the final memory.
    ///
    /// # Example
    /// ```
    /// use gcl::Program;
    ///
    /// let program = Program::new("y := 1; do x > 0 -> y := x * y; x := x - 1 od");
    /// let vars = [("x".to_string(), 5)].into();
    /// let memory = program.run(vars, Default::default(), Default::default()).unwrap();
    ///
    /// assert_eq!(memory.read_var("y"), Some(120));
    /// ```
    pub fn run(&self, vars: Variables, arrays: Arrays, channels: Channels) -> Result<Memory, Error> {
        let (memory, _) = self.run_with_output(vars, arrays, channels, io::stdout())?;
        Ok(memory)
    }

    /// Runs the program, sending `print` output to `out`.
    ///
    /// Returns the final memory together with the writer.
    ///
    /// # Example
    /// ```
    /// use gcl::Program;
    ///
    /// let (_, out) = Program::new("print 6 * 7")
    ///     .run_with_output(Default::default(), Default::default(), Default::default(), Vec::<u8>::new())
    ///     .unwrap();
    ///
    /// assert_eq!(out, b"42\n");
    /// ```
    pub fn run_with_output<W>(&self,
                              vars: Variables,
                              arrays: Arrays,
                              channels: Channels,
                              out: W)
                              -> Result<(Memory, W), Error>
        where W: Write
    {
        let command = self.parse()?;
        let mut memory = Memory::with_values(vars, arrays, channels);
        debug!("running program with {} variables and {} arrays",
               memory.vars().len(),
               memory.arrays().len());

        let mut evaluator = Evaluator::with_output(out);
        evaluator.exec(&command, &mut memory)?;
        debug!("run finished");
        Ok((memory, evaluator.into_output()))
    }

    /// Compiles the program into a control-flow graph without running it.
    pub fn build_cfg(&self) -> Result<ProgramGraph, Error> {
        let command = self.parse()?;
        debug!("building control-flow graph");
        Ok(CfgBuilder::new().build(&command)?)
    }
}

/// Parses and runs `source` over the given containers.
///
/// # Example
/// ```
/// use gcl::run;
///
/// let arrays = [("a".to_string(), vec![1, 2, 3])].into();
/// let memory = run("a[0] := 2; a[1] := 4; a[2] := a[1] + 1",
///                  Default::default(),
///                  arrays,
///                  Default::default()).unwrap();
///
/// assert_eq!(memory.read_array("a"), Some(&[2, 4, 5][..]));
/// ```
pub fn run(source: &str, vars: Variables, arrays: Arrays, channels: Channels) -> Result<Memory, Error> {
    Program::new(source).run(vars, arrays, channels)
}

/// Parses `source` and builds its control-flow graph.
pub fn build_cfg(source: &str) -> Result<ProgramGraph, Error> {
    Program::new(source).build_cfg()
}
