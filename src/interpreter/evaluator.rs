/// Core evaluation logic.
///
/// Declares the `Evaluator`, the control `Signal` returned by every command,
/// and expression evaluation (literals, variables, array reads).
pub mod core;

/// Command execution.
///
/// Sequencing, assignments, `print`, the inert channel commands, and the
/// single-guard `if`.
pub mod command;

/// Execution of `do ... od` loops.
pub mod repetition;

/// Binary operator evaluation logic.
///
/// Arithmetic, comparisons, and both families of logical connectives,
/// strict and short-circuiting.
pub mod binary;

/// Unary operator evaluation logic (negation and logical not).
pub mod unary;
