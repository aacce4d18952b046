/// Entry point and shared result type.
///
/// Turns a token stream into a single program command and rejects trailing
/// input.
pub mod core;

/// Command parsing.
///
/// Assignments, `read`/`write`/`print`, `skip`, `break`/`continue`,
/// sequencing with `;`, and the `if ... fi` / `do ... od` constructs.
pub mod command;

/// Guarded command parsing (`guard -> command [] ...`).
pub mod guard;

/// Arithmetic and boolean expression parsing.
///
/// Implements the precedence hierarchy of the grammar, from disjunction down
/// to arithmetic items, including the lookahead needed to tell a parenthesized
/// boolean from a parenthesized arithmetic operand.
pub mod expr;

/// Small helpers shared by the parsing functions.
pub mod utils;
