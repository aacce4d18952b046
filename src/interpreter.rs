/// The evaluator module executes programs.
///
/// The evaluator walks the AST, evaluates expressions, executes commands
/// against an explicitly passed [`memory::Memory`], and reports runtime
/// errors such as undefined variables or type mismatches.
///
/// # Responsibilities
/// - Evaluates arithmetic and boolean expressions, strict and
///   short-circuiting.
/// - Executes commands and threads `break`/`continue` signals to the nearest
///   loop.
/// - Leaves out-of-range array accesses non-fatal.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// tagged with its source line: numbers, identifiers, keywords and operators.
/// Whitespace and `//` comments are dropped.
pub mod lexer;
/// The memory module holds the program state.
///
/// Variables, fixed-length arrays and the two (inert) channels.
pub mod memory;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts tokens into commands, guarded commands and expressions.
/// - Validates the grammar, reporting errors with line information.
pub mod parser;
/// Runtime values: integers, booleans and the absent value.
pub mod value;
