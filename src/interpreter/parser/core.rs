use std::iter::Peekable;

use crate::{
    ast::Command,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::command::parse_command,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program from source text.
///
/// The whole input must form one command (possibly a `;` sequence); any
/// tokens left over after it are reported as
/// [`ParseError::UnexpectedTrailingTokens`].
///
/// # Example
/// ```
/// use gcl::{ast::Command, interpreter::parser::core::parse_source};
///
/// let program = parse_source("y := 1; x := x - 1").unwrap();
/// assert!(matches!(program, Command::Sequence { .. }));
///
/// assert!(parse_source("y := 1 fi").is_err());
/// ```
pub fn parse_source(source: &str) -> ParseResult<Command> {
    let tokens = tokenize(source)?;
    parse_program(&mut tokens.iter().peekable())
}

/// Parses a complete program from an already tokenized stream.
///
/// Grammar: `program := command EOF`
///
/// An `UnexpectedEndOfInput` raised anywhere below reports the line of the
/// last token, which is where the input ran out (line 1 for empty input).
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The root command of the program.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Command>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let last_line = tokens.clone().last().map_or(1, |(_, line)| *line);
    let command = parse_command(tokens).map_err(|e| match e {
                                           ParseError::UnexpectedEndOfInput { .. } => {
                                               ParseError::UnexpectedEndOfInput { line: last_line }
                                           },
                                           other => other,
                                       })?;

    match tokens.next() {
        Some((tok, line)) => Err(ParseError::UnexpectedTrailingTokens { token: format!("{tok:?}"),
                                                                        line:  *line, }),
        None => Ok(command),
    }
}
