use std::iter::Peekable;

use crate::{
    ast::{Command, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            expr::parse_arithmetic,
            guard::parse_guarded_command,
            utils::{expect, parse_identifier, peek_line},
        },
    },
};

/// Parses a command, including `;` sequences.
///
/// Sequencing is right-associative: `c1; c2; c3` parses as
/// `c1; (c2; c3)`. The `;`-separated commands are collected in a loop and
/// folded from the right, so a long sequence costs no parser recursion.
///
/// Grammar: `command := simple (";" simple)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// A single command or a `Command::Sequence`.
pub fn parse_command<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Command>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let first = parse_simple_command(tokens)?;

    let mut rest = Vec::new();
    while let Some((Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
        rest.push(parse_simple_command(tokens)?);
    }

    let Some(last) = rest.pop() else {
        return Ok(first);
    };
    let tail = rest.into_iter().rfold(last, |second, command| {
                                   Command::Sequence { first:  Box::new(command),
                                                       second: Box::new(second), }
                               });
    Ok(Command::Sequence { first:  Box::new(first),
                           second: Box::new(tail), })
}

/// Parses a single, non-sequenced command.
///
/// Grammar:
/// ```text
///     simple := NAME ":=" a
///             | NAME "[" a "]" ":=" a
///             | "read" NAME | "read" NAME "[" a "]"
///             | "write" a | "print" a
///             | "skip" | "break" | "continue"
///             | "if" gc "fi" | "do" gc "od"
/// ```
///
/// # Errors
/// - `UnexpectedToken` if the next token cannot start a command.
/// - `ExpectedToken` if a required delimiter (`:=`, `]`, `fi`, `od`) is
///   missing.
/// - `UnexpectedEndOfInput` if the program ends where a command is required.
///   Its line is set by
///   [`parse_program`](crate::interpreter::parser::core::parse_program).
pub fn parse_simple_command<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Command>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, line) = match tokens.next() {
        Some((token, line)) => (token, *line),
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    match token {
        Token::Identifier(name) => parse_assignment(tokens, name.clone(), line),
        Token::Read => {
            let (name, line) = parse_identifier(tokens, line)?;
            if let Some((Token::LBracket, _)) = tokens.peek() {
                let index = parse_index(tokens, line)?;
                return Ok(Command::ReadArray { array: name,
                                               index,
                                               line });
            }
            Ok(Command::ReadVar { name, line })
        },
        Token::Write => Ok(Command::Write { value: parse_arithmetic(tokens)?,
                                            line }),
        Token::Print => Ok(Command::Print { value: parse_arithmetic(tokens)?,
                                            line }),
        Token::Skip => Ok(Command::Skip { line }),
        Token::Break => Ok(Command::Break { line }),
        Token::Continue => Ok(Command::Continue { line }),
        Token::If => {
            let body = parse_guarded_command(tokens, line)?;
            expect(tokens, &Token::Fi, "'fi'", line)?;
            Ok(Command::If { body, line })
        },
        Token::Do => {
            let body = parse_guarded_command(tokens, line)?;
            expect(tokens, &Token::Od, "'od'", line)?;
            Ok(Command::Do { body, line })
        },
        tok => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                 line }),
    }
}

/// Parses the remainder of `x := a` or `A[i] := a` after the leading name.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>,
                           name: String,
                           line: usize)
                           -> ParseResult<Command>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::LBracket, _)) = tokens.peek() {
        let index = parse_index(tokens, line)?;
        expect(tokens, &Token::Assign, "':='", line)?;
        let value = parse_arithmetic(tokens)?;
        return Ok(Command::ArrayAssign { array: name,
                                         index,
                                         value,
                                         line });
    }

    expect(tokens, &Token::Assign, "':='", line)?;
    let value = parse_arithmetic(tokens)?;
    Ok(Command::Assign { name, value, line })
}

/// Parses `"[" a "]"` and returns the index expression.
fn parse_index<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LBracket, "'['", line)?;
    let index = parse_arithmetic(tokens)?;
    let line = peek_line(tokens, line);
    expect(tokens, &Token::RBracket, "']'", line)?;
    Ok(index)
}
