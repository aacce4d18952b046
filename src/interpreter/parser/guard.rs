use std::iter::Peekable;

use crate::{
    ast::GuardedCommand,
    interpreter::{
        lexer::Token,
        parser::{
            command::parse_command,
            core::ParseResult,
            expr::parse_boolean,
            utils::{expect, peek_line},
        },
    },
};

/// Parses the body of an `if` or `do`.
///
/// A single `guard -> command` yields `GuardedCommand::Cond`. Two or more
/// alternatives separated by `[]` yield `GuardedCommand::Case`; the parser
/// accepts that form even though evaluation does not support it.
///
/// Grammar: `gc := b "->" command ("[]" b "->" command)*`
///
/// # Parameters
/// - `tokens`: Token stream positioned after `if` or `do`.
/// - `line`: Line number of the opening keyword.
pub fn parse_guarded_command<'a, I>(tokens: &mut Peekable<I>,
                                    line: usize)
                                    -> ParseResult<GuardedCommand>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut branches = vec![parse_cond(tokens, line)?];

    while let Some((Token::Choice, _)) = tokens.peek() {
        tokens.next();
        branches.push(parse_cond(tokens, line)?);
    }

    if branches.len() == 1
       && let Some(only) = branches.pop()
    {
        return Ok(only);
    }

    Ok(GuardedCommand::Case { branches, line })
}

/// Parses one `guard -> command` pair.
fn parse_cond<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<GuardedCommand>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = peek_line(tokens, line);
    let guard = parse_boolean(tokens)?;
    expect(tokens, &Token::Arrow, "'->'", line)?;
    let command = parse_command(tokens)?;

    Ok(GuardedCommand::Cond { guard,
                              command: Box::new(command),
                              line })
}
