use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Consumes the next token and checks that it is `expected`.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `expected`: The token that must come next.
/// - `description`: How the token is named in the error message.
/// - `line`: Line reported if the input ends here.
///
/// # Returns
/// The line of the consumed token.
///
/// # Errors
/// - `ExpectedToken` if a different token follows.
/// - `UnexpectedEndOfInput` if the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    description: &str,
                                                    line: usize)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, l)) if tok == expected => Ok(*l),
        Some((tok, l)) => Err(ParseError::ExpectedToken { expected: description.to_string(),
                                                          found:    format!("{tok:?}"),
                                                          line:     *l, }),
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Parses a plain identifier and returns its name together with its line.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              line: usize)
                                                              -> ParseResult<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), l)) => Ok((s.clone(), *l)),
        Some((tok, l)) => Err(ParseError::ExpectedToken { expected: "identifier".to_string(),
                                                          found:    format!("{tok:?}"),
                                                          line:     *l, }),
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Line of the next token, or `fallback` at the end of input.
pub(in crate::interpreter::parser) fn peek_line<'a, I>(tokens: &mut Peekable<I>,
                                                       fallback: usize)
                                                       -> usize
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().map_or(fallback, |(_, l)| *l)
}
