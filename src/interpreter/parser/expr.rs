use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            utils::{expect, peek_line},
        },
    },
};

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for all tokens that are not binary operators.
///
/// # Example
/// ```
/// use gcl::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::expr::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::DoubleAmpersand),
///            Some(BinaryOperator::AndCut));
/// assert_eq!(token_to_binary_operator(&Token::Semicolon), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Ampersand => Some(BinaryOperator::And),
        Token::Pipe => Some(BinaryOperator::Or),
        Token::DoubleAmpersand => Some(BinaryOperator::AndCut),
        Token::DoublePipe => Some(BinaryOperator::OrCut),
        Token::Equals => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        _ => None,
    }
}

/// Parses a left-associative chain of binary operators.
///
/// `operand` parses one side, `accepts` decides which operators belong to
/// this precedence level.
fn parse_left_assoc<'a, I>(tokens: &mut Peekable<I>,
                           operand: fn(&mut Peekable<I>) -> ParseResult<Expr>,
                           accepts: fn(BinaryOperator) -> bool)
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = operand(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && accepts(op)
        {
            let line = *line;
            tokens.next();
            let right = operand(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses a boolean expression.
///
/// This is the entry point for guards. Disjunction has the lowest
/// precedence; `|` and `||` share a level.
///
/// Grammar: `b := conj (("|" | "||") conj)*`
pub fn parse_boolean<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_conjunction, |op| {
        matches!(op, BinaryOperator::Or | BinaryOperator::OrCut)
    })
}

/// Parses a conjunction; `&` and `&&` share a level.
///
/// Grammar: `conj := neg (("&" | "&&") neg)*`
pub fn parse_conjunction<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_negation, |op| {
        matches!(op, BinaryOperator::And | BinaryOperator::AndCut)
    })
}

/// Parses a negation or an atomic boolean.
///
/// A leading `(` is ambiguous: `(x + 1) > 2` opens an arithmetic operand of a
/// comparison, `(x > 0 | y > 0)` opens a boolean. The comparison reading is
/// tried first on a cloned iterator and committed only if it succeeds.
///
/// Grammar:
/// ```text
///     neg := "!" neg
///          | "true" | "false"
///          | "(" b ")"
///          | a relop a
/// ```
pub fn parse_negation<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Bang, line)) => {
            let line = *line;
            tokens.next();
            let expr = parse_negation(tokens)?;
            Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                               expr: Box::new(expr),
                               line })
        },
        Some((Token::Bool(value), line)) => {
            let expr = Expr::Literal { value: (*value).into(),
                                       line:  *line, };
            tokens.next();
            Ok(expr)
        },
        Some((Token::LParen, line)) => {
            let line = *line;
            let mut lookahead = tokens.clone();
            if let Ok(comparison) = parse_comparison(&mut lookahead) {
                *tokens = lookahead;
                return Ok(comparison);
            }

            tokens.next();
            let inner = parse_boolean(tokens)?;
            let close_line = peek_line(tokens, line);
            expect(tokens, &Token::RParen, "')'", close_line)?;
            Ok(Expr::Grouping { expr: Box::new(inner),
                                line })
        },
        _ => parse_comparison(tokens),
    }
}

/// Parses a comparison between two arithmetic expressions.
///
/// Grammar: `comparison := a ("=" | "!=" | ">" | ">=" | "<" | "<=") a`
///
/// # Errors
/// - `ExpectedToken` if no comparison operator follows the left operand.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_arithmetic(tokens)?;

    let (op, line) = match tokens.next() {
        Some((token, line)) => match token_to_binary_operator(token) {
            Some(op) if op.is_relational() => (op, *line),
            _ => {
                return Err(ParseError::ExpectedToken { expected:
                                                           "comparison operator".to_string(),
                                                       found:    format!("{token:?}"),
                                                       line:     *line, });
            },
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { line: left.line_number() });
        },
    };

    let right = parse_arithmetic(tokens)?;
    Ok(Expr::BinaryOp { left: Box::new(left),
                        op,
                        right: Box::new(right),
                        line })
}

/// Parses addition and subtraction expressions.
///
/// Grammar: `a := term (("+" | "-") term)*`
pub fn parse_arithmetic<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_term, |op| {
        matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    })
}

/// Parses multiplication-level expressions.
///
/// Grammar: `term := item (("*" | "/" | "%") item)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_assoc(tokens, parse_item, |op| {
        matches!(op,
                 BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
    })
}

/// Parses an arithmetic item.
///
/// Grammar:
/// ```text
///     item := NUMBER
///           | NAME
///           | NAME "[" a "]"
///           | "-" item
///           | "(" a ")"
/// ```
///
/// # Errors
/// - `UnexpectedToken` if the next token cannot start an arithmetic item.
/// - `ExpectedToken` for an unclosed `[` or `(`.
/// - `UnexpectedEndOfInput` if the input ends here.
///   Its line is set by
///   [`parse_program`](crate::interpreter::parser::core::parse_program).
pub fn parse_item<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (token, line) = match tokens.next() {
        Some((token, line)) => (token, *line),
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    match token {
        Token::Integer(n) => Ok(Expr::Literal { value: (*n).into(),
                                                line }),
        Token::Identifier(name) => {
            if let Some((Token::LBracket, _)) = tokens.peek() {
                tokens.next();
                let index = parse_arithmetic(tokens)?;
                let close_line = peek_line(tokens, line);
                expect(tokens, &Token::RBracket, "']'", close_line)?;
                return Ok(Expr::ArrayIndex { array: name.clone(),
                                             index: Box::new(index),
                                             line });
            }
            Ok(Expr::Variable { name: name.clone(),
                                line })
        },
        Token::Minus => {
            let expr = parse_item(tokens)?;
            Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                               expr: Box::new(expr),
                               line })
        },
        Token::LParen => {
            let inner = parse_arithmetic(tokens)?;
            let close_line = peek_line(tokens, line);
            expect(tokens, &Token::RParen, "')'", close_line)?;
            Ok(Expr::Grouping { expr: Box::new(inner),
                                line })
        },
        tok => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                 line }),
    }
}
