use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, such as `true`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `if`
    #[token("if")]
    If,
    /// `fi`
    #[token("fi")]
    Fi,
    /// `do`
    #[token("do")]
    Do,
    /// `od`
    #[token("od")]
    Od,
    /// `skip`
    #[token("skip")]
    Skip,
    /// `read`
    #[token("read")]
    Read,
    /// `write`
    #[token("write")]
    Write,
    /// `print`
    #[token("print")]
    Print,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// Identifier tokens; variable or array names such as `x` or `A`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip)]
    Comment,
    /// `:=`
    #[token(":=")]
    Assign,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `->`
    #[token("->")]
    Arrow,
    /// `[]`, the separator between guarded alternatives.
    #[token("[]")]
    Choice,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,

    /// Newlines only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Splits `source` into `(Token, line)` pairs.
///
/// Lines are counted from 1. Whitespace and comments never reach the token
/// stream.
///
/// # Errors
/// - `LiteralTooLarge` for an integer literal outside the `i64` range.
/// - `UnexpectedToken` for any character sequence no token matches.
///
/// # Example
/// ```
/// use gcl::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x := 1;\nskip").unwrap();
///
/// assert_eq!(tokens[0], (Token::Identifier("x".into()), 1));
/// assert_eq!(tokens[4], (Token::Skip, 2));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let slice = lexer.slice();
            if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::LiteralTooLarge { literal: slice.to_string(),
                                                         line:    lexer.extras.line, });
            }
            return Err(ParseError::UnexpectedToken { token: slice.to_string(),
                                                     line:  lexer.extras.line, });
        }
    }

    Ok(tokens)
}

/// Parses an integer literal from the current token slice.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if successful.
/// - `None`: If the literal does not fit in an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice (`true` or `false`).
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
