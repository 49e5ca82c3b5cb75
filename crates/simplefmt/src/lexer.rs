//! Lexer implementation.

use logos::Logos;
use std::fmt;

/// The tokens of a format string.
#[derive(Debug, Copy, Clone, Logos, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token<'source> {
    #[token("=")]
    Eq,

    #[token("<=")]
    LessEq,

    #[token(">=")]
    GreaterEq,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("@")]
    At,

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    Ident(&'source str),

    #[regex(
        r"[\p{XID_Start}_]\p{XID_Continue}*\.[\p{XID_Start}_]\p{XID_Continue}*",
        |lex| Path::split(lex.slice())
    )]
    Dotted(Path<'source>),
}

/// A dotted identifier, `owner.member`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Path<'source> {
    pub owner: &'source str,
    pub member: &'source str,
}

impl<'source> Path<'source> {
    fn split(raw: &'source str) -> Option<Self> {
        let (owner, member) = raw.split_once('.')?;
        Some(Self { owner, member })
    }
}

impl Token<'_> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Eq | Self::LessEq | Self::GreaterEq => TokenKind::Relation,
            Self::Star => TokenKind::Star,
            Self::Plus => TokenKind::Plus,
            Self::Minus => TokenKind::Minus,
            Self::At => TokenKind::At,
            Self::Number(..) => TokenKind::Number,
            Self::Ident(..) => TokenKind::Ident,
            Self::Dotted(..) => TokenKind::Dotted,
        }
    }
}

/// The payload-free classification of tokens, used to report syntax errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Relation,
    Star,
    Plus,
    Minus,
    At,
    Number,
    Ident,
    Dotted,
    /// The end of input.
    End,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Relation => "relation (`=`, `<=`, `>=`)",
            Self::Star => "`*`",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::At => "`@`",
            Self::Number => "number",
            Self::Ident => "identifier",
            Self::Dotted => "`view.attribute`",
            Self::End => "end of input",
        })
    }
}

/// A token with its byte offsets in the source, `(start, token, end)`.
pub type Spanned<'source> = (usize, Token<'source>, usize);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unexpected character {unexpected:?} at offset {position}")]
pub struct LexError {
    pub position: usize,
    pub unexpected: char,
}

/// Lazily tokenize the input.
pub fn lexer(input: &str) -> impl Iterator<Item = Result<Spanned<'_>, LexError>> {
    Token::lexer(input)
        .spanned()
        .map(move |(res, span)| match res {
            Ok(token) => Ok((span.start, token, span.end)),
            Err(()) => Err(LexError {
                position: span.start,
                unexpected: input[span.start..].chars().next().unwrap_or('\0'),
            }),
        })
}

/// Tokenize the whole input up front, stopping at the first lexical error.
pub fn tokenize(input: &str) -> Result<Vec<Spanned<'_>>, LexError> {
    lexer(input).collect()
}
