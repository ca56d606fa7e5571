//! Tokens for the Rei configuration language
//!
//! Defines every token kind the lexer can hand to a parser.

use rei_error::span::Span;
use std::fmt;

/// All token kinds of the Rei language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Punctuation
    // =========================================
    /// `$` - variable prefix
    VerPrefix,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `=`
    Equal,
    /// `"`
    Quote,
    /// `""`
    DoubleQuote,

    // =========================================
    // Names and keywords
    // =========================================
    /// Name: `[_A-Za-z][_0-9A-Za-z]*`
    Name,
    /// `print`
    Print,

    // =========================================
    // End of file
    // =========================================
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::Print)
    }

    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "print" => Some(TokenKind::Print),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::VerPrefix => "$",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::Equal => "=",
            TokenKind::Quote => "\"",
            TokenKind::DoubleQuote => "\"\"",
            TokenKind::Name => "name",
            TokenKind::Print => "print",
            TokenKind::Eof => "end of file",
        };
        write!(f, "{}", text)
    }
}

/// A token with its lexeme and location
///
/// The lexeme borrows from the source buffer the lexer was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    /// Line where the token starts (1-indexed)
    pub line: u32,
    /// Bytes consumed from the source for this token
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, lexeme: &'src str, line: u32, span: Span) -> Self {
        Self {
            kind,
            lexeme,
            line,
            span,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Name => write!(f, "name `{}`", self.lexeme),
            TokenKind::Eof => write!(f, "end of file"),
            kind => write!(f, "`{}`", kind),
        }
    }
}
