//! Lexer errors

use crate::token::TokenKind;
use rei_error::{span::Span, Diagnostic, ErrorCode};
use thiserror::Error;

/// Errors that abort lexing. Neither is recoverable: the lexer does not
/// resynchronise after reporting one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected symbol near '{}' at line {line}", .byte.escape_ascii())]
    UnexpectedSymbol { byte: u8, line: u32, span: Span },

    #[error("expected `{expected}`, found `{found}` \"{lexeme}\" at line {line}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        lexeme: String,
        line: u32,
        span: Span,
    },
}

impl LexError {
    pub fn line(&self) -> u32 {
        match self {
            LexError::UnexpectedSymbol { line, .. } | LexError::UnexpectedToken { line, .. } => *line,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedSymbol { span, .. } | LexError::UnexpectedToken { span, .. } => *span,
        }
    }

    /// Converts the error into a renderable diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LexError::UnexpectedSymbol { byte, span, .. } => {
                Diagnostic::error(format!("unexpected symbol near '{}'", byte.escape_ascii()))
                    .with_code(ErrorCode::UNEXPECTED_SYMBOL)
                    .with_label(*span, "not the start of any token")
                    .with_help("tokens are `$`, `(`, `)`, `=`, `\"` and names made of letters, digits and `_`")
            }
            LexError::UnexpectedToken {
                expected,
                found,
                span,
                ..
            } => Diagnostic::error(format!("expected `{}`, found `{}`", expected, found))
                .with_code(ErrorCode::UNEXPECTED_TOKEN)
                .with_label(*span, format!("expected `{}` here", expected)),
        }
    }
}

impl From<LexError> for Diagnostic {
    fn from(err: LexError) -> Self {
        err.to_diagnostic()
    }
}
