//! Lexer for the Rei configuration language
//!
//! A pull-based scanner over a borrowed source buffer with one token of
//! lookahead. Whitespace and line breaks are skipped internally and never
//! reach the parser.

use crate::error::LexError;
use crate::token::{Token, TokenKind};
use logos::Logos;
use rei_error::span::{Position, Span};

/// Longest-match scanner for names. Only ever run on a slice that starts
/// with `_` or an ASCII letter.
#[derive(Logos, Debug, PartialEq)]
enum NameScan {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,
}

/// Length in bytes of the name at the start of `text`, if any
fn scan_name(text: &str) -> Option<usize> {
    let mut lex = NameScan::lexer(text);
    match lex.next() {
        Some(Ok(NameScan::Name)) if lex.span().start == 0 => Some(lex.span().end),
        _ => None,
    }
}

/// The Rei language lexer
pub struct Lexer<'src> {
    /// Full source buffer
    source: &'src str,
    /// Byte offset of the first unconsumed byte
    pos: usize,
    /// Current line (1-indexed)
    line: u32,
    /// Source ID for spans
    file_id: u32,
    /// Token scanned by a lookahead but not yet handed out.
    /// When set, `pos` and `line` are already past it.
    pending: Option<Token<'src>>,
    /// Set once the iterator has yielded its last item
    done: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source code
    pub fn new(source: &'src str, file_id: u32) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            file_id,
            pending: None,
            done: false,
        }
    }

    /// Current line, including text already scanned by a lookahead
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Source text not yet scanned
    pub fn remaining(&self) -> &'src str {
        &self.source[self.pos..]
    }

    pub fn file_id(&self) -> u32 {
        self.file_id
    }

    fn next_source_is(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.pos)
    }

    /// Skips whitespace and line breaks, counting each break once
    fn skip_ignored(&mut self) {
        loop {
            if self.next_source_is("\r\n") || self.next_source_is("\n\r") {
                self.pos += 2;
                self.line += 1;
                continue;
            }

            match self.remaining().as_bytes().first() {
                Some(b'\r' | b'\n') => {
                    self.pos += 1;
                    self.line += 1;
                }
                Some(b'\t' | b'\x0b' | b'\x0c' | b' ') => self.pos += 1,
                _ => break,
            }
        }
    }

    /// Builds a token whose lexeme is `lexeme_len` bytes long and advances
    /// past `consumed` bytes. The two only differ for `""`.
    fn make_token(&mut self, kind: TokenKind, lexeme_len: usize, consumed: usize) -> Token<'src> {
        let start = self.current_position();
        let lexeme = &self.source[self.pos..self.pos + lexeme_len];
        self.pos += consumed;

        Token::new(
            kind,
            lexeme,
            start.line,
            Span::new(start, self.current_position(), self.file_id),
        )
    }

    fn unexpected_symbol(&self, byte: u8) -> LexError {
        let start = self.current_position();
        let end = Position::new(self.line, self.pos + 1);
        let err = LexError::UnexpectedSymbol {
            byte,
            line: self.line,
            span: Span::new(start, end, self.file_id),
        };
        tracing::debug!("lex error: {}", err);
        err
    }

    /// Scans one token from the source, ignoring the lookahead buffer
    fn scan(&mut self) -> Result<Token<'src>, LexError> {
        self.skip_ignored();

        let Some(&byte) = self.remaining().as_bytes().first() else {
            return Ok(Token::new(
                TokenKind::Eof,
                self.remaining(),
                self.line,
                Span::point(self.current_position(), self.file_id),
            ));
        };

        let token = match byte {
            b'$' => self.make_token(TokenKind::VerPrefix, 1, 1),
            b'(' => self.make_token(TokenKind::LeftParen, 1, 1),
            b')' => self.make_token(TokenKind::RightParen, 1, 1),
            b'=' => self.make_token(TokenKind::Equal, 1, 1),
            // `""` keeps its two-byte lexeme but only the first quote is
            // consumed; the second one is scanned again as the next token.
            b'"' if self.next_source_is("\"\"") => self.make_token(TokenKind::DoubleQuote, 2, 1),
            b'"' => self.make_token(TokenKind::Quote, 1, 1),
            b'_' | b'A'..=b'Z' | b'a'..=b'z' => {
                let len = scan_name(self.remaining()).ok_or_else(|| self.unexpected_symbol(byte))?;
                let kind = TokenKind::keyword_from_str(&self.remaining()[..len]).unwrap_or(TokenKind::Name);
                self.make_token(kind, len, len)
            }
            _ => return Err(self.unexpected_symbol(byte)),
        };

        Ok(token)
    }

    /// Consumes and returns the next token
    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        let token = match self.pending.take() {
            Some(token) => token,
            None => self.scan()?,
        };

        tracing::trace!("{:?} {:?} at line {}", token.kind, token.lexeme, token.line);
        Ok(token)
    }

    /// Returns the kind of the next token without consuming it
    pub fn look_ahead(&mut self) -> Result<TokenKind, LexError> {
        if let Some(token) = &self.pending {
            return Ok(token.kind);
        }

        let token = self.scan()?;
        tracing::trace!("lookahead buffered {:?} at line {}", token.kind, token.line);
        let kind = token.kind;
        self.pending = Some(token);
        Ok(kind)
    }

    /// Consumes the next token only if it is of the `expected` kind
    pub fn look_ahead_and_skip(&mut self, expected: TokenKind) -> Result<(), LexError> {
        if self.look_ahead()? == expected {
            if let Some(token) = self.pending.take() {
                tracing::trace!("skipped {:?} at line {}", token.kind, token.line);
            }
        }
        Ok(())
    }

    /// Consumes the next token and checks that it has the given kind
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, LexError> {
        let token = self.next_token()?;
        if token.kind != kind {
            let err = LexError::UnexpectedToken {
                expected: kind,
                found: token.kind,
                lexeme: token.lexeme.to_owned(),
                line: token.line,
                span: token.span,
            };
            tracing::debug!("lex error: {}", err);
            return Err(err);
        }
        Ok(token)
    }

    /// Tokenizes the rest of the source, up to and including EOF
    pub fn tokenize(&mut self) -> Result<Vec<Token<'src>>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);

            if is_eof {
                return Ok(tokens);
            }
        }
    }
}

/// Yields tokens until EOF (not included) or the first error
impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_token() {
            Ok(token) if token.is_eof() => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Tokenizes source code, up to and including EOF
pub fn tokenize(source: &str, file_id: u32) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(source, file_id).tokenize()
}
