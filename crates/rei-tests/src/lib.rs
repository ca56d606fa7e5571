//! Integration tests for the Rei lexer
//!
//! Exercises the lexer the way a parser drives it, and checks the
//! diagnostics produced when it fails:
//! Source → Lexer → (Statements | Diagnostic)

use rei_error::{DiagnosticRenderer, SourceCache};
use rei_lexer::{LexError, Lexer, Token, TokenKind};

/// Installs a trace-level subscriber writing to the test output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// A statement as a small parser would read it off the token stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'src> {
    /// `$name = "value"` or `$name = ""`
    Assign { name: &'src str, value: &'src str, line: u32 },
    /// `print($name)`
    Print { name: &'src str, line: u32 },
}

fn variable<'src>(lexer: &mut Lexer<'src>) -> Result<Token<'src>, LexError> {
    lexer.expect(TokenKind::VerPrefix)?;
    lexer.expect(TokenKind::Name)
}

fn string<'src>(lexer: &mut Lexer<'src>) -> Result<&'src str, LexError> {
    if lexer.look_ahead()? == TokenKind::DoubleQuote {
        // `""` only consumes its first quote, the closing one follows
        lexer.next_token()?;
        lexer.expect(TokenKind::Quote)?;
        return Ok("");
    }

    lexer.expect(TokenKind::Quote)?;
    let value = lexer.expect(TokenKind::Name)?;
    lexer.expect(TokenKind::Quote)?;
    Ok(value.lexeme)
}

/// Reads statements until EOF, stopping at the first error
pub fn parse_statements(source: &str) -> Result<Vec<Statement<'_>>, LexError> {
    let mut lexer = Lexer::new(source, 0);
    let mut statements = Vec::new();

    loop {
        match lexer.look_ahead()? {
            TokenKind::Eof => return Ok(statements),
            TokenKind::Print => {
                let line = lexer.next_token()?.line;
                lexer.expect(TokenKind::LeftParen)?;
                let name = variable(&mut lexer)?;
                lexer.expect(TokenKind::RightParen)?;
                statements.push(Statement::Print {
                    name: name.lexeme,
                    line,
                });
            }
            _ => {
                let name = variable(&mut lexer)?;
                lexer.expect(TokenKind::Equal)?;
                let value = string(&mut lexer)?;
                statements.push(Statement::Assign {
                    name: name.lexeme,
                    value,
                    line: name.line,
                });
            }
        }
    }
}

/// Lexes the whole source into `(kind, lexeme, line)` triples, EOF included
pub fn lex(source: &str) -> Vec<(TokenKind, &str, u32)> {
    match rei_lexer::tokenize(source, 0) {
        Ok(tokens) => tokens
            .into_iter()
            .map(|t| (t.kind, t.lexeme, t.line))
            .collect(),
        Err(err) => panic!("Expected source to lex, but got: {}", err),
    }
}

/// Asserts that lexing the source fails and returns the error
pub fn assert_lex_fails(source: &str) -> LexError {
    match rei_lexer::tokenize(source, 0) {
        Ok(tokens) => panic!("Expected source to fail lexing, got {} tokens", tokens.len()),
        Err(err) => err,
    }
}

/// Rebuilds the source from the lexemes and the skipped bytes between them
///
/// A `""` lexeme is one byte longer than what it consumes, so sources
/// containing `""` do not rebuild exactly.
pub fn reconstruct(source: &str) -> String {
    let mut lexer = Lexer::new(source, 0);
    let mut out = String::new();
    let mut cursor = 0;

    loop {
        let token = match lexer.next_token() {
            Ok(token) => token,
            Err(err) => panic!("Expected source to lex, but got: {}", err),
        };

        let skipped = &source[cursor..token.span.start.offset];
        assert!(
            skipped.bytes().all(|b| matches!(b, b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r' | b' ')),
            "non-ignorable bytes skipped: {:?}",
            skipped
        );
        out.push_str(skipped);
        out.push_str(token.lexeme);
        cursor = token.span.end.offset;

        if token.is_eof() {
            return out;
        }
    }
}

/// Renders the error produced by lexing `source` as a colourless report
pub fn render_error(name: &str, source: &str) -> String {
    let mut cache = SourceCache::new();
    let file_id = cache.add(name, source);

    let err = match Lexer::new(source, file_id).tokenize() {
        Ok(_) => panic!("Expected source to fail lexing"),
        Err(err) => err,
    };

    DiagnosticRenderer::new(&cache).without_colors().render(&err.to_diagnostic())
}

#[cfg(test)]
mod scenario_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parenthesised_assignment() {
        init_tracing();

        assert_eq!(
            lex("$(name=\"value\")"),
            vec![
                (TokenKind::VerPrefix, "$", 1),
                (TokenKind::LeftParen, "(", 1),
                (TokenKind::Name, "name", 1),
                (TokenKind::Equal, "=", 1),
                (TokenKind::Quote, "\"", 1),
                (TokenKind::Name, "value", 1),
                (TokenKind::Quote, "\"", 1),
                (TokenKind::RightParen, ")", 1),
                (TokenKind::Eof, "", 1),
            ]
        );
    }

    #[test]
    fn test_leading_newline_and_keyword() {
        let mut lexer = Lexer::new("\n$print(x)", 0);

        let first = lexer.next_token().unwrap();
        assert_eq!((first.kind, first.line), (TokenKind::VerPrefix, 2));

        let second = lexer.next_token().unwrap();
        assert_eq!(second.kind, TokenKind::Print);
        assert_eq!(second.lexeme, "print");
    }

    #[test]
    fn test_lone_hash_is_rejected() {
        let err = assert_lex_fails("#");

        match err {
            LexError::UnexpectedSymbol { byte, line, .. } => {
                assert_eq!(byte, b'#');
                assert_eq!(line, 1);
            }
            other => panic!("Expected UnexpectedSymbol, got {:?}", other),
        }
    }

    #[test]
    fn test_double_quote_advances_one_byte() {
        let mut lexer = Lexer::new("$(\"\"=)", 0);
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();

        let doubled = lexer.next_token().unwrap();
        assert_eq!(doubled.kind, TokenKind::DoubleQuote);
        assert_eq!(doubled.lexeme, "\"\"");
        assert_eq!(doubled.span.len(), 1);
        assert_eq!(lexer.remaining(), "\"=)");

        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Quote);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Equal);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::RightParen);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_statements() {
        init_tracing();

        let source = "$greeting = \"hello\"\r\n$empty = \"\"\n\n  print($greeting)\n";

        assert_eq!(
            parse_statements(source).unwrap(),
            vec![
                Statement::Assign {
                    name: "greeting",
                    value: "hello",
                    line: 1,
                },
                Statement::Assign {
                    name: "empty",
                    value: "",
                    line: 2,
                },
                Statement::Print {
                    name: "greeting",
                    line: 4,
                },
            ]
        );
    }

    #[test]
    fn test_statement_with_missing_equal() {
        let err = parse_statements("$a \"b\"").unwrap_err();

        assert_eq!(
            err.to_string(),
            "expected `=`, found `\"` \"\"\" at line 1"
        );
    }

    #[test]
    fn test_print_accepts_optional_prefix_skip() {
        // A parser may swallow an optional `$` before deciding what follows
        let mut lexer = Lexer::new("$ print", 0);
        lexer.look_ahead_and_skip(TokenKind::VerPrefix).unwrap();
        lexer.look_ahead_and_skip(TokenKind::VerPrefix).unwrap();

        assert_eq!(lexer.look_ahead().unwrap(), TokenKind::Print);
    }
}


#[cfg(test)]
mod diagnostic_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rei_error::{Diagnostic, Diagnostics, ErrorCode};

    #[test]
    fn test_unexpected_symbol_report() {
        let output = render_error("app.rei", "$(name=\"x\")\n$(port # 8080)");

        assert_eq!(
            output.lines().take(5).collect::<Vec<_>>(),
            vec![
                "error[EL001]: unexpected symbol near '#'",
                " --> app.rei:2:8",
                "   |",
                " 2 | $(port # 8080)",
                "   |        ^ not the start of any token",
            ]
        );
    }

    #[test]
    fn test_unexpected_token_report() {
        let mut cache = SourceCache::new();
        let source = "$(name)";
        let file_id = cache.add("app.rei", source);

        let mut lexer = Lexer::new(source, file_id);
        lexer.expect(TokenKind::VerPrefix).unwrap();
        lexer.expect(TokenKind::LeftParen).unwrap();
        lexer.expect(TokenKind::Name).unwrap();
        let err = lexer.expect(TokenKind::Equal).unwrap_err();

        let diagnostic: Diagnostic = err.into();
        assert_eq!(diagnostic.code, Some(ErrorCode::UNEXPECTED_TOKEN));

        let output = DiagnosticRenderer::new(&cache).without_colors().render(&diagnostic);
        assert!(output.starts_with("error[EP001]: expected `=`, found `)`\n"));
        assert!(output.contains("app.rei:1:7"));
    }

    #[test]
    fn test_collects_into_diagnostics() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.extend(
            ["#", "$(1)"]
                .into_iter()
                .map(|source| assert_lex_fails(source).to_diagnostic()),
        );

        assert_eq!(diagnostics.len(), 2);
        assert!(!diagnostics.is_empty());
    }
}
