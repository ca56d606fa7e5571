//! Diagnostic - rustc-style error reports
//!
//! A diagnostic carries:
//! - An error code (EL001, EP001, ...)
//! - Labelled spans into the source
//! - Help messages

use crate::span::Span;
use std::fmt;

/// A message attached to a region of the source
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl Label {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// Structured error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    /// Category (L = Lexer, P = Parser-facing checks)
    pub category: char,
    pub number: u16,
}

impl ErrorCode {
    pub const fn new(category: char, number: u16) -> Self {
        Self { category, number }
    }

    // Lexer errors
    pub const UNEXPECTED_SYMBOL: Self = Self::new('L', 1);

    // Token stream checks requested by the parser
    pub const UNEXPECTED_TOKEN: Self = Self::new('P', 1);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}{:03}", self.category, self.number)
    }
}

/// A complete error report
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub help: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Underlines `span` with `message`
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "error[{}]: {}", code, self.message),
            None => write!(f, "error: {}", self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}

/// Named source buffers that diagnostics can be rendered against
#[derive(Debug, Default)]
pub struct SourceCache {
    files: Vec<SourceFile>,
}

#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Byte offset where each line begins
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = line_starts(&source);

        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Text of a 1-indexed line, without its line break
    pub fn get_line(&self, line: u32) -> Option<&str> {
        let idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .copied()
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches(['\r', '\n']))
    }

    /// 1-indexed column (in characters) of a byte offset on the given line
    pub fn column(&self, line: u32, offset: usize) -> u32 {
        let start = line
            .checked_sub(1)
            .and_then(|idx| self.line_starts.get(idx as usize))
            .copied()
            .unwrap_or(0);
        let end = offset.clamp(start, self.source.len());

        self.source
            .get(start..end)
            .map_or(1, |prefix| prefix.chars().count() as u32 + 1)
    }
}

/// Line starts using the lexer's newline rules: `\r\n` and `\n\r` are one
/// break, a lone `\r` or `\n` is one break.
fn line_starts(source: &str) -> Vec<usize> {
    let bytes = source.as_bytes();
    let mut starts = vec![0];
    let mut i = 0;

    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'\r', Some(b'\n')) | (b'\n', Some(b'\r')) => {
                i += 2;
                starts.push(i);
            }
            (b'\r' | b'\n', _) => {
                i += 1;
                starts.push(i);
            }
            _ => i += 1,
        }
    }

    starts
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source and returns its ID
    pub fn add(&mut self, name: impl Into<String>, source: impl Into<String>) -> u32 {
        let id = self.files.len() as u32;
        self.files.push(SourceFile::new(name, source));
        id
    }

    pub fn get(&self, id: u32) -> Option<&SourceFile> {
        self.files.get(id as usize)
    }
}

/// Renders diagnostics for display
pub struct DiagnosticRenderer<'a> {
    cache: &'a SourceCache,
    use_colors: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(cache: &'a SourceCache) -> Self {
        Self {
            cache,
            use_colors: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.use_colors {
            code
        } else {
            ""
        }
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let reset = self.paint("\x1b[0m");
        let bold = self.paint("\x1b[1m");
        let blue = self.paint("\x1b[1;34m");
        let red = self.paint("\x1b[1;31m");

        let mut output = String::new();

        // error[EL001]: message
        output.push_str(red);
        output.push_str("error");
        if let Some(code) = &diagnostic.code {
            output.push_str(&format!("[{}]", code));
        }
        output.push_str(&format!("{}{}: {}{}\n", reset, bold, diagnostic.message, reset));

        for label in &diagnostic.labels {
            let Some(file) = self.cache.get(label.span.file_id) else {
                continue;
            };

            let line_num = label.span.start.line;
            let column = file.column(line_num, label.span.start.offset);

            output.push_str(&format!(
                " {}-->{} {}:{}:{}\n",
                blue, reset, file.name, line_num, column
            ));

            let Some(line_content) = file.get_line(line_num) else {
                continue;
            };

            let padding = " ".repeat(line_num.to_string().len());
            let remaining_width = line_content
                .chars()
                .count()
                .saturating_sub(column as usize - 1);
            let underline_len = label.span.len().min(remaining_width).max(1);

            output.push_str(&format!(" {} {}|{}\n", padding, blue, reset));
            output.push_str(&format!(
                " {}{} |{} {}\n",
                blue, line_num, reset, line_content
            ));
            output.push_str(&format!(
                " {} {}|{} {}{}{} {}{}\n",
                padding,
                blue,
                reset,
                " ".repeat(column as usize - 1),
                red,
                "^".repeat(underline_len),
                label.message,
                reset
            ));
        }

        let green = self.paint("\x1b[1;32m");
        for help in &diagnostic.help {
            output.push_str(&format!("   = {}help{}: {}\n", green, reset, help));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diagnostic_rendering() {
        let mut cache = SourceCache::new();
        let file_id = cache.add("app.rei", "$(name=\"x\")\n$(port # 8080)");

        let span = Span::new(Position::new(2, 19), Position::new(2, 20), file_id);

        let diagnostic = Diagnostic::error("unexpected symbol near '#'")
            .with_code(ErrorCode::UNEXPECTED_SYMBOL)
            .with_label(span, "not the start of any token")
            .with_help("assignments use `=`");

        let output = DiagnosticRenderer::new(&cache).without_colors().render(&diagnostic);

        let expected = [
            "error[EL001]: unexpected symbol near '#'",
            " --> app.rei:2:8",
            "   |",
            " 2 | $(port # 8080)",
            "   |        ^ not the start of any token",
            "   = help: assignments use `=`",
            "",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_line_starts_follow_lexer_newlines() {
        let file = SourceFile::new("mixed.rei", "a\r\nb\n\rc\rd\ne");

        assert_eq!(file.get_line(1), Some("a"));
        assert_eq!(file.get_line(2), Some("b"));
        assert_eq!(file.get_line(3), Some("c"));
        assert_eq!(file.get_line(4), Some("d"));
        assert_eq!(file.get_line(5), Some("e"));
        assert_eq!(file.get_line(6), None);
        assert_eq!(file.get_line(0), None);
    }

    #[test]
    fn test_colored_rendering() {
        let mut cache = SourceCache::new();
        let file_id = cache.add("app.rei", "$(a # b)");

        let span = Span::new(Position::new(1, 4), Position::new(1, 5), file_id);
        let diagnostic = Diagnostic::error("unexpected symbol near '#'").with_label(span, "here");

        let output = DiagnosticRenderer::new(&cache).render(&diagnostic);

        assert!(output.starts_with("\x1b[1;31merror\x1b[0m"));
        assert!(output.contains("\x1b[1;31m^ here\x1b[0m"));
    }

    #[test]
    fn test_display_without_code() {
        let diagnostic = Diagnostic::error("unexpected symbol near '#'");
        assert_eq!(diagnostic.to_string(), "error: unexpected symbol near '#'");
    }

    #[test]
    fn test_display_includes_code() {
        let diagnostic = Diagnostic::error("expected `=`, found `)`").with_code(ErrorCode::UNEXPECTED_TOKEN);
        assert_eq!(diagnostic.to_string(), "error[EP001]: expected `=`, found `)`");
    }
}
