//! rei-error - Diagnostics for the Rei configuration language
//!
//! Source locations plus structured, renderable error reports in the
//! style of the Rust compiler.
//!
//! # Example
//!
//! ```rust
//! use rei_error::{Diagnostic, DiagnosticRenderer, ErrorCode, SourceCache};
//! use rei_error::span::{Position, Span};
//!
//! let mut cache = SourceCache::new();
//! let file_id = cache.add("app.rei", "$(name # \"x\")");
//!
//! let span = Span::new(Position::new(1, 7), Position::new(1, 8), file_id);
//!
//! let diagnostic = Diagnostic::error("unexpected symbol near '#'")
//!     .with_code(ErrorCode::UNEXPECTED_SYMBOL)
//!     .with_label(span, "not the start of any token");
//!
//! let renderer = DiagnosticRenderer::new(&cache).without_colors();
//! assert!(renderer.render(&diagnostic).contains("app.rei:1:8"));
//! ```

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticRenderer, ErrorCode, Label, SourceCache, SourceFile};
pub use span::{Position, Span};

/// Diagnostics accumulated by a consumer of the lexer
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Renders all diagnostics, separated by blank lines
    pub fn render(&self, renderer: &DiagnosticRenderer<'_>) -> String {
        self.items
            .iter()
            .map(|d| renderer.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
