//! Span - Source code location
//!
//! A Span covers the bytes of a source buffer a token consumed, used to
//! point diagnostics at the right place. A token's lexeme can be longer
//! than its span (`""` consumes one byte), so spans are not a way to
//! recover lexemes.

/// A position in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line (1-indexed)
    pub line: u32,
    /// Byte offset from the beginning of the source
    pub offset: usize,
}

impl Position {
    pub fn new(line: u32, offset: usize) -> Self {
        Self { line, offset }
    }
}

/// A region in the source code (start inclusive, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
    /// Source ID in a `SourceCache`
    pub file_id: u32,
}

impl Span {
    pub fn new(start: Position, end: Position, file_id: u32) -> Self {
        Self { start, end, file_id }
    }

    /// Creates an empty span at a single position
    pub fn point(pos: Position, file_id: u32) -> Self {
        Self {
            start: pos,
            end: pos,
            file_id,
        }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
