//! Source positions reported with every event.

use std::fmt;

/// A single source location: 1-based line, 1-based column, and the absolute
/// byte offset they resolve to via [`crate::line_index::LineIndex`].
///
/// Invariant: `offset == LineIndex::line_start(line) + (column - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
    /// Absolute byte offset into the source buffer.
    pub offset: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
