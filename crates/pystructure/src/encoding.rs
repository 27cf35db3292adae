//! PEP 263 encoding-declaration recovery.
//!
//! The concrete parser does not hand back a position for the encoding
//! comment (it isn't a syntax-tree node at all), so the original
//! implementation scans the raw buffer for the literal text instead. We do
//! the same, scoped to the first two lines per PEP 263.

use crate::{line_index::LineIndex, position::Position};

/// A recovered encoding declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingDeclaration {
    /// The declared encoding name, e.g. `utf-8`.
    pub name: String,
    /// Where the name itself starts in the source buffer.
    pub position: Position,
}

/// Scans the first two lines of `source` for a `# -*- coding: NAME -*-` (or
/// bare `# coding: NAME`) comment and recovers its position via `index`.
#[must_use]
pub fn detect(source: &str, index: &LineIndex) -> Option<EncodingDeclaration> {
    let last_line = index.total_lines().min(2);
    for line in 1..=last_line {
        let start = index.line_start(line) as usize;
        let end = if line < index.total_lines() {
            index.line_start(line + 1) as usize
        } else {
            source.len()
        };
        let text = &source[start..end];
        if let Some((name, name_offset)) = find_coding_name(text) {
            let offset = (start + name_offset) as u32;
            return Some(EncodingDeclaration {
                name: name.to_owned(),
                position: index.position(offset.into()),
            });
        }
    }
    None
}

/// Looks for `coding[:=]\s*NAME` after a `#` in a single line, returning the
/// name and its byte offset within `line`.
fn find_coding_name(line: &str) -> Option<(&str, usize)> {
    let hash = line.find('#')?;
    let comment = &line[hash + 1..];
    let keyword = comment.find("coding")?;
    let after_keyword = keyword + "coding".len();
    let rest = &comment[after_keyword..];
    let rest = rest.strip_prefix(':').or_else(|| rest.strip_prefix('='))?;
    let trimmed = rest.trim_start_matches(' ');
    let leading_ws = rest.len() - trimmed.len();
    let name_len = trimmed
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'))
        .unwrap_or(trimmed.len());
    if name_len == 0 {
        return None;
    }
    let name_start_in_comment = after_keyword + 1 + leading_ws;
    Some((&trimmed[..name_len], hash + 1 + name_start_in_comment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_standard_coding_comment() {
        let src = "# -*- coding: utf-8 -*-\nimport os\n";
        let index = LineIndex::new(src);
        let decl = detect(src, &index).expect("should detect encoding");
        assert_eq!(decl.name, "utf-8");
        assert_eq!(&src[decl.position.offset as usize..][..5], "utf-8");
    }

    #[test]
    fn detects_bare_coding_comment() {
        let src = "#coding=latin-1\nx = 1\n";
        let index = LineIndex::new(src);
        let decl = detect(src, &index).expect("should detect encoding");
        assert_eq!(decl.name, "latin-1");
    }

    #[test]
    fn absent_when_no_comment_on_first_two_lines() {
        let src = "import os\nimport sys\n# coding: utf-8\n";
        let index = LineIndex::new(src);
        assert!(detect(src, &index).is_none());
    }
}
