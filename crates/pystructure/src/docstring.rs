//! Docstring extraction: the first statement of a suite, when it is a
//! (possibly implicitly-concatenated) string literal.
//!
//! `ruff_python_ast` already merges adjacent string literals that the
//! grammar concatenates into a single [`ast::ExprStringLiteral`] with one
//! part per source literal, so the "concatenate adjacent STRING tokens"
//! step is done for us by the parser; what's left is stripping each part's
//! quote/prefix and handling the line-number convention toggle.

use ruff_python_ast::{self as ast, Expr, Stmt};
use ruff_text_size::{Ranged, TextRange};

use crate::{line_index::LineIndex, options::DocstringLineConvention, truncate};

/// An extracted docstring: de-quoted text plus the 1-based line range the
/// whole (possibly multi-part) literal spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docstring {
    pub text: String,
    pub start_line: u32,
    pub end_line: u32,
}

/// Extracts the docstring from the first statement of `body`, if any.
///
/// Returns `None` when `body` is empty or its first statement is not a
/// bare string-literal expression statement.
#[must_use]
pub fn extract(
    source: &str,
    index: &LineIndex,
    body: &[Stmt],
    convention: DocstringLineConvention,
    max_len: usize,
) -> Option<Docstring> {
    let Stmt::Expr(expr_stmt) = body.first()? else {
        return None;
    };
    let Expr::StringLiteral(literal) = expr_stmt.value.as_ref() else {
        return None;
    };
    let parts: Vec<&ast::StringLiteral> = literal.value.iter().collect();
    let (first_part, last_part) = (*parts.first()?, *parts.last()?);

    let mut text = String::new();
    for part in &parts {
        text.push_str(strip_quotes(source, part));
    }
    truncate::truncate(&mut text, max_len);

    let (start_line, end_line) = match convention {
        DocstringLineConvention::ReportsStartLine => {
            let start_line = index.line_col(u32::from(first_part.range().start())).0;
            let last_reported_start = index.line_col(u32::from(last_part.range().start())).0;
            let end_line = last_reported_start + newline_count(source, last_part.range());
            (start_line, end_line)
        }
        DocstringLineConvention::ReportsEndLine => {
            let end_line = index.line_col(last_byte_offset(last_part.range())).0;
            let first_reported_end = index.line_col(last_byte_offset(first_part.range())).0;
            let start_line = first_reported_end.saturating_sub(newline_count(source, first_part.range()));
            (start_line, end_line)
        }
    };

    Some(Docstring { text, start_line, end_line })
}

fn last_byte_offset(range: TextRange) -> u32 {
    u32::from(range.end()).saturating_sub(1)
}

fn newline_count(source: &str, range: TextRange) -> u32 {
    source[range].bytes().filter(|&b| b == b'\n').count() as u32
}

/// Strips the opening/closing quote-and-prefix run from one string-literal
/// part, per the original's prefix-length table (1/2/3/4 bytes, covering
/// `'`, `"`, `'''`, `"""` each optionally preceded by `r`/`u`/`f`/`b` in any
/// case and combination). Computed directly from the raw source slice
/// rather than the parser's quote-style flags, so it is independent of
/// exactly which flag enum a given parser version exposes.
fn strip_quotes<'a>(source: &'a str, part: &ast::StringLiteral) -> &'a str {
    let raw = &source[part.range()];
    let bytes = raw.as_bytes();
    let mut prefix_len = 0;
    while prefix_len < bytes.len() && bytes[prefix_len].is_ascii_alphabetic() {
        prefix_len += 1;
    }
    if prefix_len >= bytes.len() {
        return "";
    }
    let quote = bytes[prefix_len];
    let triple = bytes.len() >= prefix_len + 6
        && bytes[prefix_len + 1] == quote
        && bytes[prefix_len + 2] == quote;
    let quote_len = if triple { 3 } else { 1 };
    let start = prefix_len + quote_len;
    let end = raw.len().saturating_sub(quote_len);
    if start >= end {
        ""
    } else {
        &raw[start..end]
    }
}

#[cfg(test)]
mod tests {
    use ruff_python_parser::parse_module;

    use super::*;

    fn extract_from(src: &str, convention: DocstringLineConvention) -> Option<Docstring> {
        let module = parse_module(src).expect("valid module").into_syntax();
        let index = LineIndex::new(src);
        extract(src, &index, &module.body, convention, 65535)
    }

    #[test]
    fn extracts_single_line_docstring() {
        let doc = extract_from("\"\"\"M\"\"\"\nimport os\n", DocstringLineConvention::ReportsStartLine)
            .expect("docstring present");
        assert_eq!(doc.text, "M");
        assert_eq!(doc.start_line, 1);
        assert_eq!(doc.end_line, 1);
    }

    #[test]
    fn extracts_multiline_docstring_start_convention() {
        let src = "\"\"\"line one\nline two\"\"\"\nx = 1\n";
        let doc = extract_from(src, DocstringLineConvention::ReportsStartLine).expect("docstring present");
        assert_eq!(doc.text, "line one\nline two");
        assert_eq!(doc.start_line, 1);
        assert_eq!(doc.end_line, 2);
    }

    #[test]
    fn concatenates_adjacent_string_parts() {
        let src = "\"a\" \"b\"\nx = 1\n";
        let doc = extract_from(src, DocstringLineConvention::ReportsStartLine).expect("docstring present");
        assert_eq!(doc.text, "ab");
    }

    #[test]
    fn absent_when_first_statement_is_not_a_string() {
        assert!(extract_from("x = 1\n", DocstringLineConvention::ReportsStartLine).is_none());
    }

    #[test]
    fn strips_raw_prefix() {
        let src = "r\"\"\"raw\\ntext\"\"\"\n";
        let doc = extract_from(src, DocstringLineConvention::ReportsStartLine).expect("docstring present");
        assert_eq!(doc.text, "raw\\ntext");
    }

    #[test]
    fn truncates_multibyte_text_without_panicking() {
        // 171 three-byte characters is 513 bytes, one past a 512-byte limit,
        // so the naive `max_len` byte index lands inside the 171st character.
        let body = "\u{4e2d}".repeat(171);
        let src = format!("\"\"\"{body}\"\"\"\n");
        let module = parse_module(&src).expect("valid module").into_syntax();
        let index = LineIndex::new(&src);
        let doc = extract(&src, &index, &module.body, DocstringLineConvention::ReportsStartLine, 512)
            .expect("docstring present");
        assert!(doc.text.len() <= 512);
        assert!(doc.text.is_char_boundary(doc.text.len()));
        assert_eq!(doc.text, "\u{4e2d}".repeat(170));
    }
}
