//! Capability flags and resource bounds for an [`crate::analyze`] call.

/// Which line the concrete parser reports for a multi-line string token.
///
/// Some parser versions report the *end* line of a triple-quoted literal,
/// others the *start* line, and the docstring extractor must derive the
/// missing end from embedded newline counts rather than hard-coding a
/// parser-version check. `ruff_python_parser` reports accurate start and
/// end positions for every token, so in practice only one branch of the
/// adjustment ever fires against it, but the toggle is kept so the same
/// extractor works unmodified against a concrete parser with the older
/// single-line-per-token limitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocstringLineConvention {
    /// The parser's reported line for a string token is its *first* line.
    #[default]
    ReportsStartLine,
    /// The parser's reported line for a string token is its *last* line.
    ReportsEndLine,
}

/// Resource bounds and capability flags for one [`crate::analyze`] call.
///
/// Exceeding a bound truncates the affected payload; the event carrying it
/// is still emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Which end of a multi-line string token the parser reports.
    pub docstring_line_convention: DocstringLineConvention,
    /// Maximum length of a re-serialized dotted module path.
    pub max_dotted_name_len: usize,
    /// Maximum length of a re-serialized expression (annotation, default,
    /// base-class or decorator argument).
    pub max_expr_len: usize,
    /// Maximum length of an extracted docstring.
    pub max_docstring_len: usize,
    /// Maximum length of a formatted parser-error message.
    pub max_error_msg_len: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            docstring_line_convention: DocstringLineConvention::default(),
            max_dotted_name_len: 512,
            max_expr_len: 2048,
            max_docstring_len: 65535,
            max_error_msg_len: 32768,
        }
    }
}
