//! Error taxonomy and sink-failure propagation.
//!
//! Two stage-separated error types, matching the teacher's own
//! `ParseError`/`ReplError` split rather than a single opaque error type:
//! [`AnalyzeError`] is *data* delivered to the sink's `on_error` handler
//! (a failed parse is not a failure of the call), while [`SinkError`] is
//! what `analyze` itself returns when a handler fails.

use std::{error::Error as StdError, fmt};

use crate::{position::Position, truncate};

/// Sub-kind of a parser failure, matching the `cdm-pythonparser` taxonomy
/// recovered from `original_source/src/cdmpyparser.c`'s `getErrorMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeErrorKind {
    /// An indented block was expected but not found.
    ExpectedIndent,
    /// An indent appeared where none was expected.
    UnexpectedIndent,
    /// A dedent appeared where none was expected.
    UnexpectedDedent,
    /// Catch-all grammar violation.
    InvalidSyntax,
    /// The lexer produced a token the grammar never accepts.
    InvalidToken,
    /// Source ended inside a triple-quoted string.
    EofInTripleQuotedString,
    /// Source ended inside a single-quoted string (a literal newline hit it).
    EolInStringLiteral,
    /// Source ended before a statement completed.
    UnexpectedEof,
    /// Tabs and spaces mixed inconsistently in indentation.
    InconsistentTabsSpaces,
    /// An expression exceeded the parser's internal limit.
    ExpressionTooLong,
    /// A dedent didn't match any enclosing indentation level.
    DedentMismatch,
    /// Too many nested indentation levels.
    TooManyIndentationLevels,
    /// The source could not be decoded as text.
    DecodeError,
    /// A line-continuation backslash was followed by something other than a newline.
    UnexpectedCharAfterLineContinuation,
    /// The parse was interrupted.
    KeyboardInterrupt,
    /// The parser ran out of memory.
    OutOfMemory,
    /// No bucket above matched; the original message is preserved verbatim.
    Unknown,
}

impl AnalyzeErrorKind {
    /// The exact English phrase `cdm-pythonparser` used for this bucket.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::ExpectedIndent => "expected an indented block",
            Self::UnexpectedIndent => "unexpected indent",
            Self::UnexpectedDedent => "unexpected unindent",
            Self::InvalidSyntax => "invalid syntax",
            Self::InvalidToken => "invalid token",
            Self::EofInTripleQuotedString => "EOF while scanning triple-quoted string literal",
            Self::EolInStringLiteral => "EOL while scanning string literal",
            Self::UnexpectedEof => "unexpected EOF while parsing",
            Self::InconsistentTabsSpaces => "inconsistent use of tabs and spaces in indentation",
            Self::ExpressionTooLong => "expression too long",
            Self::DedentMismatch => "unindent does not match any outer indentation level",
            Self::TooManyIndentationLevels => "too many levels of indentation",
            Self::DecodeError => "decode error",
            Self::UnexpectedCharAfterLineContinuation => "unexpected character after line continuation character",
            Self::KeyboardInterrupt => "keyboard interrupt",
            Self::OutOfMemory => "no memory",
            Self::Unknown => "unknown parsing error",
        }
    }

    /// Classifies a concrete parser's error message into the taxonomy above.
    ///
    /// `ruff_python_parser` does not expose the same error-code enum the
    /// original CPython-based parser did, so the bucket is recovered by
    /// matching keywords in its `Display` output. Anything unrecognized
    /// falls back to `InvalidSyntax`, the original's own default arm.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("expected an indented block") {
            Self::ExpectedIndent
        } else if lower.contains("unexpected indent") {
            Self::UnexpectedIndent
        } else if lower.contains("unindent") && lower.contains("match") {
            Self::DedentMismatch
        } else if lower.contains("unexpected unindent") || lower.contains("unexpected dedent") {
            Self::UnexpectedDedent
        } else if lower.contains("triple") && lower.contains("eof") {
            Self::EofInTripleQuotedString
        } else if lower.contains("eol") && lower.contains("string") {
            Self::EolInStringLiteral
        } else if lower.contains("unexpected eof") || lower.contains("unexpected end of file") {
            Self::UnexpectedEof
        } else if lower.contains("tab") && lower.contains("space") {
            Self::InconsistentTabsSpaces
        } else if lower.contains("too long") || lower.contains("overflow") {
            Self::ExpressionTooLong
        } else if lower.contains("too many") && lower.contains("indent") {
            Self::TooManyIndentationLevels
        } else if lower.contains("decode") {
            Self::DecodeError
        } else if lower.contains("line continuation") {
            Self::UnexpectedCharAfterLineContinuation
        } else if lower.contains("invalid token") {
            Self::InvalidToken
        } else {
            Self::InvalidSyntax
        }
    }
}

/// A parser failure delivered to [`crate::event::Sink::on_error`].
///
/// Formats as `"{line}:{col} {message}"`, with a trailing `"\n{text}"` when
/// the parser supplied the offending source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeError {
    kind: AnalyzeErrorKind,
    position: Position,
    offending_text: Option<String>,
}

impl AnalyzeError {
    /// Builds an error, truncating `offending_text` to `max_len` bytes.
    #[must_use]
    pub fn new(kind: AnalyzeErrorKind, position: Position, offending_text: Option<String>, max_len: usize) -> Self {
        let offending_text = offending_text.map(|mut text| {
            truncate::truncate(&mut text, max_len);
            text
        });
        Self {
            kind,
            position,
            offending_text,
        }
    }

    /// The classified error bucket.
    #[must_use]
    pub fn kind(&self) -> AnalyzeErrorKind {
        self.kind
    }

    /// The position the parser reported for the failure.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.position.line, self.position.column, self.kind.message())?;
        if let Some(text) = &self.offending_text {
            write!(f, "\n{text}")?;
        }
        Ok(())
    }
}

impl StdError for AnalyzeError {}

/// Returned by [`crate::analyze`] when a [`crate::event::Sink`] handler
/// fails; such a failure aborts the call and surfaces to the caller.
#[derive(Debug)]
pub struct SinkError(Box<dyn StdError + Send + Sync + 'static>);

impl SinkError {
    /// Wraps any error returned by a sink handler.
    pub fn new(source: impl StdError + Send + Sync + 'static) -> Self {
        Self(Box::new(source))
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink handler failed: {}", self.0)
    }
}

impl StdError for SinkError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.0.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_multibyte_offending_text_without_panicking() {
        let text = "\u{4e2d}".repeat(5);
        let position = Position { line: 1, column: 1, offset: 0 };
        let err = AnalyzeError::new(AnalyzeErrorKind::InvalidSyntax, position, Some(text), 4);
        let rendered = err.to_string();
        assert!(rendered.is_char_boundary(rendered.len()));
        assert!(rendered.ends_with(&"\u{4e2d}".repeat(1)));
    }
}
