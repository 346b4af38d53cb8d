//! Error types for the formula pipeline.
//!
//! This module provides:
//! - `DrawError` - the error enum for validation, parsing, and compile failures
//! - `Span` - source location tracking for precise syntax error messages

use std::fmt;

/// Source location span for error reporting.
/// Represents a range of bytes in the input formula string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span. If end < start, they will be swapped.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Create a span for a single position.
    #[inline]
    #[must_use]
    pub const fn at(pos: usize) -> Self {
        Self { start: pos, end: pos + 1 }
    }

    /// Get the start position.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Get the end position.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Check if this span has valid location info (covers at least one byte).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Format the span for display (1-indexed for users).
    #[must_use]
    pub fn display(&self) -> String {
        if !self.is_valid() {
            String::new()
        } else if self.end - self.start == 1 {
            format!(" at position {}", self.start + 1)
        } else {
            format!(" at positions {}-{}", self.start + 1, self.end)
        }
    }
}

/// Errors surfaced by the formula pipeline, from viewport validation through
/// codegen. `Cancelled` is intentionally not a member of this enum: it is a
/// first-class `RedrawInfo` status, not a failure.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DrawError {
    /// The viewport or seed point failed validation before compilation started.
    RangeError {
        /// Human-readable description of the offending range.
        msg: String,
    },
    /// The formula was rejected by the lexer or parser.
    SyntaxError {
        /// Description of the syntax error.
        msg: String,
        /// Location of the error in the source, when known.
        span: Option<Span>,
    },
    /// Code generation failed after a successful parse.
    CompileError {
        /// Description of the failure.
        msg: String,
    },
}

impl DrawError {
    /// Build a `RangeError`.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::RangeError { msg: msg.into() }
    }

    /// Build a `SyntaxError` without a span.
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::SyntaxError { msg: msg.into(), span: None }
    }

    /// Build a `SyntaxError` with a span.
    pub fn syntax_at(msg: impl Into<String>, span: Span) -> Self {
        Self::SyntaxError { msg: msg.into(), span: Some(span) }
    }

    /// Build a `CompileError`.
    pub fn compile(msg: impl Into<String>) -> Self {
        Self::CompileError { msg: msg.into() }
    }

    /// Render the message as it should appear to the end user, per the
    /// "Formula error: ..." convention used for syntax failures.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::SyntaxError { .. } => format!("Formula error: {self}."),
            Self::RangeError { .. } | Self::CompileError { .. } => format!("{self}."),
        }
    }
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RangeError { msg } | Self::CompileError { msg } => write!(f, "{msg}"),
            Self::SyntaxError { msg, span } => {
                write!(f, "{msg}{}", span.map_or(String::new(), |s| s.display()))
            }
        }
    }
}

impl std::error::Error for DrawError {}
