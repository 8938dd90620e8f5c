//! Uniform diagnostics.
//!
//! Every fallible operation in this crate returns this module's [`Result`]
//! (`std::result::Result<T, Error>`). `Error` wraps an [`ErrorKind`] — one
//! variant family per stage (regex compilation, scanning, parsing,
//! node-payload access, emission) — and knows how to [`Error::render`]
//! itself as a human-facing message with a source snippet.

use thiserror::Error as ThisError;

/// The single error type returned by every fallible core operation.
#[derive(Debug, Clone, ThisError)]
#[error("{kind}")]
pub struct Error {
    kind: ErrorKind,
    location: Option<LocationInfo>,
}

/// The pre-rendered `line | snippet` / caret block, computed once by
/// [`crate::loc::SourceLocation::render`] at construction time so
/// [`Error::render`] has a single place to get its location text from
/// instead of re-deriving it from the raw `(line, snippet, column)` fields.
#[derive(Debug, Clone)]
struct LocationInfo(String);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Error {
            kind,
            location: None,
        }
    }

    pub(crate) fn at<U: crate::width::CharWidth>(
        kind: ErrorKind,
        loc: &crate::loc::SourceLocation<'_, U>,
    ) -> Self {
        Error {
            kind,
            location: Some(LocationInfo(loc.render())),
        }
    }

    /// The error kind, for programmatic matching.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// A multi-line, human-facing rendering: the kind's description, and
    /// (if this error is anchored to a source position) a `line | snippet`
    /// block with a caret under the offending column.
    pub fn render(&self) -> String {
        match &self.location {
            None => self.kind.to_string(),
            Some(LocationInfo(rendered)) => {
                format!("{}\n\t{}", self.kind, rendered.replace('\n', "\n\t"))
            }
        }
    }
}

/// The kind of failure, grouped by subsystem.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ErrorKind {
    // --- regex compilation ---
    #[error("unterminated string literal in pattern '{pattern}' (missing closing ')")]
    UnterminatedLiteral { pattern: String },

    #[error("unterminated subsequence in pattern '{pattern}' (missing closing '}}')")]
    UnterminatedSubsequence { pattern: String },

    #[error("unexpected subsequence end in pattern '{pattern}' (stray '}}')")]
    UnexpectedSubsequenceEnd { pattern: String },

    #[error("missing quantifiable operand in pattern '{pattern}'")]
    MissingQuantifiable { pattern: String },

    #[error("missing alternative operand in pattern '{pattern}'")]
    MissingAlternative { pattern: String },

    #[error("unrecognized token '{token}' in pattern '{pattern}'")]
    UnrecognizedPatternToken { pattern: String, token: char },

    // --- scanning ---
    #[error("unrecognized token in source")]
    UnrecognizedToken,

    // --- parsing ---
    #[error("expected token, found end of input")]
    ExpectedToken,

    #[error("unexpected token: expected one of [{expected}]")]
    UnexpectedToken { expected: String },

    #[error("integer overflow: value must be between -2147483648 and 2147483647")]
    IntegerOverflow,

    #[error("float overflow: magnitude must not exceed 1e37")]
    FloatOverflow,

    // --- node payload ---
    #[error("node '{identifier}' does not hold a value of the requested type")]
    PayloadMismatch { identifier: String },

    // --- emission ---
    #[error("node '{identifier}' of type 'nil' cannot be emitted")]
    NilNotEmittable { identifier: String },
}

pub type Result<T> = std::result::Result<T, Error>;
