//! Diagnostics produced while compiling jianpu source
//!
//! Every problem the compiler finds is collected as a `ParseError` and
//! returned alongside the score. Nothing is thrown: lexical errors, malformed
//! grace notes and beat-count mismatches all leave a usable score behind.
//! Only a body without any notes (or an internal failure) yields no score.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Score;
use crate::parse::Token;

/// Location in the source text (1-based line/column, char offset)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Start of the document
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

/// What went wrong; `Display` is the user-facing message
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// Character with no meaning in the notation body
    #[error("unrecognized character: {character}")]
    UnrecognizedCharacter { character: char },

    /// `^` with no note after it
    #[error("grace prefix ^ must be followed by a note")]
    GraceWithoutNote,

    /// `^n` with no duration-underline
    #[error("grace note must carry a duration-underline: ^n/ for long, ^n// for short")]
    GraceWithoutUnderline,

    /// Measure length differs from the time signature
    #[error("measure {measure} duration mismatch: expected {expected} beats, got {actual:.2} beats")]
    DurationMismatch {
        measure: u32,
        expected: u32,
        actual: f64,
    },

    /// The body contained no measure at all
    #[error("no notes found")]
    NoNotes,

    /// Internal invariant broken (indicates a bug)
    #[error("parse failed: {detail}")]
    Internal { detail: String },
}

impl ParseErrorKind {
    pub fn internal(detail: impl Into<String>) -> Self {
        ParseErrorKind::Internal {
            detail: detail.into(),
        }
    }

    /// Fatal kinds are the ones that leave no score behind
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseErrorKind::NoNotes | ParseErrorKind::Internal { .. })
    }
}

/// A diagnostic with its half-open source range `[offset, offset + length)`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub position: SourcePosition,
    pub length: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: SourcePosition, length: usize) -> Self {
        Self {
            message: kind.to_string(),
            position,
            length,
            kind,
        }
    }

    /// Diagnostic covering a single token
    pub fn at_token(kind: ParseErrorKind, token: &Token) -> Self {
        Self::new(kind, token.position(), token.len().max(1))
    }
}

/// Outcome of one parse: score and diagnostics are independent
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ParseResult {
    pub score: Option<Score>,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// No score, exactly one error at the start of the document
    pub fn fatal(kind: ParseErrorKind) -> Self {
        Self {
            score: None,
            errors: vec![ParseError::new(kind, SourcePosition::start(), 0)],
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.score.is_none()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
