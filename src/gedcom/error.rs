//! Error types
//!
//!     Only two things can make a read fail. A [LexError] means a physical line could not
//!     be read as a GEDCOM line at all; a [ReadError] means the input or the configuration
//!     could not be obtained. Everything the assembler finds questionable is reported as a
//!     [Diagnostic](super::Diagnostic) instead.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// The lexical errors the line lexer can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Error)]
pub enum LexErrorKind {
    #[error("level expected")]
    LevelExpected,
    #[error("level must be between 0 and 99")]
    LevelInvalid,
    #[error("missing delimiter after level")]
    LevelMissingDelim,
    #[error("missing delimiter after xref id")]
    XrefIDMissingDelim,
    #[error("xref id is longer than 22 characters")]
    XrefIDTooLong,
    #[error("tag expected")]
    TagExpected,
    #[error("missing delimiter or terminator after tag")]
    TagMissingDelimOrTerm,
    #[error("line value expected")]
    LineValueExpected,
    #[error("missing terminator after line value")]
    LineValueMissingTerm,
    #[error("invalid line value")]
    LineValueInvalid,
    #[error("invalid delimiter")]
    InvalidDelim,
}

/// A lexical error with the physical position it was raised at.
///
/// `line` is 1-based, `column` is the 1-based character column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("line {line}, column {column}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub column: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}

/// Failures that prevent a read from starting.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}
