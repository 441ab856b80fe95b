//! Lexer
//!
//!     This module turns decoded text into [LineToken](crate::gedcom::token::LineToken)s,
//!     one physical line at a time.
//!
//! The Lexing Pipeline
//!
//!     1. Terminator detection. See [newline](newline). The first CR/LF sequence within the
//!        first 512 characters decides the file's line terminator, which is also what `CONT`
//!        continuation lines are joined with later.
//!
//!     2. Line splitting. See [lines](lines). The text is split into physical lines on the
//!        detected terminator or any lone CR or LF.
//!
//!     3. Line lexing. See [lexer](lexer). A small state machine walks each line through
//!        `Level -> XrefId -> Tag -> LineValue`, interning tags and xrefs as it goes.
//!
//! Leniency
//!
//!     GEDCOM producers disagree about delimiters, terminators, tabs and which characters
//!     may appear in tags. Each relaxation is a separate switch in [LexOptions], so a caller
//!     can be as strict as the standard or as forgiving as real files require.

pub mod characters;
pub mod lexer;
pub mod lines;
pub mod newline;
pub mod options;

pub use lexer::{LexState, Lexer};
pub use lines::{PhysicalLine, PhysicalLines};
pub use newline::Newline;
pub use options::LexOptions;

use crate::gedcom::error::LexError;
use crate::gedcom::token::LineToken;

/// Lex a whole text with fresh tables, stopping at the first lexical error.
///
/// Blank lines are skipped.
pub fn tokenize(source: &str, options: LexOptions) -> Result<Vec<LineToken>, LexError> {
    let newline = Newline::detect(source);
    let mut lexer = Lexer::new(options);
    let mut tokens = Vec::new();
    for line in PhysicalLines::new(source, newline) {
        if let Some(token) = lexer.lex_line(line.text, line.number)? {
            tokens.push(token);
        }
    }
    Ok(tokens)
}
