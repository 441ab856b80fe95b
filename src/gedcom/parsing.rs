//! Record assembly
//!
//!     Lines come in as [LineToken]s and leave as records in a [Database]. The work is split
//!     the same way the data flows:
//!
//!     - [assembler]: the record stack, the `CONT`/`CONC` accumulator and the close rules;
//!     - [handlers]: what each tag means under each kind of record;
//!     - [node]: the records and nested structures while they are still open, and how a
//!       closed child is handed to its parent;
//!     - [custom_tags]: vendor tags read as their standard equivalents;
//!     - [fixup]: the pass that runs once the input is exhausted;
//!     - [parser]: the line feeder tying lexer, assembler and fix-up together.
//!
//!     Nothing in this module is global. All parse data lives in a
//!     [ParseState](state::ParseState) owned by one [Parser].

pub mod assembler;
pub mod custom_tags;
pub mod fixup;
pub mod handlers;
pub mod node;
pub mod parser;
pub mod state;

pub use parser::Parser;

use crate::gedcom::database::Database;
use crate::gedcom::diagnostics::{Diagnostic, DiagnosticSeverity};
use crate::gedcom::encoding::Charset;
use crate::gedcom::error::LexError;
use crate::gedcom::token::LineToken;

/// Notifications delivered while a file is read, in file order.
///
/// Every method has an empty default, so an observer only implements what it needs.
pub trait ParseObserver {
    /// A line was lexed.
    fn tag_found(&mut self, _token: &LineToken) {}

    /// A line could not be lexed.
    fn parse_error(&mut self, _error: &LexError) {}

    /// Share of the input consumed, 0 to 100.
    fn progress(&mut self, _percent: u8) {}
}

/// Observer that ignores everything.
impl ParseObserver for () {}

/// The outcome of a read.
///
/// The database is always present. After a lexical error it holds what was read up to the
/// failing line, and `error` says where the read stopped.
#[derive(Debug)]
pub struct Parsed {
    pub database: Database,
    pub diagnostics: Vec<Diagnostic>,
    pub error: Option<LexError>,
    /// The charset the text was finally decoded with, when read from bytes.
    pub charset: Option<Charset>,
}

impl Parsed {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == DiagnosticSeverity::Warning)
    }

    pub fn into_result(self) -> Result<Database, LexError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.database),
        }
    }
}
