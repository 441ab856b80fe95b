//! GEDCOM reading pipeline
//!
//!     The pipeline runs in three stages. Every physical line goes through the
//!     [lexer](lexing) and comes out as a [LineToken]. Tokens are fed in order to the
//!     [assembler](parsing), which keeps a stack of open records: a line at level `n` closes
//!     every open record at level `n` or deeper, then either opens a new record or updates
//!     the one left on top of the stack. Once the input is exhausted the
//!     [fix-up pass](parsing::fixup) resolves forward references and repairs family links
//!     that the file only encoded in one direction.
//!
//! Leniency
//!
//!     Real GEDCOM exports are messy. Lexical problems (a line that is not a GEDCOM line at
//!     all) stop the read. Everything else, such as unknown tags, dangling references,
//!     unparseable enumerations or duplicate ids, becomes a [Diagnostic] and the reader
//!     carries on with a documented default.
//!
//! Entry Points
//!
//!     - [GedcomReader] reads a file, a byte buffer or a string.
//!     - [Parser](parsing::Parser) is the lower level line feeder for callers that want to
//!       decide themselves what to do after a lexical error.

pub mod config;
pub mod database;
pub mod diagnostics;
pub mod encoding;
pub mod error;
pub mod interning;
pub mod lexing;
pub mod parsing;
pub mod reader;
pub mod records;
pub mod testing;
pub mod token;

pub use config::GedcomConfig;
pub use database::Database;
pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use encoding::{Charset, DefaultTranscoder, Transcoder};
pub use error::{LexError, LexErrorKind, ReadError};
pub use parsing::{ParseObserver, Parsed, Parser};
pub use reader::GedcomReader;
pub use records::Record;
pub use token::{LineToken, LineValue};
