//! # gedcom-parser
//!
//! A lenient reader for GEDCOM files.
//!
//! GEDCOM is the line oriented, level indented interchange format used by genealogy software.
//! Exports in the wild are rarely conformant, so this crate favours recovery over rejection:
//! a single pass lexes each physical line, a stack based assembler folds the lines into typed
//! records, and a fix-up pass repairs and resolves the cross references once the whole file has
//! been seen.
//!
//! File Layout
//!
//!     src/gedcom
//!       ├── interning   Tag and xref interning tables
//!       ├── lexing      The per line state machine
//!       ├── parsing     Record assembly, handlers and the fix-up pass
//!       ├── records     The typed record model
//!       ├── database    The keyed record store
//!       └── reader      File level entry point, transcoding and notifications
//!
//! For testing guidelines, see the [testing module](gedcom::testing).

pub mod gedcom;

pub use gedcom::{
    Database, Diagnostic, GedcomConfig, GedcomReader, LexError, LexErrorKind, LineToken,
    LineValue, ParseObserver, Parsed, Parser, ReadError, Record,
};
