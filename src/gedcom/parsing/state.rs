//! Parse state
//!
//!     Everything one parse owns besides the lexer:
//!
//!     - the record stack: the records still open, levels strictly increasing from the
//!       bottom (a top-level record) to the top (the innermost nested structure);
//!     - the tag stack: the tag of the last line seen at each level above the current one,
//!       which handlers consult to interpret a line by its parent (`TYPE` under `REFN`
//!       versus `TYPE` under `FONE`);
//!     - the [ParseScope]: the destination database, the diagnostics, and the bookkeeping
//!       the fix-up pass consumes.

use super::node::{Node, TextField};
use crate::gedcom::config::RecordOptions;
use crate::gedcom::database::{Database, DuplicateXref};
use crate::gedcom::diagnostics::Diagnostics;
use crate::gedcom::interning::Key;
use crate::gedcom::lexing::Newline;
use crate::gedcom::records::{CitedBy, Record, RecordKind};
use log::debug;
use std::collections::HashSet;

/// Levels run from 0 to 99, so neither stack can grow past this.
pub const MAX_DEPTH: usize = 100;

/// Multi-line text being accumulated from `CONT`/`CONC` lines.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingText {
    pub field: TextField,
    /// Level of the line that started the text. Continuations sit one level deeper.
    pub level: u8,
    pub text: String,
}

/// A record on the stack.
#[derive(Debug)]
pub struct OpenRecord {
    pub level: u8,
    /// Physical line that opened the record.
    pub line: usize,
    pub node: Node,
    pub pending: Option<PendingText>,
}

impl OpenRecord {
    pub fn new(level: u8, line: usize, node: Node) -> Self {
        Self {
            level,
            line,
            node,
            pending: None,
        }
    }

    /// Move accumulated text into its field.
    pub fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.node.set_text(pending.field, pending.text);
        }
    }
}

/// Tag of the most recent line at each open level.
#[derive(Debug, Default)]
pub struct TagStack {
    entries: Vec<(Key, u8)>,
}

impl TagStack {
    /// Drop the entries at `level` or deeper.
    pub fn pop_to(&mut self, level: u8) {
        while self.entries.last().is_some_and(|(_, top)| *top >= level) {
            self.entries.pop();
        }
    }

    pub fn push(&mut self, tag: Key, level: u8) {
        if self.entries.len() < MAX_DEPTH {
            self.entries.push((tag, level));
        }
    }

    /// Tag of the closest line above the current one.
    pub fn parent(&self) -> Option<Key> {
        self.entries.last().map(|(tag, _)| tag.clone())
    }

    /// Tag of the line at exactly `level`, if one is open.
    pub fn at(&self, level: u8) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, at)| *at == level)
            .map(|(tag, _)| &**tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A pointer read during the parse, checked once the whole file is in.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredReference {
    pub xref: String,
    pub expected: RecordKind,
    pub line: usize,
}

/// A citation waiting to be added to the back-list of its target.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedCitation {
    pub target: String,
    pub cited_by: CitedBy,
}

/// Parse-wide data shared by the assembler, the handlers and the fix-up pass.
#[derive(Debug)]
pub struct ParseScope {
    pub database: Database,
    pub diagnostics: Diagnostics,
    pub deferred: Vec<DeferredReference>,
    /// Xrefs of top-level notes dropped for having no text.
    pub discarded_notes: HashSet<String>,
    pub source_citations: Vec<CollectedCitation>,
    pub repository_citations: Vec<CollectedCitation>,
    /// Joins `CONT` lines.
    pub newline: Newline,
    pub options: RecordOptions,
    /// The header's `CHAR` value, once seen.
    pub declared_charset: Option<String>,
    /// Inline sources and objects under provisional xrefs, numbered by the fix-up pass.
    pub inline_records: Vec<Record>,
    provisional: usize,
}

impl ParseScope {
    pub fn new(options: RecordOptions, newline: Newline) -> Self {
        Self {
            database: Database::new(),
            diagnostics: Diagnostics::new(),
            deferred: Vec::new(),
            discarded_notes: HashSet::new(),
            source_citations: Vec::new(),
            repository_citations: Vec::new(),
            newline,
            options,
            declared_charset: None,
            inline_records: Vec::new(),
            provisional: 0,
        }
    }

    /// Remember a pointer for the fix-up pass.
    pub fn refer(&mut self, xref: &str, expected: RecordKind, line: usize) {
        self.deferred.push(DeferredReference {
            xref: xref.to_string(),
            expected,
            line,
        });
    }

    pub fn warn(&mut self, line: usize, code: &str, message: impl Into<String>) {
        self.diagnostics.warn(line, code, message);
    }

    /// Insert a finished top-level record, reporting a taken xref.
    pub fn insert(&mut self, record: Record, line: usize) {
        debug!(
            "event=record_closed kind={} xref={}",
            record.kind(),
            record.xref()
        );
        if let Err(DuplicateXref(refused)) = self.database.insert(record) {
            self.warn(
                line,
                "duplicate-xref",
                format!(
                    "{} record @{}@ reuses an existing xref and was dropped",
                    refused.kind(),
                    refused.xref()
                ),
            );
        }
    }

    /// Hold an inline record until the file's own xrefs are all known. Returns the
    /// provisional xref links to it carry meanwhile; it contains `@`, which no xref read from
    /// a line can.
    pub fn hold_inline(&mut self, mut record: Record) -> String {
        self.provisional += 1;
        let xref = format!("@{}", self.provisional);
        if let Some(base) = record.base_mut() {
            base.xref.clone_from(&xref);
        }
        self.inline_records.push(record);
        xref
    }

    pub fn generate_xref(&mut self) -> String {
        self.database.generate_xref(&self.options.generated_xref_prefix)
    }
}

/// The record stack, the tag stack and the scope of one parse.
#[derive(Debug)]
pub struct ParseState {
    pub records: Vec<OpenRecord>,
    pub tags: TagStack,
    pub scope: ParseScope,
}

impl ParseState {
    pub fn new(options: RecordOptions, newline: Newline) -> Self {
        Self {
            records: Vec::new(),
            tags: TagStack::default(),
            scope: ParseScope::new(options, newline),
        }
    }

    /// Xref of the top-level record at the bottom of the stack, empty for the header.
    pub fn owner_xref(&self) -> String {
        self.records
            .first()
            .and_then(|record| record.node.xref())
            .unwrap_or_default()
            .to_string()
    }
}
