//! Record database
//!
//!     The destination of a parse: top-level records keyed by xref, kept in file order, plus
//!     the header. Keys are unique and never change once a record is inserted; a second
//!     record under a taken xref is refused.
//!
//!     Typed accessors (`individual`, `families`, ...) give each record kind its own view
//!     over the one store.

use crate::gedcom::records::{
    Family, Header, Individual, Multimedia, Note, Record, RecordKind, Repository, Source,
    Submission, Submitter,
};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Database {
    pub header: Option<Header>,
    records: Vec<Record>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    generated: usize,
}

/// Returned by [Database::insert] when the xref is already taken.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateXref(pub Record);

macro_rules! typed_views {
    ($( $variant:ident, $type:ty, $one:ident, $one_mut:ident, $all:ident; )*) => {
        $(
            pub fn $one(&self, xref: &str) -> Option<&$type> {
                match self.get(xref) {
                    Some(Record::$variant(record)) => Some(record),
                    _ => None,
                }
            }

            pub fn $one_mut(&mut self, xref: &str) -> Option<&mut $type> {
                match self.get_mut(xref) {
                    Some(Record::$variant(record)) => Some(record),
                    _ => None,
                }
            }

            pub fn $all(&self) -> impl Iterator<Item = &$type> {
                self.records.iter().filter_map(|record| match record {
                    Record::$variant(record) => Some(record),
                    _ => None,
                })
            }
        )*
    };
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a top-level record under its xref.
    ///
    /// The trailer is stored without a key. Any other record needs a non-empty xref that
    /// is not taken yet; otherwise the record is handed back.
    pub fn insert(&mut self, record: Record) -> Result<(), DuplicateXref> {
        if record.kind() == RecordKind::Trailer {
            self.records.push(record);
            return Ok(());
        }
        let xref = record.xref();
        if xref.is_empty() || self.index.contains_key(xref) {
            return Err(DuplicateXref(record));
        }
        self.index.insert(xref.to_string(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, xref: &str) -> Option<&Record> {
        self.index.get(xref).map(|&position| &self.records[position])
    }

    pub fn get_mut(&mut self, xref: &str) -> Option<&mut Record> {
        let position = *self.index.get(xref)?;
        self.records.get_mut(position)
    }

    pub fn contains(&self, xref: &str) -> bool {
        self.index.contains_key(xref)
    }

    pub fn kind_of(&self, xref: &str) -> Option<RecordKind> {
        self.get(xref).map(Record::kind)
    }

    /// All records in file order, trailer included.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.records.iter_mut()
    }

    /// Keyed records only.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn has_trailer(&self) -> bool {
        self.records
            .iter()
            .any(|record| record.kind() == RecordKind::Trailer)
    }

    /// A fresh xref `{prefix}{n}` that no record uses yet.
    pub fn generate_xref(&mut self, prefix: &str) -> String {
        loop {
            self.generated += 1;
            let candidate = format!("{}{}", prefix, self.generated);
            if !self.index.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    typed_views! {
        Individual, Individual, individual, individual_mut, individuals;
        Family, Family, family, family_mut, families;
        Source, Source, source, source_mut, sources;
        Repository, Repository, repository, repository_mut, repositories;
        Note, Note, note, note_mut, notes;
        Multimedia, Multimedia, multimedia, multimedia_mut, multimedia_objects;
        Submitter, Submitter, submitter, submitter_mut, submitters;
        Submission, Submission, submission, submission_mut, submissions;
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
