//! Record model
//!
//!     The typed records the assembler builds. Top-level records form the closed [Record]
//!     enum; everything nested inside them (events, names, places, citations, family
//!     links...) is a plain struct owned by its record.
//!
//!     The header is not a [Record]: a file has at most one, and the
//!     [Database](crate::gedcom::Database) keeps it apart from the keyed records.
//!
//!     Every type derives `Serialize`, which is what `Database::to_json` relies on.

pub mod citation;
pub mod common;
pub mod date;
pub mod enums;
pub mod event;
pub mod family;
pub mod header;
pub mod individual;
pub mod multimedia;
pub mod note;
pub mod place;
pub mod relink;
pub mod source;
pub mod submitter;

pub use citation::{CallNumber, CitedBy, RepositoryCitation, SourceCitation};
pub use common::{Address, CustomTag, NoteLink, RecordBase, UserReference};
pub use date::{Calendar, DateQualifier, DateValue};
pub use enums::{AdoptedBy, Certainty, ChildLinkStatus, FamilyRole, Pedigree, Restriction, Sex};
pub use event::{Event, FamilyEvent, IndividualEvent, SpouseSealing};
pub use family::{Child, Family};
pub use header::{Header, HeaderSource};
pub use individual::{Association, FamilyLink, Individual, PersonalName};
pub use multimedia::{Multimedia, MultimediaFile};
pub use note::Note;
pub use place::{Place, Variation};
pub use source::{RecordedEvents, Repository, Source};
pub use submitter::{Submission, Submitter};

use serde::Serialize;
use std::fmt;

/// A top-level record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Record {
    Family(Family),
    Individual(Individual),
    Multimedia(Multimedia),
    Note(Note),
    Repository(Repository),
    Source(Source),
    Submitter(Submitter),
    Submission(Submission),
    Trailer,
}

/// The kind of a [Record], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
    Family,
    Individual,
    Multimedia,
    Note,
    Repository,
    Source,
    Submitter,
    Submission,
    Trailer,
}

impl RecordKind {
    /// The level 0 tag that opens a record of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::Family => "FAM",
            RecordKind::Individual => "INDI",
            RecordKind::Multimedia => "OBJE",
            RecordKind::Note => "NOTE",
            RecordKind::Repository => "REPO",
            RecordKind::Source => "SOUR",
            RecordKind::Submitter => "SUBM",
            RecordKind::Submission => "SUBN",
            RecordKind::Trailer => "TRLR",
        }
    }

    /// Individuals and families do not count incoming references.
    pub fn counts_references(&self) -> bool {
        !matches!(self, RecordKind::Individual | RecordKind::Family)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Family(_) => RecordKind::Family,
            Record::Individual(_) => RecordKind::Individual,
            Record::Multimedia(_) => RecordKind::Multimedia,
            Record::Note(_) => RecordKind::Note,
            Record::Repository(_) => RecordKind::Repository,
            Record::Source(_) => RecordKind::Source,
            Record::Submitter(_) => RecordKind::Submitter,
            Record::Submission(_) => RecordKind::Submission,
            Record::Trailer => RecordKind::Trailer,
        }
    }

    pub fn base(&self) -> Option<&RecordBase> {
        match self {
            Record::Family(record) => Some(&record.base),
            Record::Individual(record) => Some(&record.base),
            Record::Multimedia(record) => Some(&record.base),
            Record::Note(record) => Some(&record.base),
            Record::Repository(record) => Some(&record.base),
            Record::Source(record) => Some(&record.base),
            Record::Submitter(record) => Some(&record.base),
            Record::Submission(record) => Some(&record.base),
            Record::Trailer => None,
        }
    }

    pub fn base_mut(&mut self) -> Option<&mut RecordBase> {
        match self {
            Record::Family(record) => Some(&mut record.base),
            Record::Individual(record) => Some(&mut record.base),
            Record::Multimedia(record) => Some(&mut record.base),
            Record::Note(record) => Some(&mut record.base),
            Record::Repository(record) => Some(&mut record.base),
            Record::Source(record) => Some(&mut record.base),
            Record::Submitter(record) => Some(&mut record.base),
            Record::Submission(record) => Some(&mut record.base),
            Record::Trailer => None,
        }
    }

    /// The record's xref, empty for the trailer.
    pub fn xref(&self) -> &str {
        self.base().map_or("", |base| base.xref.as_str())
    }

    pub fn reference_count(&self) -> u32 {
        self.base().map_or(0, |base| base.reference_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_xref() {
        let record = Record::Source(Source::new("S1"));
        assert_eq!(record.kind(), RecordKind::Source);
        assert_eq!(record.xref(), "S1");
        assert_eq!(Record::Trailer.xref(), "");
    }

    #[test]
    fn test_reference_counting_kinds() {
        assert!(!RecordKind::Individual.counts_references());
        assert!(!RecordKind::Family.counts_references());
        assert!(RecordKind::Note.counts_references());
    }

    #[test]
    fn test_serialized_kind_tag() {
        let json = serde_json::to_value(Record::Note(Note::new("N1", 0))).expect("serializes");
        assert_eq!(json["kind"], "Note");
        assert_eq!(json["xref"], "N1");
    }
}
