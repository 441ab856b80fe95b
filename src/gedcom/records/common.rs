//! Structures shared by many record kinds

use super::citation::SourceCitation;
use super::date::DateValue;
use super::enums::Restriction;
use super::note::Note;
use serde::Serialize;

/// Fields every top-level record carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordBase {
    pub xref: String,
    /// How many pointers elsewhere in the file name this record.
    ///
    /// Individuals and families are linked too often for a count to mean anything and
    /// are left at 0.
    pub reference_count: u32,
    pub notes: Vec<NoteLink>,
    /// Xrefs of linked multimedia records, including inline ones given a generated id.
    pub multimedia: Vec<String>,
    pub citations: Vec<SourceCitation>,
    pub user_references: Vec<UserReference>,
    pub automated_record_id: Option<String>,
    pub change_date: Option<DateValue>,
    pub restriction: Option<Restriction>,
    pub custom: Vec<CustomTag>,
}

impl RecordBase {
    pub fn new(xref: impl Into<String>) -> Self {
        Self {
            xref: xref.into(),
            ..Self::default()
        }
    }
}

/// A `NOTE` structure: either a pointer to a note record or the note text itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NoteLink {
    Pointer(String),
    Inline(Note),
}

impl NoteLink {
    pub fn text(&self) -> Option<&str> {
        match self {
            NoteLink::Pointer(_) => None,
            NoteLink::Inline(note) => Some(&note.text),
        }
    }
}

/// `REFN` with its optional `TYPE`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserReference {
    pub number: String,
    pub kind: Option<String>,
}

/// An address structure, together with the contact lines GEDCOM places next to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Address {
    /// The free form `ADDR` text, continuation lines joined.
    pub lines: String,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub faxes: Vec<String>,
    pub websites: Vec<String>,
    pub custom: Vec<CustomTag>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self == &Address::default()
    }

    /// Merge a later address structure into this one. Contact lines accumulate, the
    /// address fields of `other` win where present.
    pub fn absorb(&mut self, other: Address) {
        if !other.lines.is_empty() {
            self.lines = other.lines;
        }
        let fields = [
            (&mut self.line1, other.line1),
            (&mut self.line2, other.line2),
            (&mut self.line3, other.line3),
            (&mut self.city, other.city),
            (&mut self.state, other.state),
            (&mut self.postal_code, other.postal_code),
            (&mut self.country, other.country),
        ];
        for (field, value) in fields {
            if value.is_some() {
                *field = value;
            }
        }
        self.phones.extend(other.phones);
        self.emails.extend(other.emails);
        self.faxes.extend(other.faxes);
        self.websites.extend(other.websites);
        self.custom.extend(other.custom);
    }
}

/// A tag this crate does not model, kept with its whole subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomTag {
    pub tag: String,
    pub value: Option<String>,
    pub children: Vec<CustomTag>,
}

impl CustomTag {
    pub fn new(tag: impl Into<String>, value: Option<String>) -> Self {
        Self {
            tag: tag.into(),
            value,
            children: Vec::new(),
        }
    }
}
