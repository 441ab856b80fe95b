//! Events and attributes
//!
//!     Individual events (`BIRT`, `DEAT`, ...), individual attributes (`OCCU`, `RESI`, ...),
//!     LDS ordinances and family events all share the [Event] detail structure. The wrappers
//!     add what only one side has: the family an individual event names, and the spouse ages
//!     of a family event.

use super::citation::SourceCitation;
use super::common::{Address, CustomTag, NoteLink};
use super::date::DateValue;
use super::enums::{AdoptedBy, Restriction};
use super::place::Place;
use serde::Serialize;

/// Event detail shared by every event and attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Event {
    /// The GEDCOM tag (`BIRT`, `OCCU`, `EVEN`, ...).
    pub tag: String,
    /// A descriptive type: `TYPE`, or the name a vendor tag was mapped to.
    pub event_type: Option<String>,
    /// The line value. `Y` on an event, the descriptor on an attribute.
    pub value: Option<String>,
    pub date: Option<DateValue>,
    pub place: Option<Place>,
    pub address: Option<Address>,
    pub age: Option<String>,
    pub agency: Option<String>,
    pub cause: Option<String>,
    pub religion: Option<String>,
    pub restriction: Option<Restriction>,
    /// LDS ordinances only.
    pub temple: Option<String>,
    /// LDS ordinances only.
    pub status: Option<String>,
    pub notes: Vec<NoteLink>,
    pub citations: Vec<SourceCitation>,
    pub multimedia: Vec<String>,
    pub custom: Vec<CustomTag>,
}

impl Event {
    pub fn new(tag: impl Into<String>, value: Option<String>) -> Self {
        Self {
            tag: tag.into(),
            value,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndividualEvent {
    #[serde(flatten)]
    pub event: Event,
    /// `FAMC` under a birth, christening or adoption event.
    pub family: Option<String>,
    /// `ADOP` under the `FAMC` of an adoption event.
    pub adopted_by: Option<AdoptedBy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FamilyEvent {
    #[serde(flatten)]
    pub event: Event,
    pub husband_age: Option<String>,
    pub wife_age: Option<String>,
}

/// `SLGS`: LDS sealing of a couple.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpouseSealing {
    pub date: Option<DateValue>,
    pub place: Option<Place>,
    pub temple: Option<String>,
    pub status: Option<String>,
    pub notes: Vec<NoteLink>,
    pub citations: Vec<SourceCitation>,
    pub custom: Vec<CustomTag>,
}

pub const INDIVIDUAL_EVENT_TAGS: &[&str] = &[
    "BIRT", "CHR", "DEAT", "BURI", "CREM", "ADOP", "BAPM", "BARM", "BASM", "BLES", "CHRA",
    "CONF", "FCOM", "ORDN", "NATU", "EMIG", "IMMI", "CENS", "PROB", "WILL", "GRAD", "RETI",
    "EVEN",
];

pub const INDIVIDUAL_ATTRIBUTE_TAGS: &[&str] = &[
    "CAST", "DSCR", "EDUC", "IDNO", "NATI", "NCHI", "NMR", "OCCU", "PROP", "RELI", "RESI",
    "SSN", "TITL", "FACT",
];

pub const LDS_ORDINANCE_TAGS: &[&str] = &["BAPL", "CONL", "ENDL", "SLGC"];

pub const FAMILY_EVENT_TAGS: &[&str] = &[
    "ANUL", "CENS", "DIV", "DIVF", "ENGA", "MARR", "MARB", "MARC", "MARL", "MARS", "EVEN",
    "RESI",
];
