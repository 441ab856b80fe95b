//! Citations
//!
//!     Pointing at a source (`SOUR`) or a repository (`REPO`) creates a citation on the
//!     citing record. After the parse each target also learns who cited it, through
//!     [CitedBy] entries on the source or repository.

use super::common::{CustomTag, NoteLink};
use super::date::DateValue;
use super::enums::Certainty;
use serde::Serialize;

/// A `SOUR` citation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceCitation {
    /// Xref of the cited source. Inline sources are given a generated xref once the whole file is read.
    pub source: Option<String>,
    /// The description of an inline source (a `SOUR` without a pointer).
    pub description: Option<String>,
    pub page: Option<String>,
    pub event_cited: Option<String>,
    pub role: Option<String>,
    pub data_date: Option<DateValue>,
    pub data_text: Option<String>,
    pub certainty: Option<Certainty>,
    /// `TEXT` directly under an inline source.
    pub text: Option<String>,
    pub notes: Vec<NoteLink>,
    pub multimedia: Vec<String>,
    pub custom: Vec<CustomTag>,
}

/// A `REPO` citation under a source.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepositoryCitation {
    pub repository: Option<String>,
    pub call_numbers: Vec<CallNumber>,
    pub notes: Vec<NoteLink>,
    pub custom: Vec<CustomTag>,
}

/// `CALN` with its optional `MEDI`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallNumber {
    pub number: String,
    pub media: Option<String>,
}

/// One entry in the back-list of a cited source or repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CitedBy {
    /// Xref of the citing top-level record. Empty when the header cites.
    pub xref: String,
    /// The page of a source citation, the first call number of a repository citation.
    pub detail: Option<String>,
}
