//! Places

use super::citation::SourceCitation;
use super::common::{CustomTag, NoteLink};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    /// `FORM`: the jurisdiction names of the comma separated parts.
    pub form: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub phonetic: Vec<Variation>,
    pub romanized: Vec<Variation>,
    pub notes: Vec<NoteLink>,
    pub citations: Vec<SourceCitation>,
    pub custom: Vec<CustomTag>,
}

impl Place {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A phonetic (`FONE`) or romanized (`ROMN`) variation of a name or place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Variation {
    pub value: String,
    pub kind: Option<String>,
}
