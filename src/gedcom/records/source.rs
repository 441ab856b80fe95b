//! Sources and repositories

use super::citation::{CitedBy, RepositoryCitation};
use super::common::{Address, RecordBase};
use super::date::DateValue;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Source {
    #[serde(flatten)]
    pub base: RecordBase,
    pub title: Option<String>,
    /// `AUTH`
    pub originator: Option<String>,
    /// `ABBR`: the short title the source is filed under.
    pub filed_by: Option<String>,
    pub publication: Option<String>,
    pub text: Option<String>,
    /// `AGNC` under `DATA`.
    pub agency: Option<String>,
    /// `EVEN` entries under `DATA`.
    pub recorded_events: Vec<RecordedEvents>,
    pub repositories: Vec<RepositoryCitation>,
    /// Records citing this source, filled in after the parse.
    pub cited_by: Vec<CitedBy>,
}

impl Source {
    pub fn new(xref: impl Into<String>) -> Self {
        Self {
            base: RecordBase::new(xref),
            ..Self::default()
        }
    }

    pub fn has_title(&self) -> bool {
        self.title
            .as_deref()
            .is_some_and(|title| !title.trim().is_empty())
    }
}

/// The events a source records, with the period and jurisdiction it covers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordedEvents {
    /// Comma separated event tags, as written.
    pub events: String,
    pub period: Option<DateValue>,
    pub jurisdiction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Repository {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: Option<String>,
    pub address: Option<Address>,
    /// Sources citing this repository, filled in after the parse.
    pub cited_by: Vec<CitedBy>,
}

impl Repository {
    pub fn new(xref: impl Into<String>) -> Self {
        Self {
            base: RecordBase::new(xref),
            ..Self::default()
        }
    }
}
