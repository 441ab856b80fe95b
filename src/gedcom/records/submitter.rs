//! Submitters and submissions

use super::common::{Address, RecordBase};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Submitter {
    #[serde(flatten)]
    pub base: RecordBase,
    pub name: Option<String>,
    pub address: Option<Address>,
    pub languages: Vec<String>,
    pub registered_file_number: Option<String>,
}

impl Submitter {
    pub fn new(xref: impl Into<String>) -> Self {
        Self {
            base: RecordBase::new(xref),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Submission {
    #[serde(flatten)]
    pub base: RecordBase,
    pub submitter: Option<String>,
    pub family_file: Option<String>,
    pub temple_code: Option<String>,
    pub ancestor_generations: Option<String>,
    pub descendant_generations: Option<String>,
    pub ordinance_process_flag: Option<bool>,
}

impl Submission {
    pub fn new(xref: impl Into<String>) -> Self {
        Self {
            base: RecordBase::new(xref),
            ..Self::default()
        }
    }
}
