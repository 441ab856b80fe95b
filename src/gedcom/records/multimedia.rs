//! Multimedia objects

use super::common::RecordBase;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Multimedia {
    #[serde(flatten)]
    pub base: RecordBase,
    pub files: Vec<MultimediaFile>,
    /// `BLOB` data from GEDCOM 5.5 files, continuation lines joined.
    pub blob: Option<String>,
}

impl Multimedia {
    pub fn new(xref: impl Into<String>) -> Self {
        Self {
            base: RecordBase::new(xref),
            ..Self::default()
        }
    }

    /// The file entry subordinate tags apply to, created when `FORM`/`TITL` come first.
    pub fn current_file(&mut self) -> &mut MultimediaFile {
        if self.files.is_empty() {
            self.files.push(MultimediaFile::default());
        }
        let last = self.files.len() - 1;
        &mut self.files[last]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MultimediaFile {
    pub path: String,
    pub format: Option<String>,
    pub media_type: Option<String>,
    pub title: Option<String>,
}
