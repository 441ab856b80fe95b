//! Note records and inline notes

use super::common::RecordBase;
use serde::Serialize;

/// A `NOTE`. Top-level notes carry an xref in their base; inline notes leave it empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Note {
    #[serde(flatten)]
    pub base: RecordBase,
    pub level: u8,
    pub text: String,
}

impl Note {
    pub fn new(xref: impl Into<String>, level: u8) -> Self {
        Self {
            base: RecordBase::new(xref),
            level,
            text: String::new(),
        }
    }

    /// Notes with nothing but whitespace are dropped by the assembler.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
