//! Families

use super::common::{CustomTag, NoteLink, RecordBase};
use super::enums::Pedigree;
use super::event::{FamilyEvent, SpouseSealing};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Family {
    #[serde(flatten)]
    pub base: RecordBase,
    pub husband: Option<String>,
    pub wife: Option<String>,
    pub children: Vec<Child>,
    /// `NCHI`. Unreadable counts are stored as 0.
    pub child_count: Option<u32>,
    pub events: Vec<FamilyEvent>,
    pub sealings: Vec<SpouseSealing>,
    pub submitters: Vec<String>,
}

impl Family {
    pub fn new(xref: impl Into<String>) -> Self {
        Self {
            base: RecordBase::new(xref),
            ..Self::default()
        }
    }

    pub fn xref(&self) -> &str {
        &self.base.xref
    }

    pub fn child(&self, xref: &str) -> Option<&Child> {
        self.children.iter().find(|child| child.xref == xref)
    }

    pub fn has_child(&self, xref: &str) -> bool {
        self.child(xref).is_some()
    }

    pub fn event(&self, tag: &str) -> Option<&FamilyEvent> {
        self.events.iter().find(|event| event.event.tag == tag)
    }
}

/// A `CHIL` line, with the relation qualifiers vendors put under it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Child {
    pub xref: String,
    /// `_FREL`, or `ADOP`/`FOST` naming the husband or both.
    pub father_relation: Option<Pedigree>,
    /// `_MREL`, or `ADOP`/`FOST` naming the wife or both.
    pub mother_relation: Option<Pedigree>,
    pub notes: Vec<NoteLink>,
    pub custom: Vec<CustomTag>,
}

impl Child {
    pub fn new(xref: impl Into<String>) -> Self {
        Self {
            xref: xref.into(),
            ..Self::default()
        }
    }
}
