//! Individuals and the structures only they carry

use super::citation::SourceCitation;
use super::common::{Address, CustomTag, NoteLink, RecordBase};
use super::enums::{ChildLinkStatus, FamilyRole, Pedigree, Sex};
use super::event::{IndividualEvent, INDIVIDUAL_ATTRIBUTE_TAGS, LDS_ORDINANCE_TAGS};
use super::place::Variation;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Individual {
    #[serde(flatten)]
    pub base: RecordBase,
    pub names: Vec<PersonalName>,
    pub sex: Sex,
    pub events: Vec<IndividualEvent>,
    pub attributes: Vec<IndividualEvent>,
    pub lds_ordinances: Vec<IndividualEvent>,
    pub child_in: Vec<FamilyLink>,
    pub spouse_in: Vec<FamilyLink>,
    pub associations: Vec<Association>,
    /// `ALIA` pointers to other individual records.
    pub aliases: Vec<String>,
    pub submitters: Vec<String>,
    pub ancestor_interest: Vec<String>,
    pub descendant_interest: Vec<String>,
    pub permanent_record_file_number: Option<String>,
    pub ancestral_file_number: Option<String>,
    pub address: Option<Address>,
}

impl Individual {
    pub fn new(xref: impl Into<String>) -> Self {
        Self {
            base: RecordBase::new(xref),
            ..Self::default()
        }
    }

    pub fn xref(&self) -> &str {
        &self.base.xref
    }

    /// The first name structure's value, as written (`John /Doe/`).
    pub fn name(&self) -> Option<&str> {
        self.names.first().map(|name| name.value.as_str())
    }

    /// Files the event under events, attributes or ordinances by its tag.
    pub fn add_event(&mut self, event: IndividualEvent) {
        let tag = event.event.tag.as_str();
        if INDIVIDUAL_ATTRIBUTE_TAGS.contains(&tag) {
            self.attributes.push(event);
        } else if LDS_ORDINANCE_TAGS.contains(&tag) {
            self.lds_ordinances.push(event);
        } else {
            self.events.push(event);
        }
    }

    pub fn event(&self, tag: &str) -> Option<&IndividualEvent> {
        self.events.iter().find(|event| event.event.tag == tag)
    }

    pub fn attribute(&self, tag: &str) -> Option<&IndividualEvent> {
        self.attributes.iter().find(|event| event.event.tag == tag)
    }

    pub fn child_link(&self, family: &str) -> Option<&FamilyLink> {
        self.child_in.iter().find(|link| link.family == family)
    }

    pub fn spouse_link(&self, family: &str) -> Option<&FamilyLink> {
        self.spouse_in.iter().find(|link| link.family == family)
    }
}

/// A `NAME` structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonalName {
    /// The name as written, surname between slashes.
    pub value: String,
    pub name_type: Option<String>,
    pub prefix: Option<String>,
    pub given: Option<String>,
    pub nickname: Option<String>,
    pub surname_prefix: Option<String>,
    pub surname: Option<String>,
    pub suffix: Option<String>,
    pub phonetic: Vec<Variation>,
    pub romanized: Vec<Variation>,
    pub notes: Vec<NoteLink>,
    pub citations: Vec<SourceCitation>,
    pub custom: Vec<CustomTag>,
}

impl PersonalName {
    /// Reads `Given /Surname/ Suffix`; explicit `GIVN`/`SURN` lines override the split.
    pub fn parse(value: &str) -> Self {
        let mut name = PersonalName {
            value: value.to_string(),
            ..Self::default()
        };
        let mut parts = value.splitn(3, '/');
        let given = parts.next().unwrap_or_default().trim();
        let surname = parts.next().map(str::trim);
        let suffix = parts.next().map(str::trim);

        name.given = Some(given.to_string()).filter(|part| !part.is_empty());
        name.surname = surname
            .filter(|part| !part.is_empty())
            .map(str::to_string);
        name.suffix = suffix.filter(|part| !part.is_empty()).map(str::to_string);
        name
    }
}

/// A link between an individual and a family, from either side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyLink {
    pub family: String,
    pub individual: String,
    pub role: FamilyRole,
    /// `PEDI` as written on the link, before the fix-up pass settles each side.
    pub pedigree: Option<Pedigree>,
    pub father_pedigree: Pedigree,
    pub mother_pedigree: Pedigree,
    pub status: Option<ChildLinkStatus>,
    /// `_PRIMARY` / `_PREF`: the family a vendor marked as preferred.
    pub preferred: bool,
    pub notes: Vec<NoteLink>,
    pub custom: Vec<CustomTag>,
}

impl FamilyLink {
    pub fn new(family: impl Into<String>, individual: impl Into<String>, role: FamilyRole) -> Self {
        Self {
            family: family.into(),
            individual: individual.into(),
            role,
            pedigree: None,
            father_pedigree: Pedigree::Unknown,
            mother_pedigree: Pedigree::Unknown,
            status: None,
            preferred: false,
            notes: Vec::new(),
            custom: Vec::new(),
        }
    }
}

/// `ASSO`: an association with another individual.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Association {
    pub xref: String,
    pub relation: Option<String>,
    /// `TYPE` from GEDCOM 5.5 files, usually `INDI`.
    pub kind: Option<String>,
    pub notes: Vec<NoteLink>,
    pub citations: Vec<SourceCitation>,
    pub custom: Vec<CustomTag>,
}
