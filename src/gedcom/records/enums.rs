//! Enumerated values
//!
//!     Each enumeration parses the GEDCOM spelling case-insensitively and returns `None` for
//!     anything it does not recognise. The assembler then falls back to the `Default` variant
//!     and records an `invalid-value` diagnostic.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unknown,
    Undetermined,
}

impl Sex {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Some(Sex::Male),
            "F" | "FEMALE" => Some(Sex::Female),
            "U" | "UNKNOWN" | "" => Some(Sex::Unknown),
            "X" | "N" => Some(Sex::Undetermined),
            _ => None,
        }
    }
}

/// `RESN` restriction notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Restriction {
    #[default]
    Confidential,
    Locked,
    Privacy,
}

impl Restriction {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "confidential" => Some(Restriction::Confidential),
            "locked" => Some(Restriction::Locked),
            "privacy" => Some(Restriction::Privacy),
            _ => None,
        }
    }
}

/// How a child relates to one parent of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Pedigree {
    Birth,
    Adopted,
    Foster,
    Sealing,
    #[default]
    Unknown,
}

impl Pedigree {
    /// Reads `PEDI` values and the relation words vendors write under `_FREL`/`_MREL`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "birth" | "natural" | "biological" => Some(Pedigree::Birth),
            "adopted" | "adoption" => Some(Pedigree::Adopted),
            "foster" => Some(Pedigree::Foster),
            "sealing" | "sealed" => Some(Pedigree::Sealing),
            "unknown" => Some(Pedigree::Unknown),
            _ => None,
        }
    }
}

/// `QUAY` assessment of a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Certainty {
    #[default]
    Unreliable,
    Questionable,
    Secondary,
    Direct,
}

impl Certainty {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "0" => Some(Certainty::Unreliable),
            "1" => Some(Certainty::Questionable),
            "2" => Some(Certainty::Secondary),
            "3" => Some(Certainty::Direct),
            _ => None,
        }
    }
}

/// `STAT` of a child-to-family link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChildLinkStatus {
    Challenged,
    Disproven,
    Proven,
}

impl ChildLinkStatus {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "challenged" => Some(ChildLinkStatus::Challenged),
            "disproven" => Some(ChildLinkStatus::Disproven),
            "proven" => Some(ChildLinkStatus::Proven),
            _ => None,
        }
    }
}

/// Which spouse adopted, from `ADOP` under an adoption event's `FAMC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AdoptedBy {
    Husband,
    Wife,
    #[default]
    Both,
}

impl AdoptedBy {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_uppercase().as_str() {
            "HUSB" => Some(AdoptedBy::Husband),
            "WIFE" => Some(AdoptedBy::Wife),
            "BOTH" => Some(AdoptedBy::Both),
            _ => None,
        }
    }
}

/// The side of a family link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FamilyRole {
    Child,
    Spouse,
}

/// `NCHI` as a count. Anything that is not a plain number reads as 0.
pub fn parse_child_count(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}
