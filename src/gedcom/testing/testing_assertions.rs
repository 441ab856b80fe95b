//! Fluent assertion API for parsed databases

use crate::gedcom::database::Database;
use crate::gedcom::records::{Family, Individual, Pedigree, RecordKind, Sex};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a database
pub fn assert_db(db: &Database) -> DatabaseAssertion<'_> {
    DatabaseAssertion { db }
}

// ============================================================================
// Database Assertions
// ============================================================================

pub struct DatabaseAssertion<'a> {
    db: &'a Database,
}

impl<'a> DatabaseAssertion<'a> {
    /// Assert the number of keyed records
    pub fn record_count(self, expected: usize) -> Self {
        let actual = self.db.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} records, found {}: [{}]",
            expected,
            actual,
            summarize(self.db)
        );
        self
    }

    pub fn contains(self, xref: &str, kind: RecordKind) -> Self {
        assert_eq!(
            self.db.kind_of(xref),
            Some(kind),
            "Expected @{}@ to be a {} record; records: [{}]",
            xref,
            kind,
            summarize(self.db)
        );
        self
    }

    pub fn lacks(self, xref: &str) -> Self {
        assert!(
            !self.db.contains(xref),
            "Expected no record @{}@, found a {:?}",
            xref,
            self.db.kind_of(xref)
        );
        self
    }

    pub fn has_trailer(self) -> Self {
        assert!(self.db.has_trailer(), "Expected a trailer record");
        self
    }

    /// Assert on an individual by xref
    pub fn individual<F>(self, xref: &str, assertion: F) -> Self
    where
        F: FnOnce(IndividualAssertion<'a>) -> IndividualAssertion<'a>,
    {
        let person = self.db.individual(xref).unwrap_or_else(|| {
            panic!(
                "Expected individual @{}@; records: [{}]",
                xref,
                summarize(self.db)
            )
        });
        assertion(IndividualAssertion {
            person,
            context: format!("@{}@", xref),
        });
        self
    }

    /// Assert on a family by xref
    pub fn family<F>(self, xref: &str, assertion: F) -> Self
    where
        F: FnOnce(FamilyAssertion<'a>) -> FamilyAssertion<'a>,
    {
        let family = self.db.family(xref).unwrap_or_else(|| {
            panic!(
                "Expected family @{}@; records: [{}]",
                xref,
                summarize(self.db)
            )
        });
        assertion(FamilyAssertion {
            family,
            context: format!("@{}@", xref),
        });
        self
    }
}

// ============================================================================
// Individual Assertions
// ============================================================================

pub struct IndividualAssertion<'a> {
    person: &'a Individual,
    context: String,
}

impl<'a> IndividualAssertion<'a> {
    /// Assert the first name's value
    pub fn name(self, expected: &str) -> Self {
        let actual = self.person.names.first().map(|name| name.value.as_str());
        assert_eq!(actual, Some(expected), "{}: name mismatch", self.context);
        self
    }

    pub fn surname(self, expected: &str) -> Self {
        let actual = self
            .person
            .names
            .first()
            .and_then(|name| name.surname.as_deref());
        assert_eq!(actual, Some(expected), "{}: surname mismatch", self.context);
        self
    }

    pub fn sex(self, expected: Sex) -> Self {
        assert_eq!(self.person.sex, expected, "{}: sex mismatch", self.context);
        self
    }

    pub fn child_in(self, family: &str) -> Self {
        assert!(
            self.person.child_link(family).is_some(),
            "{}: expected a child link to @{}@, links: {:?}",
            self.context,
            family,
            self.person
                .child_in
                .iter()
                .map(|link| &link.family)
                .collect::<Vec<_>>()
        );
        self
    }

    pub fn spouse_in(self, family: &str) -> Self {
        assert!(
            self.person.spouse_link(family).is_some(),
            "{}: expected a spouse link to @{}@, links: {:?}",
            self.context,
            family,
            self.person
                .spouse_in
                .iter()
                .map(|link| &link.family)
                .collect::<Vec<_>>()
        );
        self
    }

    /// Assert the settled pedigree of a child link, father side then mother side
    pub fn pedigree(self, family: &str, father: Pedigree, mother: Pedigree) -> Self {
        let link = self.person.child_link(family).unwrap_or_else(|| {
            panic!("{}: no child link to @{}@", self.context, family)
        });
        assert_eq!(
            (link.father_pedigree, link.mother_pedigree),
            (father, mother),
            "{}: pedigree in @{}@ mismatch",
            self.context,
            family
        );
        self
    }

    pub fn event_count(self, expected: usize) -> Self {
        assert_eq!(
            self.person.events.len(),
            expected,
            "{}: expected {} events, found tags {:?}",
            self.context,
            expected,
            self.person
                .events
                .iter()
                .map(|event| &event.event.tag)
                .collect::<Vec<_>>()
        );
        self
    }

    pub fn has_event(self, tag: &str) -> Self {
        assert!(
            self.person.event(tag).is_some(),
            "{}: expected a {} event",
            self.context,
            tag
        );
        self
    }
}

// ============================================================================
// Family Assertions
// ============================================================================

pub struct FamilyAssertion<'a> {
    family: &'a Family,
    context: String,
}

impl<'a> FamilyAssertion<'a> {
    pub fn husband(self, expected: &str) -> Self {
        assert_eq!(
            self.family.husband.as_deref(),
            Some(expected),
            "{}: husband mismatch",
            self.context
        );
        self
    }

    pub fn wife(self, expected: &str) -> Self {
        assert_eq!(
            self.family.wife.as_deref(),
            Some(expected),
            "{}: wife mismatch",
            self.context
        );
        self
    }

    /// Assert the children in order
    pub fn children(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .family
            .children
            .iter()
            .map(|child| child.xref.as_str())
            .collect();
        assert_eq!(actual, expected, "{}: children mismatch", self.context);
        self
    }

    pub fn child_count(self, expected: u32) -> Self {
        assert_eq!(
            self.family.child_count,
            Some(expected),
            "{}: NCHI mismatch",
            self.context
        );
        self
    }
}

fn summarize(db: &Database) -> String {
    db.records()
        .map(|record| format!("{} @{}@", record.kind(), record.xref()))
        .collect::<Vec<_>>()
        .join(", ")
}
