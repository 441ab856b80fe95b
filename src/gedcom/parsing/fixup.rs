//! Post-parse fix-up
//!
//!     Runs once, after the last record is closed. Files routinely state a relationship on
//!     one side only, point at records further down, or leave out fields readers expect, so
//!     the database is completed here rather than during the parse:
//!
//!     1. Inline sources and objects are numbered and stored (see [number_inline_records]).
//!     2. Family links are made symmetric. A family naming a spouse or child gives that
//!        individual the matching link, and an individual's link to a family puts them in
//!        that family.
//!     3. Each child link gets a pedigree per parent (see [settle_pedigrees]).
//!     4. Queued pointers are resolved: targets count their incoming references, and
//!        pointers to nothing are reported unless they name a note dropped as blank.
//!     5. Sources and repositories learn who cited them.
//!     6. Untitled sources get a placeholder title, and the header is normalised.

use super::state::ParseScope;
use crate::gedcom::database::Database;
use crate::gedcom::records::relink::Relink;
use crate::gedcom::records::{
    AdoptedBy, Child, FamilyLink, FamilyRole, IndividualEvent, Pedigree, Record, Sex,
};
use log::{debug, info};
use std::collections::{HashMap, HashSet};

pub fn run(scope: &mut ParseScope) {
    let inline = number_inline_records(scope);
    let from_families = link_individuals_to_families(&mut scope.database);
    let from_individuals = link_families_to_individuals(&mut scope.database);
    settle_pedigrees(&mut scope.database);
    let (resolved, missing) = resolve_references(scope);
    attach_citations(scope);
    title_sources(scope);
    settle_header(&mut scope.database);
    info!(
        "event=fixup_done inline_records={} links_added={} references={} missing={}",
        inline,
        from_families + from_individuals,
        resolved,
        missing
    );
}

/// Store the held inline records under generated xrefs and point their links at them.
///
/// Runs once every file record is in, so a generated xref never takes the place of one the
/// file declares. Xrefs the file points at without declaring, and those of notes dropped as
/// blank, are passed over too.
pub fn number_inline_records(scope: &mut ParseScope) -> usize {
    let mut held = std::mem::take(&mut scope.inline_records);
    if held.is_empty() {
        return 0;
    }
    let claimed: HashSet<String> = scope
        .deferred
        .iter()
        .map(|reference| reference.xref.clone())
        .chain(scope.discarded_notes.iter().cloned())
        .collect();

    let mut renames = HashMap::new();
    for record in &mut held {
        let xref = loop {
            let candidate = scope.generate_xref();
            if !claimed.contains(&candidate) {
                break candidate;
            }
        };
        if let Some(base) = record.base_mut() {
            let provisional = std::mem::replace(&mut base.xref, xref.clone());
            renames.insert(provisional, xref);
        }
    }

    let relink = Relink::new(&renames);
    for record in scope.database.records_mut().chain(&mut held) {
        relink.record(record);
    }
    if let Some(header) = scope.database.header.as_mut() {
        relink.header(header);
    }
    for reference in &mut scope.deferred {
        relink.xref(&mut reference.xref);
    }
    for citation in &mut scope.source_citations {
        relink.xref(&mut citation.target);
    }

    let count = held.len();
    for record in held {
        debug!("event=inline_record_stored kind={} xref={}", record.kind(), record.xref());
        scope.insert(record, 0);
    }
    count
}

/// Give individuals the links their families state. Returns the number of links added.
fn link_individuals_to_families(database: &mut Database) -> usize {
    let mut wanted = Vec::new();
    for family in database.families() {
        let xref = family.xref();
        for spouse in [&family.husband, &family.wife].into_iter().flatten() {
            wanted.push((xref.to_string(), spouse.clone(), FamilyRole::Spouse));
        }
        for child in &family.children {
            wanted.push((xref.to_string(), child.xref.clone(), FamilyRole::Child));
        }
    }

    let mut added = 0;
    for (family, individual, role) in wanted {
        let Some(person) = database.individual_mut(&individual) else {
            continue;
        };
        let links = match role {
            FamilyRole::Child => &mut person.child_in,
            FamilyRole::Spouse => &mut person.spouse_in,
        };
        if !links.iter().any(|link| link.family == family) {
            debug!("event=link_added individual={individual} family={family} role={role:?}");
            links.push(FamilyLink::new(family, individual.as_str(), role));
            added += 1;
        }
    }
    added
}

/// Give families the members their individuals claim. Returns the number of links added.
fn link_families_to_individuals(database: &mut Database) -> usize {
    let mut claims = Vec::new();
    for person in database.individuals() {
        for link in person.child_in.iter().chain(&person.spouse_in) {
            claims.push((link.family.clone(), person.xref().to_string(), link.role, person.sex));
        }
    }

    let mut added = 0;
    for (family_xref, individual, role, sex) in claims {
        let Some(family) = database.family_mut(&family_xref) else {
            continue;
        };
        match role {
            FamilyRole::Child => {
                if !family.has_child(&individual) {
                    family.children.push(Child::new(individual.as_str()));
                    added += 1;
                }
            }
            FamilyRole::Spouse => {
                if family.husband.as_deref() == Some(individual.as_str())
                    || family.wife.as_deref() == Some(individual.as_str())
                {
                    continue;
                }
                let open = (family.husband.is_none(), family.wife.is_none());
                let slot = match (sex, open) {
                    (Sex::Male, (true, _)) => &mut family.husband,
                    (Sex::Female, (_, true)) => &mut family.wife,
                    (Sex::Unknown | Sex::Undetermined, (true, _)) => &mut family.husband,
                    (Sex::Unknown | Sex::Undetermined, (_, true)) => &mut family.wife,
                    _ => {
                        debug!("event=spouse_slot_taken individual={individual} family={family_xref}");
                        continue;
                    }
                };
                *slot = Some(individual);
                added += 1;
            }
        }
    }
    added
}

/// Work out the pedigree of each child link, per parent.
///
/// The most specific statement wins:
///
/// 1. `Unknown` when nothing is said.
/// 2. `PEDI` on the individual's `FAMC` link.
/// 3. `ADOP`/`FOST`/`_FREL`/`_MREL` under the family's `CHIL` line.
/// 4. A `BIRT` or `ADOP` event of the individual naming the family through `FAMC`.
///    Birth applies to both parents; adoption to the parents named by the event's
///    `ADOP` line, both when absent. Adoption is applied after birth.
///
/// The result is stored on the individual's link and copied back onto the family's child
/// entry.
pub fn settle_pedigrees(database: &mut Database) {
    let child_relations: HashMap<(String, String), (Option<Pedigree>, Option<Pedigree>)> = database
        .families()
        .flat_map(|family| {
            family.children.iter().map(move |child| {
                (
                    (family.xref().to_string(), child.xref.clone()),
                    (child.father_relation, child.mother_relation),
                )
            })
        })
        .collect();

    let mut settled = Vec::new();
    for record in database.records_mut() {
        let Record::Individual(person) = record else {
            continue;
        };
        let xref = person.base.xref.clone();
        let events = &person.events;
        for link in &mut person.child_in {
            let stated = link.pedigree.unwrap_or_default();
            let (mut father, mut mother) = (stated, stated);

            if let Some((on_father, on_mother)) =
                child_relations.get(&(link.family.clone(), xref.clone()))
            {
                father = on_father.unwrap_or(father);
                mother = on_mother.unwrap_or(mother);
            }

            if events_naming(events, "BIRT", &link.family).next().is_some() {
                father = Pedigree::Birth;
                mother = Pedigree::Birth;
            }
            for adoption in events_naming(events, "ADOP", &link.family) {
                match adoption.adopted_by.unwrap_or_default() {
                    AdoptedBy::Husband => father = Pedigree::Adopted,
                    AdoptedBy::Wife => mother = Pedigree::Adopted,
                    AdoptedBy::Both => {
                        father = Pedigree::Adopted;
                        mother = Pedigree::Adopted;
                    }
                }
            }

            link.father_pedigree = father;
            link.mother_pedigree = mother;
            settled.push((link.family.clone(), xref.clone(), father, mother));
        }
    }

    for (family, child, father, mother) in settled {
        let Some(family) = database.family_mut(&family) else {
            continue;
        };
        if let Some(entry) = family.children.iter_mut().find(|entry| entry.xref == child) {
            entry.father_relation = Some(father);
            entry.mother_relation = Some(mother);
        }
    }
}

fn events_naming<'a>(
    events: &'a [IndividualEvent],
    tag: &'a str,
    family: &'a str,
) -> impl Iterator<Item = &'a IndividualEvent> + 'a {
    events
        .iter()
        .filter(move |event| event.event.tag == tag && event.family.as_deref() == Some(family))
}

/// Check every queued pointer. Returns the number resolved and the number missing.
fn resolve_references(scope: &mut ParseScope) -> (usize, usize) {
    let (mut resolved, mut missing) = (0, 0);
    for reference in std::mem::take(&mut scope.deferred) {
        let Some(target) = scope.database.get_mut(&reference.xref) else {
            if !scope.discarded_notes.contains(&reference.xref) {
                scope.warn(
                    reference.line,
                    "missing-reference",
                    format!(
                        "pointer to {} @{}@ names no record",
                        reference.expected, reference.xref
                    ),
                );
                missing += 1;
            }
            continue;
        };
        resolved += 1;
        let kind = target.kind();
        if kind.counts_references() {
            if let Some(base) = target.base_mut() {
                base.reference_count += 1;
            }
        }
        if kind != reference.expected {
            scope.warn(
                reference.line,
                "invalid-reference",
                format!(
                    "@{}@ is a {} record where a {} was expected",
                    reference.xref, kind, reference.expected
                ),
            );
        }
    }
    (resolved, missing)
}

fn attach_citations(scope: &mut ParseScope) {
    for citation in std::mem::take(&mut scope.source_citations) {
        if let Some(source) = scope.database.source_mut(&citation.target) {
            source.cited_by.push(citation.cited_by);
        }
    }
    for citation in std::mem::take(&mut scope.repository_citations) {
        if let Some(repository) = scope.database.repository_mut(&citation.target) {
            repository.cited_by.push(citation.cited_by);
        }
    }
}

fn title_sources(scope: &mut ParseScope) {
    let placeholder = &scope.options.placeholder_source_title;
    let mut counter = 0;
    for record in scope.database.records_mut() {
        if let Record::Source(source) = record {
            if !source.has_title() {
                counter += 1;
                source.title = Some(format!("{placeholder} {counter}"));
            }
        }
    }
}

fn settle_header(database: &mut Database) {
    let Some(header) = database.header.as_mut() else {
        return;
    };
    if header.content_description.is_none() && !header.notes.is_empty() {
        let mut description = header.notes.remove(0);
        description.level = 1;
        description.base.xref.clear();
        header.content_description = Some(description);
    }
    let source = &mut header.source;
    if source.name.as_deref().map_or(true, |name| name.trim().is_empty()) {
        if let Some(system_id) = &source.system_id {
            source.name = Some(system_id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gedcom::config::RecordOptions;
    use crate::gedcom::lexing::Newline;
    use crate::gedcom::records::{Event, Family, Individual, RecordKind, Source, SourceCitation};

    fn scope() -> ParseScope {
        ParseScope::new(RecordOptions::default(), Newline::Lf)
    }

    fn person(xref: &str, sex: Sex) -> Record {
        let mut person = Individual::new(xref);
        person.sex = sex;
        Record::Individual(person)
    }

    #[test]
    fn test_family_side_creates_individual_links() {
        let mut scope = scope();
        let mut family = Family::new("F1");
        family.husband = Some("I1".into());
        family.children.push(Child::new("I2"));
        scope.insert(Record::Family(family), 1);
        scope.insert(person("I1", Sex::Male), 4);
        scope.insert(person("I2", Sex::Female), 6);

        run(&mut scope);

        let husband = scope.database.individual("I1").expect("I1");
        assert!(husband.spouse_link("F1").is_some());
        let child = scope.database.individual("I2").expect("I2");
        assert!(child.child_link("F1").is_some());
    }

    #[test]
    fn test_individual_side_fills_family() {
        let mut scope = scope();
        scope.insert(Record::Family(Family::new("F1")), 1);
        let mut wife = Individual::new("I1");
        wife.sex = Sex::Female;
        wife.spouse_in
            .push(FamilyLink::new("F1", "I1", FamilyRole::Spouse));
        scope.insert(Record::Individual(wife), 3);
        let mut child = Individual::new("I2");
        child
            .child_in
            .push(FamilyLink::new("F1", "I2", FamilyRole::Child));
        scope.insert(Record::Individual(child), 5);

        run(&mut scope);

        let family = scope.database.family("F1").expect("F1");
        assert_eq!(family.wife.as_deref(), Some("I1"));
        assert_eq!(family.husband, None);
        assert!(family.has_child("I2"));
    }

    #[test]
    fn test_event_outranks_child_subtag() {
        let mut scope = scope();
        let mut family = Family::new("F1");
        let mut entry = Child::new("I2");
        entry.father_relation = Some(Pedigree::Foster);
        family.children.push(entry);
        scope.insert(Record::Family(family), 1);

        let mut child = Individual::new("I2");
        let mut link = FamilyLink::new("F1", "I2", FamilyRole::Child);
        link.pedigree = Some(Pedigree::Sealing);
        child.child_in.push(link);
        child.add_event(IndividualEvent {
            event: Event::new("ADOP", None),
            family: Some("F1".into()),
            adopted_by: Some(AdoptedBy::Wife),
        });
        scope.insert(Record::Individual(child), 4);

        run(&mut scope);

        let link = &scope.database.individual("I2").expect("I2").child_in[0];
        assert_eq!(link.father_pedigree, Pedigree::Foster);
        assert_eq!(link.mother_pedigree, Pedigree::Adopted);
        let entry = scope.database.family("F1").expect("F1").child("I2").cloned();
        assert_eq!(entry.and_then(|c| c.mother_relation), Some(Pedigree::Adopted));
    }

    #[test]
    fn test_reference_counting_and_missing() {
        let mut scope = scope();
        scope.insert(Record::Source(Source::new("S1")), 1);
        scope.insert(person("I1", Sex::Male), 2);
        scope.refer("S1", RecordKind::Source, 5);
        scope.refer("S1", RecordKind::Source, 6);
        scope.refer("I1", RecordKind::Individual, 7);
        scope.refer("N9", RecordKind::Note, 8);
        scope.refer("N3", RecordKind::Note, 9);
        scope.discarded_notes.insert("N3".into());

        run(&mut scope);

        assert_eq!(scope.database.get("S1").map(Record::reference_count), Some(2));
        assert_eq!(scope.database.get("I1").map(Record::reference_count), Some(0));
        let missing: Vec<_> = scope
            .diagnostics
            .iter()
            .filter(|d| d.has_code("missing-reference"))
            .map(|d| d.line)
            .collect();
        assert_eq!(missing, vec![8]);
    }

    #[test]
    fn test_inline_records_avoid_declared_xrefs() {
        let mut scope = scope();
        let mut person = Individual::new("I1");
        let held = scope.hold_inline(Record::Source(Source::new("")));
        scope.refer(&held, RecordKind::Source, 0);
        person.base.citations.push(SourceCitation {
            source: Some(held),
            ..SourceCitation::default()
        });
        scope.insert(Record::Individual(person), 1);
        scope.insert(Record::Family(Family::new("X1")), 4);
        scope.refer("X2", RecordKind::Family, 5);

        run(&mut scope);

        assert!(scope.database.family("X1").is_some());
        let citation = &scope.database.individual("I1").expect("I1").base.citations[0];
        assert_eq!(citation.source.as_deref(), Some("X3"));
        assert_eq!(scope.database.get("X3").map(Record::reference_count), Some(1));
    }

    #[test]
    fn test_untitled_sources_numbered() {
        let mut scope = scope();
        scope.insert(Record::Source(Source::new("S1")), 1);
        let mut titled = Source::new("S2");
        titled.title = Some("Census".into());
        scope.insert(Record::Source(titled), 2);
        scope.insert(Record::Source(Source::new("S3")), 3);

        run(&mut scope);

        let titles: Vec<_> = scope
            .database
            .sources()
            .map(|source| source.title.clone().unwrap_or_default())
            .collect();
        assert_eq!(titles, vec!["Source 1", "Census", "Source 2"]);
    }
}
