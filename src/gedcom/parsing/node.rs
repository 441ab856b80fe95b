//! Open record nodes
//!
//!     A [Node] is a record under construction on the record stack. Top-level kinds become
//!     [Record]s when they close at level 0; nested kinds are handed to the node below
//!     them through [Node::attach], which knows where each kind of child goes in each kind
//!     of parent.
//!
//!     Two kinds only exist while parsing: `Unparented` stands in for a record that could
//!     not be opened (its children are reported), `Ignored` swallows a subtree that has
//!     already been reported once.

use super::state::{CollectedCitation, ParseScope};
use crate::gedcom::records::{
    Address, Association, Child, CitedBy, CustomTag, DateValue, FamilyEvent, FamilyLink,
    FamilyRole, Header, Individual, IndividualEvent, Multimedia, Note, NoteLink, PersonalName,
    Place, Record, RecordKind, RepositoryCitation, Source, SourceCitation, SpouseSealing,
    Submission, Submitter,
};
use crate::gedcom::records::{Family, Repository};
use log::debug;

#[derive(Debug)]
pub enum Node {
    Header(Box<Header>),
    Individual(Box<Individual>),
    Family(Box<Family>),
    Source(Box<Source>),
    Repository(Box<Repository>),
    /// A note record at level 0, an inline note anywhere else.
    Note(Box<Note>),
    /// A multimedia record at level 0, an inline `OBJE` anywhere else.
    Multimedia(Box<Multimedia>),
    Submitter(Box<Submitter>),
    Submission(Box<Submission>),
    Trailer,
    Unparented,
    Ignored,
    IndividualEvent(Box<IndividualEvent>),
    FamilyEvent(Box<FamilyEvent>),
    Sealing(Box<SpouseSealing>),
    Name(Box<PersonalName>),
    Place(Box<Place>),
    Date(Box<DateValue>, DateSlot),
    Citation(Box<SourceCitation>),
    RepositoryCitation(Box<RepositoryCitation>),
    FamilyLink(Box<FamilyLink>),
    Association(Box<Association>),
    Address(Box<Address>),
    Child(Box<Child>),
    Custom(Box<CustomTag>),
}

/// Fields filled from multi-line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// The text of a note.
    Note,
    Title,
    Author,
    Publication,
    /// `TEXT` of a source or an inline source citation.
    Text,
    /// `TEXT` under a citation's `DATA`.
    DataText,
    /// The description of an inline source.
    Description,
    Address,
    Copyright,
    Blob,
    /// The line value of an event, attribute or custom tag.
    Value,
}

/// Where a closed `DATE` goes in its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSlot {
    Event,
    /// `DATE` under `CHAN`.
    Change,
    /// `DATE` directly under the header.
    Transmission,
    /// `DATE` under a citation's `DATA`.
    CitationData,
    /// `DATE` under a source's `DATA.EVEN`.
    RecordedPeriod,
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

impl Node {
    pub fn name(&self) -> &'static str {
        match self {
            Node::Header(_) => "Header",
            Node::Individual(_) => "Individual",
            Node::Family(_) => "Family",
            Node::Source(_) => "Source",
            Node::Repository(_) => "Repository",
            Node::Note(_) => "Note",
            Node::Multimedia(_) => "Multimedia",
            Node::Submitter(_) => "Submitter",
            Node::Submission(_) => "Submission",
            Node::Trailer => "Trailer",
            Node::Unparented => "Unparented",
            Node::Ignored => "Ignored",
            Node::IndividualEvent(_) => "IndividualEvent",
            Node::FamilyEvent(_) => "FamilyEvent",
            Node::Sealing(_) => "SpouseSealing",
            Node::Name(_) => "Name",
            Node::Place(_) => "Place",
            Node::Date(..) => "Date",
            Node::Citation(_) => "SourceCitation",
            Node::RepositoryCitation(_) => "RepositoryCitation",
            Node::FamilyLink(_) => "FamilyLink",
            Node::Association(_) => "Association",
            Node::Address(_) => "Address",
            Node::Child(_) => "Child",
            Node::Custom(_) => "Custom",
        }
    }

    /// Xref of a top-level node.
    pub fn xref(&self) -> Option<&str> {
        let xref = match self {
            Node::Individual(record) => &record.base.xref,
            Node::Family(record) => &record.base.xref,
            Node::Source(record) => &record.base.xref,
            Node::Repository(record) => &record.base.xref,
            Node::Note(record) => &record.base.xref,
            Node::Multimedia(record) => &record.base.xref,
            Node::Submitter(record) => &record.base.xref,
            Node::Submission(record) => &record.base.xref,
            _ => return None,
        };
        Some(xref.as_str()).filter(|xref| !xref.is_empty())
    }

    /// Turn a closed level 0 node into a database record.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Node::Individual(record) => Some(Record::Individual(*record)),
            Node::Family(record) => Some(Record::Family(*record)),
            Node::Source(record) => Some(Record::Source(*record)),
            Node::Repository(record) => Some(Record::Repository(*record)),
            Node::Note(record) => Some(Record::Note(*record)),
            Node::Multimedia(record) => Some(Record::Multimedia(*record)),
            Node::Submitter(record) => Some(Record::Submitter(*record)),
            Node::Submission(record) => Some(Record::Submission(*record)),
            Node::Trailer => Some(Record::Trailer),
            _ => None,
        }
    }

    pub fn set_text(&mut self, field: TextField, text: String) {
        match (self, field) {
            (Node::Note(note), TextField::Note) => note.text = text,
            (Node::Source(source), TextField::Title) => source.title = non_empty(text),
            (Node::Source(source), TextField::Author) => source.originator = non_empty(text),
            (Node::Source(source), TextField::Publication) => {
                source.publication = non_empty(text)
            }
            (Node::Source(source), TextField::Text) => source.text = non_empty(text),
            (Node::Citation(citation), TextField::Description) => {
                citation.description = non_empty(text)
            }
            (Node::Citation(citation), TextField::Text) => citation.text = non_empty(text),
            (Node::Citation(citation), TextField::DataText) => {
                citation.data_text = non_empty(text)
            }
            (Node::Address(address), TextField::Address) => address.lines = text,
            (Node::Header(header), TextField::Copyright) => header.copyright = non_empty(text),
            (Node::Multimedia(media), TextField::Blob) => media.blob = non_empty(text),
            (Node::IndividualEvent(event), TextField::Value) => {
                event.event.value = non_empty(text)
            }
            (Node::FamilyEvent(event), TextField::Value) => event.event.value = non_empty(text),
            (Node::Custom(custom), TextField::Value) => custom.value = non_empty(text),
            (node, field) => debug!(
                "event=text_dropped node={} field={:?}",
                node.name(),
                field
            ),
        }
    }

    /// Rename an event opened for a vendor tag (`_MILT` becomes `EVEN` "Military Service").
    pub fn set_event_type(&mut self, event_type: &str) {
        let event = match self {
            Node::IndividualEvent(event) => &mut event.event,
            Node::FamilyEvent(event) => &mut event.event,
            _ => return,
        };
        if event.event_type.is_none() {
            event.event_type = Some(event_type.to_string());
        }
    }

    pub fn notes_mut(&mut self) -> Option<&mut Vec<NoteLink>> {
        match self {
            Node::Individual(record) => Some(&mut record.base.notes),
            Node::Family(record) => Some(&mut record.base.notes),
            Node::Source(record) => Some(&mut record.base.notes),
            Node::Repository(record) => Some(&mut record.base.notes),
            Node::Note(record) => Some(&mut record.base.notes),
            Node::Multimedia(record) => Some(&mut record.base.notes),
            Node::Submitter(record) => Some(&mut record.base.notes),
            Node::Submission(record) => Some(&mut record.base.notes),
            Node::IndividualEvent(event) => Some(&mut event.event.notes),
            Node::FamilyEvent(event) => Some(&mut event.event.notes),
            Node::Sealing(sealing) => Some(&mut sealing.notes),
            Node::Name(name) => Some(&mut name.notes),
            Node::Place(place) => Some(&mut place.notes),
            Node::Citation(citation) => Some(&mut citation.notes),
            Node::RepositoryCitation(citation) => Some(&mut citation.notes),
            Node::FamilyLink(link) => Some(&mut link.notes),
            Node::Association(association) => Some(&mut association.notes),
            Node::Child(child) => Some(&mut child.notes),
            _ => None,
        }
    }

    pub fn citations_mut(&mut self) -> Option<&mut Vec<SourceCitation>> {
        match self {
            Node::Individual(record) => Some(&mut record.base.citations),
            Node::Family(record) => Some(&mut record.base.citations),
            Node::Source(record) => Some(&mut record.base.citations),
            Node::Repository(record) => Some(&mut record.base.citations),
            Node::Note(record) => Some(&mut record.base.citations),
            Node::Multimedia(record) => Some(&mut record.base.citations),
            Node::Submitter(record) => Some(&mut record.base.citations),
            Node::Submission(record) => Some(&mut record.base.citations),
            Node::IndividualEvent(event) => Some(&mut event.event.citations),
            Node::FamilyEvent(event) => Some(&mut event.event.citations),
            Node::Sealing(sealing) => Some(&mut sealing.citations),
            Node::Name(name) => Some(&mut name.citations),
            Node::Place(place) => Some(&mut place.citations),
            Node::Association(association) => Some(&mut association.citations),
            _ => None,
        }
    }

    pub fn multimedia_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Node::Individual(record) => Some(&mut record.base.multimedia),
            Node::Family(record) => Some(&mut record.base.multimedia),
            Node::Source(record) => Some(&mut record.base.multimedia),
            Node::Repository(record) => Some(&mut record.base.multimedia),
            Node::Note(record) => Some(&mut record.base.multimedia),
            Node::Multimedia(record) => Some(&mut record.base.multimedia),
            Node::Submitter(record) => Some(&mut record.base.multimedia),
            Node::Submission(record) => Some(&mut record.base.multimedia),
            Node::IndividualEvent(event) => Some(&mut event.event.multimedia),
            Node::FamilyEvent(event) => Some(&mut event.event.multimedia),
            Node::Citation(citation) => Some(&mut citation.multimedia),
            _ => None,
        }
    }

    pub fn custom_mut(&mut self) -> Option<&mut Vec<CustomTag>> {
        match self {
            Node::Header(header) => Some(&mut header.custom),
            Node::Individual(record) => Some(&mut record.base.custom),
            Node::Family(record) => Some(&mut record.base.custom),
            Node::Source(record) => Some(&mut record.base.custom),
            Node::Repository(record) => Some(&mut record.base.custom),
            Node::Note(record) => Some(&mut record.base.custom),
            Node::Multimedia(record) => Some(&mut record.base.custom),
            Node::Submitter(record) => Some(&mut record.base.custom),
            Node::Submission(record) => Some(&mut record.base.custom),
            Node::IndividualEvent(event) => Some(&mut event.event.custom),
            Node::FamilyEvent(event) => Some(&mut event.event.custom),
            Node::Sealing(sealing) => Some(&mut sealing.custom),
            Node::Name(name) => Some(&mut name.custom),
            Node::Place(place) => Some(&mut place.custom),
            Node::Citation(citation) => Some(&mut citation.custom),
            Node::RepositoryCitation(citation) => Some(&mut citation.custom),
            Node::FamilyLink(link) => Some(&mut link.custom),
            Node::Association(association) => Some(&mut association.custom),
            Node::Address(address) => Some(&mut address.custom),
            Node::Child(child) => Some(&mut child.custom),
            Node::Custom(custom) => Some(&mut custom.children),
            _ => None,
        }
    }

    /// The address slot of a node that has one.
    pub fn address_mut(&mut self) -> Option<&mut Option<Address>> {
        match self {
            Node::Header(header) => Some(&mut header.source.corporation_address),
            Node::Individual(record) => Some(&mut record.address),
            Node::Repository(record) => Some(&mut record.address),
            Node::Submitter(record) => Some(&mut record.address),
            Node::IndividualEvent(event) => Some(&mut event.event.address),
            Node::FamilyEvent(event) => Some(&mut event.event.address),
            _ => None,
        }
    }

    fn set_date(&mut self, date: DateValue, slot: DateSlot) -> bool {
        match (self, slot) {
            (Node::IndividualEvent(event), DateSlot::Event) => event.event.date = Some(date),
            (Node::FamilyEvent(event), DateSlot::Event) => event.event.date = Some(date),
            (Node::Sealing(sealing), DateSlot::Event) => sealing.date = Some(date),
            (Node::Header(header), DateSlot::Transmission) => header.date = Some(date),
            (Node::Citation(citation), DateSlot::CitationData) => {
                citation.data_date = Some(date)
            }
            (Node::Source(source), DateSlot::RecordedPeriod) => {
                match source.recorded_events.last_mut() {
                    Some(events) => events.period = Some(date),
                    None => return false,
                }
            }
            (node, DateSlot::Change) => match node.base_change_date() {
                Some(change) => *change = Some(date),
                None => return false,
            },
            _ => return false,
        }
        true
    }

    fn base_change_date(&mut self) -> Option<&mut Option<DateValue>> {
        match self {
            Node::Individual(record) => Some(&mut record.base.change_date),
            Node::Family(record) => Some(&mut record.base.change_date),
            Node::Source(record) => Some(&mut record.base.change_date),
            Node::Repository(record) => Some(&mut record.base.change_date),
            Node::Note(record) => Some(&mut record.base.change_date),
            Node::Multimedia(record) => Some(&mut record.base.change_date),
            Node::Submitter(record) => Some(&mut record.base.change_date),
            Node::Submission(record) => Some(&mut record.base.change_date),
            _ => None,
        }
    }

    /// Hand a closed nested node to this node, its parent on the stack.
    ///
    /// `owner` is the xref of the top-level record being built, used for citation
    /// back-lists. Inline sources and inline multimedia objects become records held on the
    /// scope; a child the parent has no slot for is dropped without leaving a record behind.
    pub fn attach(&mut self, child: Node, scope: &mut ParseScope, owner: &str) {
        let child_name = child.name();
        let attached = match child {
            Node::Citation(citation) => match self.citations_mut() {
                Some(citations) => {
                    citations.push(settle_citation(*citation, scope, owner));
                    true
                }
                None => false,
            },
            Node::Note(note) => {
                if note.is_blank() {
                    debug!("event=blank_inline_note_dropped parent={}", self.name());
                    return;
                }
                match &mut *self {
                    Node::Header(header) => {
                        header.notes.push(*note);
                        true
                    }
                    node => node
                        .notes_mut()
                        .map(|notes| notes.push(NoteLink::Inline(*note)))
                        .is_some(),
                }
            }
            Node::Multimedia(media) => match self.multimedia_mut() {
                Some(links) => {
                    let xref = scope.hold_inline(Record::Multimedia(*media));
                    scope.refer(&xref, RecordKind::Multimedia, 0);
                    links.push(xref);
                    true
                }
                None => false,
            },
            Node::Custom(custom) => self
                .custom_mut()
                .map(|list| list.push(*custom))
                .is_some(),
            Node::Address(address) => match self.address_mut() {
                Some(Some(existing)) => {
                    existing.absorb(*address);
                    true
                }
                Some(slot) => {
                    *slot = Some(*address);
                    true
                }
                None => false,
            },
            Node::Date(date, slot) => self.set_date(*date, slot),
            Node::Place(place) => match self {
                Node::IndividualEvent(event) => {
                    event.event.place = Some(*place);
                    true
                }
                Node::FamilyEvent(event) => {
                    event.event.place = Some(*place);
                    true
                }
                Node::Sealing(sealing) => {
                    sealing.place = Some(*place);
                    true
                }
                _ => false,
            },
            Node::IndividualEvent(event) => match self {
                Node::Individual(person) => {
                    person.add_event(*event);
                    true
                }
                _ => false,
            },
            Node::Name(name) => match self {
                Node::Individual(person) => {
                    person.names.push(*name);
                    true
                }
                _ => false,
            },
            Node::FamilyLink(link) => match self {
                Node::Individual(person) => {
                    match link.role {
                        FamilyRole::Child => person.child_in.push(*link),
                        FamilyRole::Spouse => person.spouse_in.push(*link),
                    }
                    true
                }
                _ => false,
            },
            Node::Association(association) => match self {
                Node::Individual(person) => {
                    person.associations.push(*association);
                    true
                }
                _ => false,
            },
            Node::FamilyEvent(event) => match self {
                Node::Family(family) => {
                    family.events.push(*event);
                    true
                }
                _ => false,
            },
            Node::Sealing(sealing) => match self {
                Node::Family(family) => {
                    family.sealings.push(*sealing);
                    true
                }
                _ => false,
            },
            Node::Child(child) => match self {
                Node::Family(family) => {
                    family.children.push(*child);
                    true
                }
                _ => false,
            },
            Node::RepositoryCitation(citation) => match self {
                Node::Source(source) => {
                    if let Some(repository) = &citation.repository {
                        scope.repository_citations.push(CollectedCitation {
                            target: repository.clone(),
                            cited_by: CitedBy {
                                xref: owner.to_string(),
                                detail: citation
                                    .call_numbers
                                    .first()
                                    .map(|call| call.number.clone()),
                            },
                        });
                    }
                    source.repositories.push(*citation);
                    true
                }
                _ => false,
            },
            Node::Unparented | Node::Ignored | Node::Trailer => true,
            _ => false,
        };
        if !attached {
            debug!(
                "event=child_dropped parent={} child={}",
                self.name(),
                child_name
            );
        }
    }
}

/// Give an inline source a record of its own and queue the citation for the back-list.
///
/// The record is held on the scope under a provisional xref until the fix-up pass.
fn settle_citation(
    mut citation: SourceCitation,
    scope: &mut ParseScope,
    owner: &str,
) -> SourceCitation {
    if citation.source.is_none() && (citation.description.is_some() || citation.text.is_some()) {
        let mut source = Source::new("");
        source.title = citation.description.clone();
        source.text = citation.text.clone();
        let xref = scope.hold_inline(Record::Source(source));
        scope.refer(&xref, RecordKind::Source, 0);
        citation.source = Some(xref);
    }
    if let Some(source) = &citation.source {
        scope.source_citations.push(CollectedCitation {
            target: source.clone(),
            cited_by: CitedBy {
                xref: owner.to_string(),
                detail: citation.page.clone(),
            },
        });
    }
    citation
}
