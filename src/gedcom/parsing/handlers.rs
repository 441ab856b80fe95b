//! Tag handlers
//!
//!     One handler per kind of open record. A handler sees a line together with its depth
//!     below the record (`level - record level`: 1 for direct children, 2 for
//!     grandchildren...) and the tag of the line's parent, and answers with a [Step]:
//!
//!     - `Done`: a field was set, nothing to open;
//!     - `Open`: a nested structure starts and goes on the record stack;
//!     - `OpenText`: same, and the line value starts a multi-line text of the new node;
//!     - `Text`: the line value starts a multi-line text of the current record;
//!     - `Unknown`: the handler does not know the tag. The assembler maps it through the
//!       vendor tag table or keeps it as custom data.
//!
//!     Pointers read by a handler are queued through [Context::pointer] and checked after the
//!     parse.

pub mod events;
pub mod family;
pub mod header;
pub mod individual;
pub mod media;
pub mod source;
pub mod structures;
pub mod submitter;

use super::node::{DateSlot, Node, TextField};
use super::state::ParseScope;
use crate::gedcom::interning::Key;
use crate::gedcom::records::{
    Address, CustomTag, DateValue, Family, Individual, Multimedia, Note, NoteLink, RecordBase,
    RecordKind, Repository, Restriction, Source, SourceCitation, Submission, Submitter,
    UserReference,
};
use crate::gedcom::token::{LineToken, LineValue};

/// What a handler made of a line.
#[derive(Debug)]
pub enum Step {
    Done,
    Open(Node),
    OpenText(Node, TextField, String),
    Text(TextField, String),
    Unknown,
}

/// What a handler may look at besides its own record.
pub struct Context<'a> {
    pub scope: &'a mut ParseScope,
    /// Tag of the line's parent.
    pub parent: Option<Key>,
}

impl Context<'_> {
    pub fn parent_is(&self, tag: &str) -> bool {
        self.parent.as_deref() == Some(tag)
    }

    pub fn warn(&mut self, token: &LineToken, code: &str, message: impl Into<String>) {
        self.scope.warn(token.line, code, message);
    }

    /// The pointer value of `token`, queued for resolution as a `kind` record.
    ///
    /// A line that should carry a pointer but does not is reported and yields `None`.
    pub fn pointer(&mut self, token: &LineToken, kind: RecordKind) -> Option<String> {
        match &token.value {
            LineValue::Pointer(xref) => {
                self.scope.refer(xref, kind, token.line);
                Some(xref.to_string())
            }
            _ => {
                self.warn(
                    token,
                    "invalid-value",
                    format!("{} expects a pointer to a {} record", token.tag(), kind),
                );
                None
            }
        }
    }

    /// Parse an enumerated value, falling back to the default with a diagnostic.
    pub fn enumerated<T: Default>(
        &mut self,
        token: &LineToken,
        parse: impl Fn(&str) -> Option<T>,
    ) -> T {
        let text = token.value.text();
        parse(text).unwrap_or_else(|| {
            self.warn(
                token,
                "invalid-value",
                format!("unrecognised {} value {:?}, using the default", token.tag(), text),
            );
            T::default()
        })
    }
}

/// The line value trimmed, `None` when blank.
pub fn scalar(token: &LineToken) -> Option<String> {
    Some(token.value.text().trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// The line value exactly as read, the start of a multi-line text.
pub fn raw(token: &LineToken) -> String {
    token.value.text().to_string()
}

/// Route a line to the handler of the record it belongs to.
pub fn dispatch(node: &mut Node, token: &LineToken, depth: u8, cx: &mut Context<'_>) -> Step {
    match node {
        Node::Header(header) => header::handle(header, token, depth, cx),
        Node::Individual(person) => individual::handle(person, token, depth, cx),
        Node::Family(family) => family::handle(family, token, depth, cx),
        Node::Source(source) => source::handle_source(source, token, depth, cx),
        Node::Repository(repository) => source::handle_repository(repository, token, depth, cx),
        Node::Note(note) => base_tag(&mut note.base, token, depth, cx),
        Node::Multimedia(media) => media::handle(media, token, depth, cx),
        Node::Submitter(submitter) => submitter::handle_submitter(submitter, token, depth, cx),
        Node::Submission(submission) => {
            submitter::handle_submission(submission, token, depth, cx)
        }
        Node::IndividualEvent(event) => events::handle_individual_event(event, token, depth, cx),
        Node::FamilyEvent(event) => events::handle_family_event(event, token, depth, cx),
        Node::Sealing(sealing) => events::handle_sealing(sealing, token, depth, cx),
        Node::Name(name) => structures::handle_name(name, token, depth, cx),
        Node::Place(place) => structures::handle_place(place, token, depth, cx),
        Node::Date(date, _) => structures::handle_date(date, token, depth),
        Node::Address(address) => structures::handle_address(address, token, depth),
        Node::FamilyLink(link) => structures::handle_family_link(link, token, depth, cx),
        Node::Association(association) => {
            structures::handle_association(association, token, depth, cx)
        }
        Node::Child(child) => structures::handle_child(child, token, depth, cx),
        Node::Citation(citation) => source::handle_citation(citation, token, depth, cx),
        Node::RepositoryCitation(citation) => {
            source::handle_repository_citation(citation, token, depth, cx)
        }
        Node::Custom(_) => custom(token),
        Node::Unparented => {
            cx.warn(
                token,
                "unparented-tag",
                format!("{} belongs to a record that could not be read", token.tag()),
            );
            Step::Open(Node::Unparented)
        }
        Node::Trailer | Node::Ignored => Step::Open(Node::Ignored),
    }
}

/// Open a level 0 record.
pub fn open_record(token: &LineToken, scope: &mut ParseScope) -> Step {
    let kind = match token.tag() {
        "HEAD" => return Step::Open(Node::Header(Box::default())),
        "TRLR" => return Step::Open(Node::Trailer),
        "INDI" => RecordKind::Individual,
        "FAM" => RecordKind::Family,
        "SOUR" => RecordKind::Source,
        "REPO" => RecordKind::Repository,
        "NOTE" => RecordKind::Note,
        "OBJE" => RecordKind::Multimedia,
        "SUBM" => RecordKind::Submitter,
        "SUBN" => RecordKind::Submission,
        tag => {
            scope.warn(
                token.line,
                "unknown-tag",
                format!("unknown record type {tag}, skipping it"),
            );
            return Step::Open(Node::Ignored);
        }
    };
    let Some(xref) = token.xref() else {
        scope.warn(
            token.line,
            "missing-xref",
            format!("{} record without an xref", token.tag()),
        );
        return Step::Open(Node::Unparented);
    };
    let node = match kind {
        RecordKind::Individual => Node::Individual(Box::new(Individual::new(xref))),
        RecordKind::Family => Node::Family(Box::new(Family::new(xref))),
        RecordKind::Source => Node::Source(Box::new(Source::new(xref))),
        RecordKind::Repository => Node::Repository(Box::new(Repository::new(xref))),
        RecordKind::Multimedia => Node::Multimedia(Box::new(Multimedia::new(xref))),
        RecordKind::Submitter => Node::Submitter(Box::new(Submitter::new(xref))),
        RecordKind::Submission => Node::Submission(Box::new(Submission::new(xref))),
        RecordKind::Note | RecordKind::Trailer => {
            return Step::OpenText(
                Node::Note(Box::new(Note::new(xref, 0))),
                TextField::Note,
                raw(token),
            )
        }
    };
    Step::Open(node)
}

/// Keep a line the handlers do not model, with its subtree.
pub fn custom(token: &LineToken) -> Step {
    let value = match &token.value {
        LineValue::Pointer(xref) => format!("@{xref}@"),
        other => other.text().to_string(),
    };
    Step::OpenText(
        Node::Custom(Box::new(CustomTag::new(token.tag(), None))),
        TextField::Value,
        value,
    )
}

/// `NOTE`: a pointer to a note record, or an inline note.
pub fn note(notes: &mut Vec<NoteLink>, token: &LineToken, cx: &mut Context<'_>) -> Step {
    match &token.value {
        LineValue::Pointer(xref) => {
            cx.scope.refer(xref, RecordKind::Note, token.line);
            notes.push(NoteLink::Pointer(xref.to_string()));
            Step::Done
        }
        _ => inline_note(token),
    }
}

pub fn inline_note(token: &LineToken) -> Step {
    Step::OpenText(
        Node::Note(Box::new(Note::new("", token.level))),
        TextField::Note,
        raw(token),
    )
}

/// `SOUR` under a record or structure: a citation of a source record, or an inline source.
pub fn citation(token: &LineToken, cx: &mut Context<'_>) -> Step {
    match &token.value {
        LineValue::Pointer(xref) => {
            cx.scope.refer(xref, RecordKind::Source, token.line);
            Step::Open(Node::Citation(Box::new(SourceCitation {
                source: Some(xref.to_string()),
                ..SourceCitation::default()
            })))
        }
        _ => Step::OpenText(
            Node::Citation(Box::default()),
            TextField::Description,
            raw(token),
        ),
    }
}

/// `OBJE` under a record or structure: a link to a multimedia record, or an inline object.
pub fn multimedia(links: &mut Vec<String>, token: &LineToken, cx: &mut Context<'_>) -> Step {
    match &token.value {
        LineValue::Pointer(xref) => {
            cx.scope.refer(xref, RecordKind::Multimedia, token.line);
            links.push(xref.to_string());
            Step::Done
        }
        _ => Step::Open(Node::Multimedia(Box::new(Multimedia::new("")))),
    }
}

pub fn address(token: &LineToken) -> Step {
    Step::OpenText(
        Node::Address(Box::default()),
        TextField::Address,
        raw(token),
    )
}

/// `PHON`, `EMAIL`, `FAX` and `WWW`. Returns `false` for other tags.
pub fn add_contact(address: &mut Address, token: &LineToken) -> bool {
    let list = match token.tag() {
        "PHON" => &mut address.phones,
        "EMAIL" => &mut address.emails,
        "FAX" => &mut address.faxes,
        "WWW" => &mut address.websites,
        _ => return false,
    };
    list.extend(scalar(token));
    true
}

/// Contact lines next to an address, creating the address on first use.
pub fn contact(address: &mut Option<Address>, token: &LineToken) -> bool {
    matches!(token.tag(), "PHON" | "EMAIL" | "FAX" | "WWW")
        && add_contact(address.get_or_insert_with(Address::default), token)
}

/// Lines every top-level record understands.
pub fn base_tag(
    base: &mut RecordBase,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    match (depth, token.tag()) {
        (1, "NOTE") => note(&mut base.notes, token, cx),
        (1, "SOUR") => citation(token, cx),
        (1, "OBJE") => multimedia(&mut base.multimedia, token, cx),
        (1, "REFN") => {
            base.user_references.push(UserReference {
                number: scalar(token).unwrap_or_default(),
                kind: None,
            });
            Step::Done
        }
        (2, "TYPE") if cx.parent_is("REFN") => {
            if let Some(reference) = base.user_references.last_mut() {
                reference.kind = scalar(token);
            }
            Step::Done
        }
        (1, "RIN") => {
            base.automated_record_id = scalar(token);
            Step::Done
        }
        (1, "RESN") => {
            base.restriction = Some(cx.enumerated(token, Restriction::parse));
            Step::Done
        }
        (1, "CHAN") => Step::Done,
        (2, "DATE") if cx.parent_is("CHAN") => date(token, DateSlot::Change),
        (2, "NOTE") if cx.parent_is("CHAN") => Step::Open(Node::Ignored),
        _ => Step::Unknown,
    }
}

pub fn date(token: &LineToken, slot: DateSlot) -> Step {
    Step::Open(Node::Date(
        Box::new(DateValue::parse(token.value.text())),
        slot,
    ))
}
