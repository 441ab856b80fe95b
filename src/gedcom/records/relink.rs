//! Pointer renaming
//!
//!     Sources and multimedia objects written inline get their record xref only after the
//!     last line is read, when every xref the file declares is known. Until then the
//!     citations and object links pointing at them hold a provisional id. [Relink] walks a
//!     record and swaps provisional ids for final ones wherever a source or multimedia
//!     pointer can sit, inline notes included.

use super::{Event, Header, Note, NoteLink, Place, Record, RecordBase, SourceCitation};
use std::collections::HashMap;

pub struct Relink<'a> {
    renames: &'a HashMap<String, String>,
}

impl<'a> Relink<'a> {
    pub fn new(renames: &'a HashMap<String, String>) -> Self {
        Self { renames }
    }

    pub fn xref(&self, xref: &mut String) {
        if let Some(renamed) = self.renames.get(xref.as_str()) {
            xref.clone_from(renamed);
        }
    }

    pub fn record(&self, record: &mut Record) {
        if let Some(base) = record.base_mut() {
            self.base(base);
        }
        match record {
            Record::Individual(person) => {
                for name in &mut person.names {
                    self.citations(&mut name.citations);
                    self.notes(&mut name.notes);
                }
                let events = person
                    .events
                    .iter_mut()
                    .chain(&mut person.attributes)
                    .chain(&mut person.lds_ordinances);
                for event in events {
                    self.event(&mut event.event);
                }
                for association in &mut person.associations {
                    self.citations(&mut association.citations);
                    self.notes(&mut association.notes);
                }
                for link in person.child_in.iter_mut().chain(&mut person.spouse_in) {
                    self.notes(&mut link.notes);
                }
            }
            Record::Family(family) => {
                for event in &mut family.events {
                    self.event(&mut event.event);
                }
                for sealing in &mut family.sealings {
                    self.citations(&mut sealing.citations);
                    self.notes(&mut sealing.notes);
                    self.place(&mut sealing.place);
                }
                for child in &mut family.children {
                    self.notes(&mut child.notes);
                }
            }
            Record::Source(source) => {
                for repository in &mut source.repositories {
                    self.notes(&mut repository.notes);
                }
            }
            _ => {}
        }
    }

    pub fn header(&self, header: &mut Header) {
        for note in header.notes.iter_mut().chain(&mut header.content_description) {
            self.note(note);
        }
    }

    fn base(&self, base: &mut RecordBase) {
        base.multimedia.iter_mut().for_each(|link| self.xref(link));
        self.citations(&mut base.citations);
        self.notes(&mut base.notes);
    }

    fn event(&self, event: &mut Event) {
        event.multimedia.iter_mut().for_each(|link| self.xref(link));
        self.citations(&mut event.citations);
        self.notes(&mut event.notes);
        self.place(&mut event.place);
    }

    fn place(&self, place: &mut Option<Place>) {
        if let Some(place) = place {
            self.citations(&mut place.citations);
            self.notes(&mut place.notes);
        }
    }

    fn citations(&self, citations: &mut [SourceCitation]) {
        for citation in citations {
            if let Some(source) = &mut citation.source {
                self.xref(source);
            }
            citation.multimedia.iter_mut().for_each(|link| self.xref(link));
            self.notes(&mut citation.notes);
        }
    }

    fn notes(&self, notes: &mut [NoteLink]) {
        for link in notes {
            if let NoteLink::Inline(note) = link {
                self.note(note);
            }
        }
    }

    fn note(&self, note: &mut Note) {
        self.base(&mut note.base);
    }
}
