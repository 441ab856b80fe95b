//! Record assembler
//!
//!     Folds the token stream into records. Each token first closes every open record at
//!     its level or deeper, then goes either to the multi-line text of the record on top
//!     (`CONT`/`CONC`), or to the handler of that record, or opens a new top-level record
//!     when the stack is empty.
//!
//!     Closing a record moves its accumulated text into place and hands it to its parent
//!     on the stack. Closing a level 0 record stores it in the database, except the header,
//!     which has its own slot, and blank notes, which are dropped and remembered so that
//!     pointers to them are not reported as missing.

use super::custom_tags;
use super::handlers::{self, Context, Step};
use super::node::Node;
use super::state::{OpenRecord, ParseState, PendingText, MAX_DEPTH};
use crate::gedcom::config::RecordOptions;
use crate::gedcom::lexing::Newline;
use crate::gedcom::token::LineToken;
use log::debug;
use std::rc::Rc;

#[derive(Debug)]
pub struct Assembler {
    state: ParseState,
}

impl Assembler {
    pub fn new(options: RecordOptions, newline: Newline) -> Self {
        Self {
            state: ParseState::new(options, newline),
        }
    }

    pub fn state(&self) -> &ParseState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ParseState {
        &mut self.state
    }

    pub fn into_state(self) -> ParseState {
        self.state
    }

    /// Feed one token.
    pub fn consume(&mut self, token: &LineToken) {
        self.state.tags.pop_to(token.level);
        self.close_to(token.level);

        if token.is_continuation() {
            self.continue_text(token);
        } else {
            if let Some(top) = self.state.records.last_mut() {
                top.flush();
            }
            let step = self.route(token);
            self.apply(step, token);
        }
        self.state.tags.push(token.tag.clone(), token.level);
    }

    /// Close every open record. Called once the input is exhausted.
    pub fn close_all(&mut self) {
        self.close_to(0);
    }

    fn close_to(&mut self, level: u8) {
        while self
            .state
            .records
            .last()
            .is_some_and(|record| record.level >= level)
        {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        let Some(mut record) = self.state.records.pop() else {
            return;
        };
        record.flush();
        if self.state.records.is_empty() {
            return self.finish_record(record);
        }
        let owner = self.state.owner_xref();
        if let Some(parent) = self.state.records.last_mut() {
            parent
                .node
                .attach(record.node, &mut self.state.scope, &owner);
        }
    }

    fn finish_record(&mut self, record: OpenRecord) {
        let scope = &mut self.state.scope;
        match record.node {
            Node::Header(header) => {
                if scope.database.header.is_some() {
                    scope.warn(
                        record.line,
                        "duplicate-header",
                        "a second HEAD record replaces the first",
                    );
                }
                scope.database.header = Some(*header);
            }
            Node::Note(note) if note.is_blank() => {
                debug!("event=blank_note_discarded xref={}", note.base.xref);
                scope.discarded_notes.insert(note.base.xref.clone());
            }
            Node::Unparented | Node::Ignored => {}
            node => match node.into_record() {
                Some(record_value) => scope.insert(record_value, record.line),
                None => debug!("event=record_dropped line={}", record.line),
            },
        }
    }

    /// `CONT` and `CONC` extend the text started one level up.
    fn continue_text(&mut self, token: &LineToken) {
        let newline = self.state.scope.newline;
        let pending = self
            .state
            .records
            .last_mut()
            .and_then(|top| top.pending.as_mut())
            .filter(|pending| pending.level + 1 == token.level);
        match pending {
            Some(pending) => {
                if token.is_tag("CONT") {
                    pending.text.push_str(newline.as_str());
                }
                pending.text.push_str(token.value.text());
            }
            None => self.state.scope.warn(
                token.line,
                "unknown-tag",
                format!("{} does not continue any text, skipping it", token.tag()),
            ),
        }
    }

    fn route(&mut self, token: &LineToken) -> Step {
        let state = &mut self.state;
        let Some(owner) = state.records.last_mut() else {
            if token.level == 0 {
                return handlers::open_record(token, &mut state.scope);
            }
            state.scope.warn(
                token.line,
                "unparented-tag",
                format!("{} at level {} has no record above it", token.tag(), token.level),
            );
            return Step::Open(Node::Unparented);
        };

        let depth = token.level.saturating_sub(owner.level);
        let mut cx = Context {
            scope: &mut state.scope,
            parent: state.tags.parent(),
        };
        let step = handlers::dispatch(&mut owner.node, token, depth, &mut cx);
        if !matches!(step, Step::Unknown) {
            return step;
        }

        if let Some(mapping) = custom_tags::lookup(token.tag()) {
            let remapped = LineToken {
                tag: Rc::from(mapping.tag),
                ..token.clone()
            };
            debug!(
                "event=vendor_tag_mapped from={} to={}",
                token.tag(),
                mapping.tag
            );
            let mut step = handlers::dispatch(&mut owner.node, &remapped, depth, &mut cx);
            if let (Some(event_type), Step::Open(node) | Step::OpenText(node, ..)) =
                (mapping.event_type, &mut step)
            {
                node.set_event_type(event_type);
            }
            if !matches!(step, Step::Unknown) {
                return step;
            }
        }

        if owner.node.custom_mut().is_some() {
            if !token.is_custom() {
                cx.warn(
                    token,
                    "unknown-tag",
                    format!("{} is not expected under {}, keeping it as custom data", token.tag(), owner.node.name()),
                );
            }
            return handlers::custom(token);
        }
        cx.warn(
            token,
            "unknown-tag",
            format!("{} is not expected under {}, skipping it", token.tag(), owner.node.name()),
        );
        Step::Open(Node::Ignored)
    }

    fn apply(&mut self, step: Step, token: &LineToken) {
        let records = &mut self.state.records;
        match step {
            Step::Done | Step::Unknown => {}
            Step::Open(node) => {
                if records.len() < MAX_DEPTH {
                    records.push(OpenRecord::new(token.level, token.line, node));
                }
            }
            Step::OpenText(node, field, text) => {
                if records.len() < MAX_DEPTH {
                    let mut record = OpenRecord::new(token.level, token.line, node);
                    record.pending = Some(PendingText {
                        field,
                        level: token.level,
                        text,
                    });
                    records.push(record);
                }
            }
            Step::Text(field, text) => {
                if let Some(top) = records.last_mut() {
                    top.pending = Some(PendingText {
                        field,
                        level: token.level,
                        text,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gedcom::lexing::{LexOptions, Lexer};
    use crate::gedcom::parsing::fixup;
    use crate::gedcom::records::{Pedigree, Record, Sex};

    fn assemble(source: &str) -> ParseState {
        let newline = Newline::detect(source);
        let mut lexer = Lexer::new(LexOptions::lenient());
        let mut assembler = Assembler::new(RecordOptions::default(), newline);
        for (index, line) in source.lines().enumerate() {
            if let Some(token) = lexer.lex_line(line, index + 1).expect("lexes") {
                assembler.consume(&token);
            }
        }
        assembler.close_all();
        assembler.into_state()
    }

    #[test]
    fn test_single_individual() {
        let state = assemble("0 @I1@ INDI\n1 NAME John /Doe/\n1 SEX M\n0 TRLR\n");
        let person = state.scope.database.individual("I1").expect("I1");
        assert_eq!(person.names[0].value, "John /Doe/");
        assert_eq!(person.sex, Sex::Male);
        assert!(state.scope.database.has_trailer());
        assert!(state.records.is_empty());
    }

    #[test]
    fn test_cont_and_conc_join() {
        let state = assemble(
            "0 @N1@ NOTE First pa\n1 CONC rt\n1 CONT second line\n1 CONT\n0 TRLR\n",
        );
        let note = state.scope.database.note("N1").expect("N1");
        assert_eq!(note.text, "First part\nsecond line\n ");
    }

    #[test]
    fn test_nested_event_with_place_and_date() {
        let state = assemble(
            "0 @I1@ INDI\n1 BIRT\n2 DATE ABT 1900\n2 PLAC Boston\n3 MAP\n4 LATI N42.3\n0 TRLR\n",
        );
        let person = state.scope.database.individual("I1").expect("I1");
        let birth = person.event("BIRT").expect("birth");
        assert_eq!(birth.event.date.as_ref().map(|d| d.text.as_str()), Some("ABT 1900"));
        let place = birth.event.place.as_ref().expect("place");
        assert_eq!(place.name, "Boston");
        assert_eq!(place.latitude.as_deref(), Some("N42.3"));
    }

    #[test]
    fn test_vendor_event_is_renamed() {
        let state = assemble("0 @I1@ INDI\n1 _MILT Navy\n2 DATE 1942\n0 TRLR\n");
        let person = state.scope.database.individual("I1").expect("I1");
        let service = person.event("EVEN").expect("mapped event");
        assert_eq!(service.event.event_type.as_deref(), Some("Military Service"));
        assert_eq!(service.event.value.as_deref(), Some("Navy"));
    }

    #[test]
    fn test_unknown_underscore_tag_kept_quietly() {
        let state = assemble("0 @I1@ INDI\n1 _UID 1234\n2 _SUB x\n0 TRLR\n");
        let person = state.scope.database.individual("I1").expect("I1");
        assert_eq!(person.base.custom[0].tag, "_UID");
        assert_eq!(person.base.custom[0].children[0].tag, "_SUB");
        assert!(state.scope.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_standard_tag_reported() {
        let state = assemble("0 @I1@ INDI\n1 WXYZ what\n0 TRLR\n");
        assert!(state
            .scope
            .diagnostics
            .iter()
            .any(|d| d.has_code("unknown-tag") && d.line == 2));
    }

    #[test]
    fn test_stray_continuation_is_reported() {
        let state = assemble("0 @I1@ INDI\n1 CONT orphan\n0 TRLR\n");
        assert!(state
            .scope
            .diagnostics
            .iter()
            .any(|d| d.has_code("unknown-tag")));
        assert!(state.scope.database.contains("I1"));
    }

    #[test]
    fn test_blank_note_is_remembered() {
        let state = assemble("0 @N1@ NOTE\n1 CONT   \n0 TRLR\n");
        assert!(!state.scope.database.contains("N1"));
        assert!(state.scope.discarded_notes.contains("N1"));
    }

    #[test]
    fn test_child_adoption_side() {
        let state = assemble("0 @F1@ FAM\n1 CHIL @I1@\n2 ADOP HUSB\n0 TRLR\n");
        let family = state.scope.database.family("F1").expect("F1");
        assert_eq!(family.children[0].father_relation, Some(Pedigree::Adopted));
        assert_eq!(family.children[0].mother_relation, None);
    }

    #[test]
    fn test_inline_source_becomes_record() {
        let mut state = assemble("0 @I1@ INDI\n1 SOUR Family bible\n0 TRLR\n");
        assert_eq!(state.scope.inline_records.len(), 1);
        fixup::run(&mut state.scope);
        let sources: Vec<_> = state
            .scope
            .database
            .records()
            .filter_map(|record| match record {
                Record::Source(source) => Some(source),
                _ => None,
            })
            .collect();
        assert_eq!(sources.len(), 1);
        let person = state.scope.database.individual("I1").expect("I1");
        assert_eq!(
            person.base.citations[0].source.as_deref(),
            Some(sources[0].base.xref.as_str())
        );
    }
}
