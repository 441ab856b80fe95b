//! Sources, repositories and the citations pointing at them

use super::{
    address, base_tag, contact, date, multimedia, note, raw, scalar, Context, Step,
};
use crate::gedcom::parsing::node::{DateSlot, Node, TextField};
use crate::gedcom::records::{
    CallNumber, Certainty, RecordKind, RecordedEvents, Repository, RepositoryCitation, Source,
    SourceCitation,
};
use crate::gedcom::token::LineToken;

pub fn handle_source(source: &mut Source, token: &LineToken, depth: u8, cx: &mut Context<'_>) -> Step {
    match (depth, token.tag()) {
        (1, "TITL") => Step::Text(TextField::Title, raw(token)),
        (1, "AUTH") => Step::Text(TextField::Author, raw(token)),
        (1, "PUBL") => Step::Text(TextField::Publication, raw(token)),
        (1, "TEXT") => Step::Text(TextField::Text, raw(token)),
        (1, "ABBR") => {
            source.filed_by = scalar(token);
            Step::Done
        }
        (1, "REPO") => {
            let repository = cx.pointer(token, RecordKind::Repository);
            Step::Open(Node::RepositoryCitation(Box::new(RepositoryCitation {
                repository,
                ..RepositoryCitation::default()
            })))
        }
        (1, "DATA") => Step::Done,
        (2, "EVEN") if cx.parent_is("DATA") => {
            source.recorded_events.push(RecordedEvents {
                events: token.value.text().trim().to_string(),
                ..RecordedEvents::default()
            });
            Step::Done
        }
        (2, "AGNC") if cx.parent_is("DATA") => {
            source.agency = scalar(token);
            Step::Done
        }
        (2, "NOTE") if cx.parent_is("DATA") => note(&mut source.base.notes, token, cx),
        (3, "DATE") if cx.parent_is("EVEN") => date(token, DateSlot::RecordedPeriod),
        (3, "PLAC") if cx.parent_is("EVEN") => {
            if let Some(events) = source.recorded_events.last_mut() {
                events.jurisdiction = scalar(token);
            }
            Step::Done
        }
        _ => base_tag(&mut source.base, token, depth, cx),
    }
}

pub fn handle_repository(
    repository: &mut Repository,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    if depth == 1 {
        if contact(&mut repository.address, token) {
            return Step::Done;
        }
        match token.tag() {
            "NAME" => {
                repository.name = scalar(token);
                return Step::Done;
            }
            "ADDR" => return address(token),
            _ => {}
        }
    }
    base_tag(&mut repository.base, token, depth, cx)
}

pub fn handle_citation(
    citation: &mut SourceCitation,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    match (depth, token.tag()) {
        (1, "PAGE") => citation.page = scalar(token),
        (1, "EVEN") => citation.event_cited = scalar(token),
        (2, "ROLE") if cx.parent_is("EVEN") => citation.role = scalar(token),
        (1, "DATA") => {}
        (2, "DATE") if cx.parent_is("DATA") => return date(token, DateSlot::CitationData),
        (2, "TEXT") if cx.parent_is("DATA") => return Step::Text(TextField::DataText, raw(token)),
        (1, "QUAY") => citation.certainty = Some(cx.enumerated(token, Certainty::parse)),
        (1, "TEXT") => return Step::Text(TextField::Text, raw(token)),
        (1, "NOTE") => return note(&mut citation.notes, token, cx),
        (1, "OBJE") => return multimedia(&mut citation.multimedia, token, cx),
        _ => return Step::Unknown,
    }
    Step::Done
}

pub fn handle_repository_citation(
    citation: &mut RepositoryCitation,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    match (depth, token.tag()) {
        (1, "CALN") => citation.call_numbers.push(CallNumber {
            number: token.value.text().trim().to_string(),
            media: None,
        }),
        (2, "MEDI") if cx.parent_is("CALN") => {
            if let Some(call) = citation.call_numbers.last_mut() {
                call.media = scalar(token);
            }
        }
        (1, "NOTE") => return note(&mut citation.notes, token, cx),
        _ => return Step::Unknown,
    }
    Step::Done
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gedcom::config::RecordOptions;
    use crate::gedcom::lexing::Newline;
    use crate::gedcom::parsing::state::ParseScope;
    use crate::gedcom::token::LineValue;
    use std::rc::Rc;

    fn token(level: u8, tag: &str, value: &str) -> LineToken {
        LineToken {
            level,
            xref: None,
            tag: Rc::from(tag),
            value: LineValue::Data(value.to_string()),
            line: 7,
        }
    }

    #[test]
    fn test_recorded_events_jurisdiction() {
        let mut scope = ParseScope::new(RecordOptions::default(), Newline::Lf);
        let mut source = Source::new("S1");

        let mut cx = Context {
            scope: &mut scope,
            parent: Some(Rc::from("DATA")),
        };
        handle_source(&mut source, &token(2, "EVEN", "BIRT, DEAT"), 2, &mut cx);
        let mut cx = Context {
            scope: &mut scope,
            parent: Some(Rc::from("EVEN")),
        };
        handle_source(&mut source, &token(3, "PLAC", "Kent"), 3, &mut cx);

        assert_eq!(source.recorded_events[0].events, "BIRT, DEAT");
        assert_eq!(
            source.recorded_events[0].jurisdiction.as_deref(),
            Some("Kent")
        );
    }

    #[test]
    fn test_title_starts_multiline_text() {
        let mut scope = ParseScope::new(RecordOptions::default(), Newline::Lf);
        let mut cx = Context {
            scope: &mut scope,
            parent: None,
        };
        let step = handle_source(
            &mut Source::new("S1"),
            &token(1, "TITL", "Parish registers"),
            1,
            &mut cx,
        );
        assert!(matches!(step, Step::Text(TextField::Title, text) if text == "Parish registers"));
    }

    #[test]
    fn test_citation_quality() {
        let mut scope = ParseScope::new(RecordOptions::default(), Newline::Lf);
        let mut cx = Context {
            scope: &mut scope,
            parent: None,
        };
        let mut citation = SourceCitation::default();
        handle_citation(&mut citation, &token(2, "QUAY", "3"), 1, &mut cx);
        handle_citation(&mut citation, &token(2, "PAGE", " p. 12 "), 1, &mut cx);

        assert_eq!(citation.certainty, Some(Certainty::Direct));
        assert_eq!(citation.page.as_deref(), Some("p. 12"));
    }

    #[test]
    fn test_call_number_media() {
        let mut scope = ParseScope::new(RecordOptions::default(), Newline::Lf);
        let mut citation = RepositoryCitation::default();
        let mut cx = Context {
            scope: &mut scope,
            parent: None,
        };
        handle_repository_citation(&mut citation, &token(2, "CALN", "MS 42"), 1, &mut cx);
        let mut cx = Context {
            scope: &mut scope,
            parent: Some(Rc::from("CALN")),
        };
        handle_repository_citation(&mut citation, &token(3, "MEDI", "Book"), 2, &mut cx);

        assert_eq!(citation.call_numbers[0].number, "MS 42");
        assert_eq!(citation.call_numbers[0].media.as_deref(), Some("Book"));
    }
}
