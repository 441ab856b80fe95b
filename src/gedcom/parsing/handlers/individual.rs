//! Individual records

use super::{address, base_tag, contact, scalar, Context, Step};
use crate::gedcom::parsing::node::{Node, TextField};
use crate::gedcom::records::event::{
    INDIVIDUAL_ATTRIBUTE_TAGS, INDIVIDUAL_EVENT_TAGS, LDS_ORDINANCE_TAGS,
};
use crate::gedcom::records::{
    Association, Event, FamilyLink, FamilyRole, Individual, IndividualEvent, PersonalName,
    RecordKind, Sex,
};
use crate::gedcom::token::{LineToken, LineValue};

fn is_event_tag(tag: &str) -> bool {
    INDIVIDUAL_EVENT_TAGS.contains(&tag)
        || INDIVIDUAL_ATTRIBUTE_TAGS.contains(&tag)
        || LDS_ORDINANCE_TAGS.contains(&tag)
}

pub fn handle(person: &mut Individual, token: &LineToken, depth: u8, cx: &mut Context<'_>) -> Step {
    if depth != 1 {
        return base_tag(&mut person.base, token, depth, cx);
    }
    if contact(&mut person.address, token) {
        return Step::Done;
    }
    match token.tag() {
        "NAME" => Step::Open(Node::Name(Box::new(PersonalName::parse(
            token.value.text().trim(),
        )))),
        "SEX" => {
            person.sex = cx.enumerated(token, Sex::parse);
            Step::Done
        }
        tag @ ("FAMC" | "FAMS") => {
            let role = if tag == "FAMC" {
                FamilyRole::Child
            } else {
                FamilyRole::Spouse
            };
            match cx.pointer(token, RecordKind::Family) {
                Some(family) => Step::Open(Node::FamilyLink(Box::new(FamilyLink::new(
                    family,
                    person.base.xref.clone(),
                    role,
                )))),
                None => Step::Open(Node::Ignored),
            }
        }
        "ASSO" => match cx.pointer(token, RecordKind::Individual) {
            Some(xref) => Step::Open(Node::Association(Box::new(Association {
                xref,
                ..Association::default()
            }))),
            None => Step::Open(Node::Ignored),
        },
        "ALIA" => match &token.value {
            // Some producers write the alias name itself instead of a pointer.
            LineValue::Data(_) => {
                let mut name = PersonalName::parse(token.value.text().trim());
                name.name_type = Some("aka".to_string());
                Step::Open(Node::Name(Box::new(name)))
            }
            _ => {
                person.aliases.extend(cx.pointer(token, RecordKind::Individual));
                Step::Done
            }
        },
        "SUBM" => {
            person.submitters.extend(cx.pointer(token, RecordKind::Submitter));
            Step::Done
        }
        "ANCI" => {
            person
                .ancestor_interest
                .extend(cx.pointer(token, RecordKind::Submitter));
            Step::Done
        }
        "DESI" => {
            person
                .descendant_interest
                .extend(cx.pointer(token, RecordKind::Submitter));
            Step::Done
        }
        "RFN" => {
            person.permanent_record_file_number = scalar(token);
            Step::Done
        }
        "AFN" => {
            person.ancestral_file_number = scalar(token);
            Step::Done
        }
        "ADDR" => address(token),
        tag if is_event_tag(tag) => Step::OpenText(
            Node::IndividualEvent(Box::new(IndividualEvent {
                event: Event::new(tag, None),
                ..IndividualEvent::default()
            })),
            TextField::Value,
            token.value.text().to_string(),
        ),
        _ => base_tag(&mut person.base, token, depth, cx),
    }
}
