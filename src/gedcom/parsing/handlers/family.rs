//! Family records

use super::{base_tag, Context, Step};
use crate::gedcom::parsing::node::{Node, TextField};
use crate::gedcom::records::enums::parse_child_count;
use crate::gedcom::records::event::FAMILY_EVENT_TAGS;
use crate::gedcom::records::{Child, Event, Family, FamilyEvent, RecordKind};
use crate::gedcom::token::LineToken;

pub fn handle(family: &mut Family, token: &LineToken, depth: u8, cx: &mut Context<'_>) -> Step {
    if depth != 1 {
        return base_tag(&mut family.base, token, depth, cx);
    }
    match token.tag() {
        tag @ ("HUSB" | "WIFE") => {
            let spouse = cx.pointer(token, RecordKind::Individual);
            let slot = if tag == "HUSB" {
                &mut family.husband
            } else {
                &mut family.wife
            };
            if slot.is_some() && spouse.is_some() {
                cx.warn(
                    token,
                    "invalid-value",
                    format!("family @{}@ names a second {tag}, keeping the first", family.base.xref),
                );
            } else if spouse.is_some() {
                *slot = spouse;
            }
            Step::Done
        }
        "CHIL" => match cx.pointer(token, RecordKind::Individual) {
            Some(xref) => Step::Open(Node::Child(Box::new(Child::new(xref)))),
            None => Step::Open(Node::Ignored),
        },
        "NCHI" => {
            family.child_count = Some(parse_child_count(token.value.text()).unwrap_or_else(|| {
                cx.warn(
                    token,
                    "invalid-value",
                    format!("NCHI {:?} is not a number, using 0", token.value.text()),
                );
                0
            }));
            Step::Done
        }
        "SUBM" => {
            family
                .submitters
                .extend(cx.pointer(token, RecordKind::Submitter));
            Step::Done
        }
        "SLGS" => Step::Open(Node::Sealing(Box::default())),
        tag if FAMILY_EVENT_TAGS.contains(&tag) => Step::OpenText(
            Node::FamilyEvent(Box::new(FamilyEvent {
                event: Event::new(tag, None),
                ..FamilyEvent::default()
            })),
            TextField::Value,
            token.value.text().to_string(),
        ),
        _ => base_tag(&mut family.base, token, depth, cx),
    }
}
