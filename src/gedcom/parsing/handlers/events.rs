//! Events, attributes and sealings

use super::{address, citation, contact, date, multimedia, note, scalar, Context, Step};
use crate::gedcom::parsing::node::{DateSlot, Node};
use crate::gedcom::records::{
    AdoptedBy, Event, FamilyEvent, IndividualEvent, Place, RecordKind, Restriction,
    SpouseSealing,
};
use crate::gedcom::token::LineToken;

fn place(token: &LineToken) -> Step {
    Step::Open(Node::Place(Box::new(Place::new(
        token.value.text().trim(),
    ))))
}

/// Event detail lines, shared by every kind of event.
fn event_detail(event: &mut Event, token: &LineToken, depth: u8, cx: &mut Context<'_>) -> Step {
    if depth != 1 {
        return Step::Unknown;
    }
    if contact(&mut event.address, token) {
        return Step::Done;
    }
    let field = match token.tag() {
        "TYPE" => &mut event.event_type,
        "AGE" => &mut event.age,
        "AGNC" => &mut event.agency,
        "CAUS" => &mut event.cause,
        "RELI" => &mut event.religion,
        "TEMP" => &mut event.temple,
        "STAT" => &mut event.status,
        "DATE" => return date(token, DateSlot::Event),
        "PLAC" => return place(token),
        "ADDR" => return address(token),
        "NOTE" => return note(&mut event.notes, token, cx),
        "SOUR" => return citation(token, cx),
        "OBJE" => return multimedia(&mut event.multimedia, token, cx),
        "RESN" => {
            event.restriction = Some(cx.enumerated(token, Restriction::parse));
            return Step::Done;
        }
        _ => return Step::Unknown,
    };
    *field = scalar(token);
    Step::Done
}

pub fn handle_individual_event(
    event: &mut IndividualEvent,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    match (depth, token.tag()) {
        (1, "FAMC") => {
            event.family = cx.pointer(token, RecordKind::Family);
            Step::Done
        }
        (2, "ADOP") if cx.parent_is("FAMC") => {
            event.adopted_by = Some(cx.enumerated(token, AdoptedBy::parse));
            Step::Done
        }
        _ => event_detail(&mut event.event, token, depth, cx),
    }
}

pub fn handle_family_event(
    event: &mut FamilyEvent,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    match (depth, token.tag()) {
        (1, "HUSB") | (1, "WIFE") => Step::Done,
        (2, "AGE") if cx.parent_is("HUSB") => {
            event.husband_age = scalar(token);
            Step::Done
        }
        (2, "AGE") if cx.parent_is("WIFE") => {
            event.wife_age = scalar(token);
            Step::Done
        }
        _ => event_detail(&mut event.event, token, depth, cx),
    }
}

pub fn handle_sealing(
    sealing: &mut SpouseSealing,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    if depth != 1 {
        return Step::Unknown;
    }
    match token.tag() {
        "DATE" => date(token, DateSlot::Event),
        "PLAC" => place(token),
        "TEMP" => {
            sealing.temple = scalar(token);
            Step::Done
        }
        "STAT" => {
            sealing.status = scalar(token);
            Step::Done
        }
        "NOTE" => note(&mut sealing.notes, token, cx),
        "SOUR" => citation(token, cx),
        _ => Step::Unknown,
    }
}
