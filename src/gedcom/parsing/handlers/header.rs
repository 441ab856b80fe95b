//! The `HEAD` record

use super::{address, contact, date, inline_note, raw, scalar, Context, Step};
use crate::gedcom::parsing::node::{DateSlot, TextField};
use crate::gedcom::records::{Header, RecordKind};
use crate::gedcom::token::LineToken;

pub fn handle(header: &mut Header, token: &LineToken, depth: u8, cx: &mut Context<'_>) -> Step {
    let tag = token.tag();
    match depth {
        1 => match tag {
            "SOUR" => header.source.system_id = scalar(token),
            "DEST" => header.destination = scalar(token),
            "DATE" => return date(token, DateSlot::Transmission),
            "SUBM" => header.submitter = cx.pointer(token, RecordKind::Submitter),
            "SUBN" => header.submission = cx.pointer(token, RecordKind::Submission),
            "FILE" => header.file_name = scalar(token),
            "COPR" => return Step::Text(TextField::Copyright, raw(token)),
            "GEDC" | "PLAC" => {}
            "CHAR" => {
                header.charset = scalar(token);
                cx.scope.declared_charset = header.charset.clone();
            }
            "LANG" => header.language = scalar(token),
            "NOTE" => return inline_note(token),
            _ => return Step::Unknown,
        },
        2 => {
            let Some(parent) = cx.parent.clone() else {
                return Step::Unknown;
            };
            let field = match (&*parent, tag) {
                ("SOUR", "VERS") => &mut header.source.version,
                ("SOUR", "NAME") => &mut header.source.name,
                ("SOUR", "CORP") => &mut header.source.corporation,
                ("SOUR", "DATA") => &mut header.source.data_name,
                ("GEDC", "VERS") => &mut header.gedcom_version,
                ("GEDC", "FORM") => &mut header.gedcom_form,
                ("CHAR", "VERS") => &mut header.charset_version,
                ("PLAC", "FORM") => &mut header.place_form,
                _ => return Step::Unknown,
            };
            *field = scalar(token);
        }
        3 if cx.parent_is("CORP") => {
            if contact(&mut header.source.corporation_address, token) {
                return Step::Done;
            }
            if tag == "ADDR" {
                return address(token);
            }
            return Step::Unknown;
        }
        3 if cx.parent_is("DATA") => match tag {
            "DATE" => header.source.data_date = scalar(token),
            "COPR" => header.source.data_copyright = scalar(token),
            _ => return Step::Unknown,
        },
        _ => return Step::Unknown,
    }
    Step::Done
}
