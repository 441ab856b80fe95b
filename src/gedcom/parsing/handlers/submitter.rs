//! Submitter and submission records

use super::{address, base_tag, contact, scalar, Context, Step};
use crate::gedcom::records::{RecordKind, Submission, Submitter};
use crate::gedcom::token::LineToken;

pub fn handle_submitter(
    submitter: &mut Submitter,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    if depth == 1 {
        if contact(&mut submitter.address, token) {
            return Step::Done;
        }
        match token.tag() {
            "NAME" => submitter.name = scalar(token),
            "ADDR" => return address(token),
            "LANG" => submitter.languages.extend(scalar(token)),
            "RFN" => submitter.registered_file_number = scalar(token),
            _ => return base_tag(&mut submitter.base, token, depth, cx),
        }
        return Step::Done;
    }
    base_tag(&mut submitter.base, token, depth, cx)
}

pub fn handle_submission(
    submission: &mut Submission,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    if depth != 1 {
        return base_tag(&mut submission.base, token, depth, cx);
    }
    match token.tag() {
        "SUBM" => submission.submitter = cx.pointer(token, RecordKind::Submitter),
        "FAMF" => submission.family_file = scalar(token),
        "TEMP" => submission.temple_code = scalar(token),
        "ANCE" => submission.ancestor_generations = scalar(token),
        "DESC" => submission.descendant_generations = scalar(token),
        "ORDI" => {
            submission.ordinance_process_flag =
                match token.value.text().trim().to_ascii_lowercase().as_str() {
                    "yes" | "y" => Some(true),
                    "no" | "n" => Some(false),
                    other => {
                        cx.warn(
                            token,
                            "invalid-value",
                            format!("ORDI expects yes or no, found {other:?}"),
                        );
                        None
                    }
                }
        }
        _ => return base_tag(&mut submission.base, token, depth, cx),
    }
    Step::Done
}
