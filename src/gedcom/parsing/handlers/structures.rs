//! Names, places, dates, addresses and links

use super::{add_contact, citation, note, scalar, Context, Step};
use crate::gedcom::records::{
    Address, Association, Child, ChildLinkStatus, DateValue, FamilyLink, Pedigree,
    PersonalName, Place, Variation,
};
use crate::gedcom::token::LineToken;

/// Children of `FONE`/`ROMN`: only `TYPE` is kept.
fn variation_detail(variations: &mut [Variation], token: &LineToken) -> Step {
    if token.is_tag("TYPE") {
        if let Some(variation) = variations.last_mut() {
            variation.kind = scalar(token);
        }
    }
    Step::Done
}

fn variation(token: &LineToken) -> Variation {
    Variation {
        value: token.value.text().trim().to_string(),
        kind: None,
    }
}

pub fn handle_name(
    name: &mut PersonalName,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    if depth == 2 {
        return if cx.parent_is("FONE") {
            variation_detail(&mut name.phonetic, token)
        } else if cx.parent_is("ROMN") {
            variation_detail(&mut name.romanized, token)
        } else {
            Step::Unknown
        };
    }
    if depth != 1 {
        return Step::Unknown;
    }
    let field = match token.tag() {
        "TYPE" => &mut name.name_type,
        "NPFX" => &mut name.prefix,
        "GIVN" => &mut name.given,
        "NICK" => &mut name.nickname,
        "SPFX" => &mut name.surname_prefix,
        "SURN" => &mut name.surname,
        "NSFX" => &mut name.suffix,
        "FONE" => {
            name.phonetic.push(variation(token));
            return Step::Done;
        }
        "ROMN" => {
            name.romanized.push(variation(token));
            return Step::Done;
        }
        "NOTE" => return note(&mut name.notes, token, cx),
        "SOUR" => return citation(token, cx),
        _ => return Step::Unknown,
    };
    *field = scalar(token);
    Step::Done
}

pub fn handle_place(place: &mut Place, token: &LineToken, depth: u8, cx: &mut Context<'_>) -> Step {
    match (depth, token.tag()) {
        (1, "FORM") => place.form = scalar(token),
        (1, "FONE") => place.phonetic.push(variation(token)),
        (1, "ROMN") => place.romanized.push(variation(token)),
        (2, _) if cx.parent_is("FONE") => return variation_detail(&mut place.phonetic, token),
        (2, _) if cx.parent_is("ROMN") => return variation_detail(&mut place.romanized, token),
        (1, "MAP") => {}
        (2, "LATI") if cx.parent_is("MAP") => place.latitude = scalar(token),
        (2, "LONG") if cx.parent_is("MAP") => place.longitude = scalar(token),
        (1, "NOTE") => return note(&mut place.notes, token, cx),
        (1, "SOUR") => return citation(token, cx),
        _ => return Step::Unknown,
    }
    Step::Done
}

pub fn handle_date(date: &mut DateValue, token: &LineToken, depth: u8) -> Step {
    match (depth, token.tag()) {
        (1, "TIME") => {
            date.time = scalar(token);
            Step::Done
        }
        _ => Step::Unknown,
    }
}

pub fn handle_address(address: &mut Address, token: &LineToken, depth: u8) -> Step {
    if depth != 1 {
        return Step::Unknown;
    }
    if add_contact(address, token) {
        return Step::Done;
    }
    let field = match token.tag() {
        "ADR1" => &mut address.line1,
        "ADR2" => &mut address.line2,
        "ADR3" => &mut address.line3,
        "CITY" => &mut address.city,
        "STAE" => &mut address.state,
        "POST" => &mut address.postal_code,
        "CTRY" => &mut address.country,
        _ => return Step::Unknown,
    };
    *field = scalar(token);
    Step::Done
}

pub fn handle_family_link(
    link: &mut FamilyLink,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    if depth != 1 {
        return Step::Unknown;
    }
    match token.tag() {
        "PEDI" => link.pedigree = Some(cx.enumerated(token, Pedigree::parse)),
        "STAT" => {
            link.status = ChildLinkStatus::parse(token.value.text());
            if link.status.is_none() {
                cx.warn(
                    token,
                    "invalid-value",
                    format!("unrecognised STAT value {:?}", token.value.text()),
                );
            }
        }
        "_PRIMARY" | "_PREF" | "_PREFERRED" => {
            link.preferred = !matches!(
                token.value.text().trim().to_ascii_uppercase().as_str(),
                "N" | "NO"
            )
        }
        "NOTE" => return note(&mut link.notes, token, cx),
        _ => return Step::Unknown,
    }
    Step::Done
}

pub fn handle_association(
    association: &mut Association,
    token: &LineToken,
    depth: u8,
    cx: &mut Context<'_>,
) -> Step {
    match (depth, token.tag()) {
        (1, "RELA") => association.relation = scalar(token),
        (1, "TYPE") => association.kind = scalar(token),
        (1, "NOTE") => return note(&mut association.notes, token, cx),
        (1, "SOUR") => return citation(token, cx),
        _ => return Step::Unknown,
    }
    Step::Done
}

/// Sub-tags of `CHIL`: `_FREL`/`_MREL` name each side, `ADOP`/`FOST` name a side by
/// value (`HUSB`, `WIFE`, `BOTH`, or nothing for both).
pub fn handle_child(child: &mut Child, token: &LineToken, depth: u8, cx: &mut Context<'_>) -> Step {
    if depth != 1 {
        return Step::Unknown;
    }
    match token.tag() {
        "_FREL" => child.father_relation = Some(cx.enumerated(token, Pedigree::parse)),
        "_MREL" => child.mother_relation = Some(cx.enumerated(token, Pedigree::parse)),
        tag @ ("ADOP" | "FOST") => {
            let pedigree = if tag == "ADOP" {
                Pedigree::Adopted
            } else {
                Pedigree::Foster
            };
            let side = token.value.text().trim().to_ascii_uppercase();
            match side.as_str() {
                "HUSB" => child.father_relation = Some(pedigree),
                "WIFE" => child.mother_relation = Some(pedigree),
                "BOTH" | "" | "Y" => {
                    child.father_relation = Some(pedigree);
                    child.mother_relation = Some(pedigree);
                }
                _ => cx.warn(
                    token,
                    "invalid-value",
                    format!("unrecognised {tag} side {side:?}"),
                ),
            }
        }
        "NOTE" => return note(&mut child.notes, token, cx),
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

    fn token(tag: &str, value: &str) -> LineToken {
        LineToken {
            level: 2,
            xref: None,
            tag: Rc::from(tag),
            value: LineValue::Data(value.to_string()),
            line: 1,
        }
    }

    #[test]
    fn test_child_relations() {
        let mut scope = ParseScope::new(RecordOptions::default(), Newline::Lf);
        let mut cx = Context {
            scope: &mut scope,
            parent: None,
        };
        let mut child = Child::new("I3");
        handle_child(&mut child, &token("ADOP", "WIFE"), 1, &mut cx);
        handle_child(&mut child, &token("_FREL", "Natural"), 1, &mut cx);

        assert_eq!(child.mother_relation, Some(Pedigree::Adopted));
        assert_eq!(child.father_relation, Some(Pedigree::Birth));
    }

    #[test]
    fn test_address_lines_and_contacts() {
        let mut address = Address::default();
        handle_address(&mut address, &token("CITY", "Springfield"), 1);
        handle_address(&mut address, &token("PHON", "555-1234"), 1);

        assert_eq!(address.city.as_deref(), Some("Springfield"));
        assert_eq!(address.phones, vec!["555-1234".to_string()]);
    }

    #[test]
    fn test_name_variation_type() {
        let mut scope = ParseScope::new(RecordOptions::default(), Newline::Lf);
        let mut name = PersonalName::parse("Taro /Yamada/");

        let mut cx = Context {
            scope: &mut scope,
            parent: None,
        };
        handle_name(&mut name, &token("ROMN", "Taro Yamada"), 1, &mut cx);

        let mut cx = Context {
            scope: &mut scope,
            parent: Some(Rc::from("ROMN")),
        };
        handle_name(&mut name, &token("TYPE", "romaji"), 2, &mut cx);

        assert_eq!(name.romanized[0].kind.as_deref(), Some("romaji"));
    }
}
