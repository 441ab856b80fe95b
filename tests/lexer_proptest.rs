//! Property tests for the line lexer
//!
//! Well formed lines must lex to exactly what was written, and no input may make the
//! lexer panic.

use gedcom_parser::gedcom::lexing::{tokenize, LexOptions, Lexer};
use gedcom_parser::{LexErrorKind, LineValue};
use proptest::prelude::*;

fn lex_one(line: &str) -> Result<Option<gedcom_parser::LineToken>, gedcom_parser::LexError> {
    Lexer::new(LexOptions::strict()).lex_line(line, 1)
}

proptest! {
    #[test]
    fn levels_up_to_99_are_accepted(level in 0u32..=99) {
        let token = lex_one(&format!("{level} NOTE x")).expect("lexes").expect("token");
        prop_assert_eq!(u32::from(token.level), level);
    }

    #[test]
    fn levels_above_99_are_rejected(level in 100u32..100_000) {
        let error = lex_one(&format!("{level} NOTE x")).expect_err("too deep");
        prop_assert_eq!(error.kind, LexErrorKind::LevelInvalid);
    }

    #[test]
    fn xrefs_up_to_22_characters_are_accepted(xref in "[A-Z0-9]{1,22}") {
        let token = lex_one(&format!("0 @{xref}@ INDI")).expect("lexes").expect("token");
        prop_assert_eq!(token.xref(), Some(xref.as_str()));
    }

    #[test]
    fn longer_xrefs_are_rejected(xref in "[A-Z0-9]{23,40}") {
        let error = lex_one(&format!("0 @{xref}@ INDI")).expect_err("too long");
        prop_assert_eq!(error.kind, LexErrorKind::XrefIDTooLong);
    }

    #[test]
    fn conformant_lines_lex_exactly(
        level in 0u8..=99,
        xref in prop::option::of("[A-Z][A-Z0-9]{0,10}"),
        tag in "[A-Z][A-Z0-9]{2,5}",
        value in prop::option::of("[A-Za-z0-9][A-Za-z0-9 ,./]{0,30}"),
    ) {
        prop_assume!(tag != "TRLR" && tag != "CONT" && tag != "CONC");
        let mut line = level.to_string();
        if let Some(xref) = &xref {
            line.push_str(&format!(" @{xref}@"));
        }
        line.push(' ');
        line.push_str(&tag);
        if let Some(value) = &value {
            line.push(' ');
            line.push_str(value);
        }

        let token = lex_one(&line).expect("lexes").expect("token");
        prop_assert_eq!(token.level, level);
        prop_assert_eq!(token.xref(), xref.as_deref());
        prop_assert_eq!(token.tag(), tag.as_str());
        let expected = value.map_or(LineValue::None, LineValue::Data);
        prop_assert_eq!(&token.value, &expected);
        prop_assert_eq!(token.to_string(), line);
    }

    #[test]
    fn arbitrary_input_never_panics(source in "\\PC{0,200}") {
        let _ = tokenize(&source, LexOptions::strict());
        let _ = tokenize(&source, LexOptions::lenient());
    }
}
