//! Line lexer cases, strict and lenient

use gedcom_parser::gedcom::lexing::{tokenize, LexOptions};
use gedcom_parser::{LexErrorKind, LineValue};
use rstest::rstest;

fn render(source: &str, options: LexOptions) -> String {
    tokenize(source, options)
        .unwrap_or_else(|error| panic!("should lex: {error}"))
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[rstest]
#[case::no_level("HEAD", LexErrorKind::LevelExpected)]
#[case::level_too_large("100 NOTE x", LexErrorKind::LevelInvalid)]
#[case::level_runs_into_tag("0HEAD", LexErrorKind::LevelMissingDelim)]
#[case::unterminated_xref("0 @I1 INDI", LexErrorKind::XrefIDMissingDelim)]
#[case::long_xref("0 @ABCDEFGHIJKLMNOPQRSTUVW@ INDI", LexErrorKind::XrefIDTooLong)]
#[case::double_space("0  @I1@ INDI", LexErrorKind::InvalidDelim)]
#[case::underscore_inside_tag("1 MY_TAG x", LexErrorKind::TagMissingDelimOrTerm)]
#[case::pointer_with_text("1 FAMC @F1@ extra", LexErrorKind::LineValueInvalid)]
#[case::tab_in_value("1 NOTE a\tb", LexErrorKind::LineValueMissingTerm)]
fn strict_lexing_rejects(#[case] source: &str, #[case] expected: LexErrorKind) {
    let error = tokenize(source, LexOptions::strict()).expect_err("should fail");
    assert_eq!(error.kind, expected, "{source:?}");
    assert_eq!(error.line, 1);
}

#[rstest]
#[case::double_space("0  @I1@ INDI", "0 @I1@ INDI")]
#[case::underscore_inside_tag("1 MY_TAG x", "1 MY_TAG x")]
#[case::tab_in_value("1 NOTE a\tb", "1 NOTE a\tb")]
#[case::trailing_spaces_after_tag("0 TRLR   ", "0 TRLR")]
fn lenient_lexing_accepts(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(source, LexOptions::lenient()), expected);
}

#[rstest]
#[case("1 EMAIL a@@b.org", "a@b.org")]
#[case("1 NOTE @@start", "@start")]
#[case("2 DATE @#DGREGORIAN@ 1 JAN 1900", "@#DGREGORIAN@ 1 JAN 1900")]
fn at_signs_in_values(#[case] source: &str, #[case] expected: &str) {
    let tokens = tokenize(source, LexOptions::strict()).expect("should lex");
    assert_eq!(tokens[0].value, LineValue::Data(expected.to_string()));
}

#[rstest]
#[case::bare_cont("2 CONT")]
#[case::delimiter_only("2 CONT ")]
#[case::bare_conc("2 CONC")]
fn empty_continuations_are_a_space(#[case] source: &str) {
    let tokens = tokenize(source, LexOptions::strict()).expect("should lex");
    assert_eq!(tokens[0].value, LineValue::Data(" ".to_string()));
}

#[test]
fn error_reports_the_physical_line() {
    let source = "0 HEAD\n\n1 SOUR X\n1NOTE bad\n";
    let error = tokenize(source, LexOptions::strict()).expect_err("should fail");
    assert_eq!(error.line, 4);
}

#[test]
fn small_file_renders_canonically() {
    let source = "0 HEAD\r\n1 CHAR UTF-8\r\n0 @I1@ INDI\r\n1 NAME John /Doe/\r\n1 FAMC @F1@\r\n2 NOTE a@@b\r\n0 TRLR\r\n";
    insta::assert_snapshot!(render(source, LexOptions::strict()), @r"
    0 HEAD
    1 CHAR UTF-8
    0 @I1@ INDI
    1 NAME John /Doe/
    1 FAMC @F1@
    2 NOTE a@b
    0 TRLR
    ");
}
