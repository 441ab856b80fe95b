//! File level reading: sources, charsets, errors and notifications

use gedcom_parser::gedcom::encoding::Charset;
use gedcom_parser::gedcom::records::Sex;
use gedcom_parser::gedcom::testing::assert_db;
use gedcom_parser::{GedcomConfig, GedcomReader, LexError, LexErrorKind, ParseObserver, ReadError};
use std::io::Write;

const FAMILY: &str = "0 HEAD\n1 CHAR UTF-8\n0 @I1@ INDI\n1 NAME Zoë /Brandt/\n1 SEX F\n1 FAMS @F1@\n0 @F1@ FAM\n1 WIFE @I1@\n0 TRLR\n";

fn utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

#[derive(Default)]
struct Recorder {
    tags: Vec<String>,
    errors: Vec<LexErrorKind>,
    progress: Vec<u8>,
}

impl ParseObserver for Recorder {
    fn tag_found(&mut self, token: &gedcom_parser::LineToken) {
        self.tags.push(token.tag().to_string());
    }

    fn parse_error(&mut self, error: &LexError) {
        self.errors.push(error.kind);
    }

    fn progress(&mut self, percent: u8) {
        self.progress.push(percent);
    }
}

#[test]
fn reads_a_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(FAMILY.as_bytes()).expect("write");

    let parsed = GedcomReader::new(GedcomConfig::default())
        .read(file.path())
        .expect("reads");
    assert!(parsed.is_success());
    assert_eq!(parsed.charset, Some(Charset::Utf8));
    assert_db(&parsed.database)
        .record_count(2)
        .individual("I1", |person| {
            person.name("Zoë /Brandt/").sex(Sex::Female).spouse_in("F1")
        })
        .family("F1", |family| family.wife("I1"));
}

#[test]
fn missing_file_is_an_io_error() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("absent.ged");
    match GedcomReader::new(GedcomConfig::default()).read(&path) {
        Err(ReadError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an io error, got {other:?}"),
    }
}

#[test]
fn utf16_with_byte_order_mark() {
    let parsed = GedcomReader::new(GedcomConfig::default())
        .read_bytes(&utf16le_with_bom(FAMILY))
        .expect("reads");

    assert_eq!(parsed.charset, Some(Charset::Unicode));
    assert_db(&parsed.database).individual("I1", |person| person.name("Zoë /Brandt/"));
}

#[test]
fn declared_charset_is_not_second_guessed_for_strings() {
    let source = "0 HEAD\n1 CHAR ANSEL\n0 @I1@ INDI\n1 NAME Zoë\n0 TRLR\n";
    let parsed = GedcomReader::new(GedcomConfig::default())
        .read_str(source)
        .expect("reads");
    assert_eq!(
        parsed.database.individual("I1").and_then(|p| p.name()),
        Some("Zoë")
    );
    assert_eq!(
        parsed.database.header.as_ref().and_then(|h| h.charset.as_deref()),
        Some("ANSEL")
    );
}

#[test]
fn lexical_error_stops_the_read_and_keeps_earlier_records() {
    let source = "0 @I1@ INDI\n1 NAME Kept\n0 @I2@INDI\n1 NAME Lost\n0 TRLR\n";
    let mut recorder = Recorder::default();
    let parsed = GedcomReader::new(GedcomConfig::default())
        .with_observer(&mut recorder)
        .read_str(source)
        .expect("reads");

    let error = parsed.error.as_ref().expect("error");
    assert_eq!(error.kind, LexErrorKind::XrefIDMissingDelim);
    assert_eq!(error.line, 3);
    assert_db(&parsed.database)
        .record_count(1)
        .individual("I1", |person| person.name("Kept"));
    assert_eq!(recorder.errors, vec![LexErrorKind::XrefIDMissingDelim]);
    assert_eq!(recorder.tags, vec!["INDI", "NAME"]);
}

#[test]
fn lexical_errors_can_be_skipped() {
    let mut config = GedcomConfig::default();
    config.reader.stop_on_error = false;
    let source = "0 @I1@ INDI\n1 NAME Kept\n0 @I2@INDI\n0 @I3@ INDI\n1 NAME Also kept\n0 TRLR\n";
    let mut recorder = Recorder::default();
    let parsed = GedcomReader::new(config)
        .with_observer(&mut recorder)
        .read_str(source)
        .expect("reads");

    assert!(parsed.is_success());
    assert_db(&parsed.database)
        .record_count(2)
        .lacks("I2")
        .individual("I3", |person| person.name("Also kept"));
    let skipped: Vec<_> = parsed
        .diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.has_code("lexical-error"))
        .map(|diagnostic| diagnostic.line)
        .collect();
    assert_eq!(skipped, vec![3]);
    assert_eq!(recorder.errors.len(), 1);
    assert_eq!(recorder.progress.last(), Some(&100));
}

#[test]
fn charset_restart_notifies_each_line_once() {
    let source = b"0 HEAD\n1 CHAR ANSI\n0 @I1@ INDI\n1 NAME Jos\xC3\xA9\n0 TRLR\n";
    let mut recorder = Recorder::default();
    let parsed = GedcomReader::new(GedcomConfig::default())
        .with_observer(&mut recorder)
        .read_bytes(source)
        .expect("reads");

    assert_eq!(parsed.charset, Some(Charset::Ansi));
    assert_eq!(recorder.tags, vec!["HEAD", "CHAR", "INDI", "NAME", "TRLR"]);
    assert!(recorder.progress.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(recorder.progress.last(), Some(&100));
}

#[test]
fn reader_configured_from_a_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(file, "[reader]\nstop_on_error = false").expect("write config");

    let parsed = GedcomReader::from_config_file(file.path())
        .expect("config builds")
        .read_str("0 @I1@ INDI\n0 @I2@INDI\n0 @I3@ INDI\n0 TRLR\n")
        .expect("reads");
    assert!(parsed.is_success());
    assert_db(&parsed.database).record_count(2).lacks("I2");
}

#[test]
fn missing_config_file_is_a_config_error() {
    let directory = tempfile::tempdir().expect("temp dir");
    let result = GedcomReader::from_config_file(directory.path().join("absent.toml"));
    assert!(matches!(result, Err(ReadError::Config(_))));
}
