//! Line Lexer
//!
//!     A state machine that reads one physical line into a [LineToken]:
//!
//!         Level -> XrefId -> Tag -> LineValue
//!
//!     Level
//!
//!         Leading whitespace is skipped, then a run of digits is read as the level (0 to 99).
//!         Exactly one space must follow, unless `ignore_invalid_delim` is set.
//!
//!     XrefId
//!
//!         Optional. An `@id@` right after the level becomes the line's xref (at most 22
//!         characters), and must be followed by a delimiter.
//!
//!     Tag
//!
//!         A run of letters and digits. A leading underscore marks a vendor tag; hyphens and
//!         inner underscores need `allow_hyphen_or_underscore_in_tag`. The tag must end the
//!         line or be followed by a delimiter.
//!
//!     LineValue
//!
//!         `@id@` followed by nothing but whitespace is a pointer. Anything else is data:
//!         printable characters, `@#...@` escapes copied through, `@@` unescaped to `@`, and
//!         stray `@` signs kept as they are (they turn up in e-mail addresses).
//!
//!     The lexer remembers the level and tag of the last line it produced. When
//!     `apply_conc_cont_on_new_line_hack` is set, a line with no level that follows a `CONT`
//!     or `CONC` line is read as one more `CONC` at the same level: some producers break
//!     long continuation lines without repeating the level and tag.
//!
//!     Any other failure leaves the error in [Lexer::error] and aborts the line. The lexer is
//!     ready for the next line either way.

use super::characters::{is_padding, is_tag_char, is_value_char};
use super::options::LexOptions;
use crate::gedcom::error::{LexError, LexErrorKind};
use crate::gedcom::interning::{Key, KeyTable};
use crate::gedcom::token::{LineToken, LineValue};
use log::debug;
use std::rc::Rc;

/// Highest level the grammar allows.
pub const MAX_LEVEL: u32 = 99;
/// Longest xref id the grammar allows, in characters.
pub const MAX_XREF_LENGTH: usize = 22;

/// Where the lexer is within the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    Level,
    XrefId,
    Tag,
    LineValue,
}

/// Stateful per-line lexer. One instance serves one file.
#[derive(Debug)]
pub struct Lexer {
    options: LexOptions,
    tags: KeyTable,
    xrefs: KeyTable,
    cont: Key,
    conc: Key,
    trailer: Key,
    state: LexState,
    error: Option<LexErrorKind>,
    previous_level: Option<u8>,
    previous_tag: Option<Key>,
    last: Option<LineToken>,
}

impl Lexer {
    pub fn new(options: LexOptions) -> Self {
        let mut tags = KeyTable::new();
        let cont = tags.intern_str("CONT");
        let conc = tags.intern_str("CONC");
        let trailer = tags.intern_str("TRLR");
        Self {
            options,
            tags,
            xrefs: KeyTable::new(),
            cont,
            conc,
            trailer,
            state: LexState::Level,
            error: None,
            previous_level: None,
            previous_tag: None,
            last: None,
        }
    }

    /// Lex one physical line (without its terminator).
    ///
    /// Returns `Ok(None)` for blank lines.
    pub fn lex_line(
        &mut self,
        line: &str,
        line_number: usize,
    ) -> Result<Option<LineToken>, LexError> {
        self.state = LexState::Level;
        self.error = None;
        if line.chars().all(char::is_whitespace) {
            return Ok(None);
        }

        let mut cursor = Cursor::new(line);
        match self.run(&mut cursor, line_number) {
            Ok(token) => {
                self.previous_level = Some(token.level);
                self.previous_tag = Some(token.tag.clone());
                self.last = Some(token.clone());
                self.state = LexState::Level;
                Ok(Some(token))
            }
            Err(kind) => {
                debug!(
                    "event=lex_error line={} state={:?} kind={:?}",
                    line_number, self.state, kind
                );
                self.error = Some(kind);
                Err(LexError::new(kind, line_number, cursor.column()))
            }
        }
    }

    fn run(&mut self, cursor: &mut Cursor<'_>, line_number: usize) -> Result<LineToken, LexErrorKind> {
        let mut level = 0;
        let mut xref = None;
        let mut tag: Option<Key> = None;

        loop {
            match self.state {
                LexState::Level => match self.lex_level(cursor) {
                    Ok(found) => {
                        level = found;
                        self.state = LexState::XrefId;
                    }
                    Err(LexErrorKind::LevelExpected) if self.continuation_hack_applies() => {
                        return Ok(self.continue_previous_line(cursor.text, line_number));
                    }
                    Err(kind) => return Err(kind),
                },
                LexState::XrefId => {
                    xref = self.lex_xref(cursor)?;
                    self.state = LexState::Tag;
                }
                LexState::Tag => {
                    let (found, has_value) = self.lex_tag(cursor)?;
                    if !has_value {
                        let value = empty_value(self.is_continuation(&found));
                        return Ok(LineToken {
                            level,
                            xref,
                            tag: found,
                            value,
                            line: line_number,
                        });
                    }
                    tag = Some(found);
                    self.state = LexState::LineValue;
                }
                LexState::LineValue => {
                    let tag = tag.take().ok_or(LexErrorKind::TagExpected)?;
                    let value = self.lex_value(cursor, &tag)?;
                    return Ok(LineToken {
                        level,
                        xref,
                        tag,
                        value,
                        line: line_number,
                    });
                }
            }
        }
    }

    fn lex_level(&self, cursor: &mut Cursor<'_>) -> Result<u8, LexErrorKind> {
        cursor.eat_while(char::is_whitespace);
        let digits = cursor.eat_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(LexErrorKind::LevelExpected);
        }
        let level = digits
            .parse::<u32>()
            .ok()
            .filter(|level| *level <= MAX_LEVEL)
            .ok_or(LexErrorKind::LevelInvalid)?;
        self.expect_delimiter(cursor, LexErrorKind::LevelMissingDelim)?;
        Ok(level as u8)
    }

    fn lex_xref(&mut self, cursor: &mut Cursor<'_>) -> Result<Option<Key>, LexErrorKind> {
        if cursor.peek() != Some('@') {
            return Ok(None);
        }
        let start = cursor.position + 1;
        let length = cursor.text[start..]
            .find('@')
            .ok_or(LexErrorKind::XrefIDMissingDelim)?;
        if cursor.text[start..start + length].chars().count() > MAX_XREF_LENGTH {
            return Err(LexErrorKind::XrefIDTooLong);
        }
        let key = self.xrefs.intern(cursor.text, start, length);
        cursor.position = start + length + 1;
        self.expect_delimiter(cursor, LexErrorKind::XrefIDMissingDelim)?;
        Ok(Some(key).filter(|key| !key.is_empty()))
    }

    /// Returns the tag and whether a value part follows.
    fn lex_tag(&mut self, cursor: &mut Cursor<'_>) -> Result<(Key, bool), LexErrorKind> {
        let start = cursor.position;
        let mut count = 0;
        while let Some(c) = cursor.peek() {
            if !is_tag_char(c, count, &self.options) {
                break;
            }
            cursor.bump();
            count += 1;
        }
        if count == 0 {
            return Err(LexErrorKind::TagExpected);
        }
        let tag = self.tags.intern(cursor.text, start, cursor.position - start);

        if Rc::ptr_eq(&tag, &self.trailer) && cursor.rest().chars().all(char::is_whitespace) {
            return Ok((tag, false));
        }
        match cursor.peek() {
            None => Ok((tag, false)),
            Some(' ') => {
                cursor.bump();
                Ok((tag, true))
            }
            Some(c) if is_padding(c) && self.options.ignore_invalid_delim => {
                cursor.bump();
                Ok((tag, true))
            }
            Some(c) if self.options.ignore_missing_terms => {
                debug!("event=tag_unterminated tag={} next={:?}", tag, c);
                Ok((tag, true))
            }
            Some(_) => Err(LexErrorKind::TagMissingDelimOrTerm),
        }
    }

    fn lex_value(&mut self, cursor: &mut Cursor<'_>, tag: &Key) -> Result<LineValue, LexErrorKind> {
        let continuation = self.is_continuation(tag);
        let rest = cursor.rest();
        if rest.is_empty() {
            return Ok(empty_value(continuation));
        }
        if !continuation && rest.chars().all(char::is_whitespace) {
            cursor.position = cursor.text.len();
            return Ok(LineValue::None);
        }
        if let Some(pointer) = self.lex_pointer(cursor)? {
            return Ok(LineValue::Pointer(pointer));
        }
        let data = self.lex_data(cursor)?;
        if data.is_empty() {
            return Ok(empty_value(continuation));
        }
        Ok(LineValue::Data(data))
    }

    fn lex_pointer(&mut self, cursor: &mut Cursor<'_>) -> Result<Option<Key>, LexErrorKind> {
        let rest = cursor.rest();
        let mut chars = rest.chars();
        if chars.next() != Some('@') {
            return Ok(None);
        }
        if matches!(chars.next(), None | Some('@') | Some('#')) {
            return Ok(None);
        }
        let body = &rest[1..];
        let Some(length) = body.find('@') else {
            return Ok(None);
        };
        if body[..length].chars().any(char::is_whitespace) {
            return Ok(None);
        }
        let start = cursor.position + 1;
        if !body[length + 1..].chars().all(char::is_whitespace) {
            cursor.position = start + length + 1;
            return Err(LexErrorKind::LineValueInvalid);
        }
        let key = self.xrefs.intern(cursor.text, start, length);
        cursor.position = cursor.text.len();
        Ok(Some(key))
    }

    fn lex_data(&self, cursor: &mut Cursor<'_>) -> Result<String, LexErrorKind> {
        let rest = cursor.rest();
        let mut value = String::with_capacity(rest.len());
        let mut index = 0;

        while let Some(c) = rest[index..].chars().next() {
            if c == '@' {
                let tail = &rest[index..];
                if tail.starts_with("@@") {
                    value.push('@');
                    index += 2;
                    continue;
                }
                if tail.starts_with("@#") {
                    if let Some(close) = tail[2..].find('@') {
                        let escape = &tail[..close + 3];
                        value.push_str(escape);
                        index += escape.len();
                        continue;
                    }
                }
                value.push('@');
                index += 1;
                continue;
            }
            if !is_value_char(c, &self.options) {
                break;
            }
            value.push(c);
            index += c.len_utf8();
        }

        cursor.position += index;
        if index < rest.len() {
            if !self.options.ignore_missing_terms {
                return Err(if value.is_empty() {
                    LexErrorKind::LineValueExpected
                } else {
                    LexErrorKind::LineValueMissingTerm
                });
            }
            debug!(
                "event=value_truncated dropped={:?}",
                &rest[index..]
            );
            cursor.position = cursor.text.len();
        }
        Ok(value)
    }

    fn expect_delimiter(
        &self,
        cursor: &mut Cursor<'_>,
        missing: LexErrorKind,
    ) -> Result<(), LexErrorKind> {
        match cursor.peek() {
            Some(' ') => {
                cursor.bump();
                if cursor.peek().is_some_and(is_padding) {
                    if !self.options.ignore_invalid_delim {
                        return Err(LexErrorKind::InvalidDelim);
                    }
                    cursor.eat_while(is_padding);
                }
                Ok(())
            }
            Some(c) if is_padding(c) && self.options.ignore_invalid_delim => {
                cursor.eat_while(is_padding);
                Ok(())
            }
            _ => Err(missing),
        }
    }

    fn is_continuation(&self, tag: &Key) -> bool {
        Rc::ptr_eq(tag, &self.cont) || Rc::ptr_eq(tag, &self.conc)
    }

    fn continuation_hack_applies(&self) -> bool {
        self.options.apply_conc_cont_on_new_line_hack
            && self.previous_level.is_some()
            && self
                .previous_tag
                .as_ref()
                .is_some_and(|tag| self.is_continuation(tag))
    }

    fn continue_previous_line(&self, line: &str, line_number: usize) -> LineToken {
        debug!(
            "event=continuation_hack line={} level={:?}",
            line_number, self.previous_level
        );
        LineToken {
            level: self.previous_level.unwrap_or_default(),
            xref: None,
            tag: self.conc.clone(),
            value: LineValue::Data(line.to_string()),
            line: line_number,
        }
    }

    pub fn options(&self) -> &LexOptions {
        &self.options
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    /// The error raised by the last call, `None` when it succeeded.
    pub fn error(&self) -> Option<LexErrorKind> {
        self.error
    }

    pub fn previous_level(&self) -> Option<u8> {
        self.previous_level
    }

    pub fn previous_tag(&self) -> Option<&Key> {
        self.previous_tag.as_ref()
    }

    /// The most recent token this lexer produced.
    pub fn last_token(&self) -> Option<&LineToken> {
        self.last.as_ref()
    }

    pub fn tags(&self) -> &KeyTable {
        &self.tags
    }

    pub fn xrefs(&self) -> &KeyTable {
        &self.xrefs
    }
}

fn empty_value(continuation: bool) -> LineValue {
    // Some producers write empty continuation lines; they stand for a single space.
    if continuation {
        LineValue::Data(" ".to_string())
    } else {
        LineValue::None
    }
}

/// Byte cursor over one line.
struct Cursor<'a> {
    text: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, position: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn rest(&self) -> &'a str {
        &self.text[self.position..]
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.position;
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
        &self.text[start..self.position]
    }

    /// 1-based character column of the cursor.
    fn column(&self) -> usize {
        self.text[..self.position].chars().count() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(line: &str) -> Result<Option<LineToken>, LexError> {
        Lexer::new(LexOptions::strict()).lex_line(line, 1)
    }

    fn lex_ok(line: &str) -> LineToken {
        lex(line)
            .unwrap_or_else(|e| panic!("{line:?} should lex: {e}"))
            .unwrap_or_else(|| panic!("{line:?} should produce a token"))
    }

    fn lex_err(line: &str) -> LexErrorKind {
        match lex(line) {
            Err(error) => error.kind,
            Ok(token) => panic!("{line:?} should fail, got {token:?}"),
        }
    }

    #[test]
    fn test_full_line() {
        let token = lex_ok("0 @I1@ INDI");
        assert_eq!(token.level, 0);
        assert_eq!(token.xref(), Some("I1"));
        assert_eq!(token.tag(), "INDI");
        assert_eq!(token.value, LineValue::None);
    }

    #[test]
    fn test_data_value_keeps_inner_spacing() {
        let token = lex_ok("1 NAME John  /Doe/ ");
        assert_eq!(token.value, LineValue::Data("John  /Doe/ ".to_string()));
    }

    #[test]
    fn test_pointer_value_with_trailing_space() {
        let token = lex_ok("1 FAMS @F12@  ");
        assert_eq!(token.value.pointer(), Some("F12"));
    }

    #[test]
    fn test_pointer_followed_by_text_is_invalid() {
        assert_eq!(lex_err("1 FAMS @F12@ junk"), LexErrorKind::LineValueInvalid);
    }

    #[test]
    fn test_escapes_and_at_signs() {
        let escape = lex_ok("2 DATE @#DJULIAN@ 1 JAN 1700");
        assert_eq!(escape.value.data(), Some("@#DJULIAN@ 1 JAN 1700"));

        let doubled = lex_ok("1 EMAIL john@@example.com");
        assert_eq!(doubled.value.data(), Some("john@example.com"));

        let bare = lex_ok("1 EMAIL john@example.com");
        assert_eq!(bare.value.data(), Some("john@example.com"));

        let leading = lex_ok("1 NOTE @@home");
        assert_eq!(leading.value.data(), Some("@home"));
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(lex_ok("99 NOTE x").level, 99);
        assert_eq!(lex_err("100 NOTE x"), LexErrorKind::LevelInvalid);
    }

    #[test]
    fn test_xref_length_boundaries() {
        let longest = "X".repeat(22);
        let token = lex_ok(&format!("0 @{longest}@ INDI"));
        assert_eq!(token.xref(), Some(longest.as_str()));

        let too_long = "X".repeat(23);
        assert_eq!(
            lex_err(&format!("0 @{too_long}@ INDI")),
            LexErrorKind::XrefIDTooLong
        );
    }

    #[test]
    fn test_double_space_after_level() {
        assert_eq!(lex_err("0  HEAD"), LexErrorKind::InvalidDelim);

        let mut options = LexOptions::strict();
        options.ignore_invalid_delim = true;
        let token = Lexer::new(options)
            .lex_line("0  HEAD", 1)
            .expect("lexes")
            .expect("token");
        assert_eq!(token.tag(), "HEAD");
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(lex_err("HEAD"), LexErrorKind::LevelExpected);
        assert_eq!(lex_err("0HEAD"), LexErrorKind::LevelMissingDelim);
        assert_eq!(lex_err("0 @I1@INDI"), LexErrorKind::XrefIDMissingDelim);
        assert_eq!(lex_err("0 @I1 INDI"), LexErrorKind::XrefIDMissingDelim);
        assert_eq!(lex_err("1 "), LexErrorKind::TagExpected);
        assert_eq!(lex_err("1 NAME\u{7}x"), LexErrorKind::TagMissingDelimOrTerm);
        assert_eq!(lex_err("1 NOTE abc\u{7}"), LexErrorKind::LineValueMissingTerm);
        assert_eq!(lex_err("1 NOTE \u{7}abc"), LexErrorKind::LineValueExpected);
    }

    #[test]
    fn test_error_state_is_exposed_and_cleared() {
        let mut lexer = Lexer::new(LexOptions::strict());
        assert!(lexer.lex_line("0 @I1@INDI", 1).is_err());
        assert_eq!(lexer.error(), Some(LexErrorKind::XrefIDMissingDelim));
        assert_eq!(lexer.state(), LexState::XrefId);

        assert!(lexer.lex_line("0 TRLR", 2).is_ok());
        assert_eq!(lexer.error(), None);
        assert_eq!(lexer.state(), LexState::Level);
    }

    #[test]
    fn test_error_column() {
        let error = lex("0  HEAD").expect_err("double space");
        assert_eq!(error.column, 3);
        assert_eq!(error.line, 1);
    }

    #[test]
    fn test_underscore_and_hyphen_in_tags() {
        assert_eq!(lex_ok("1 _MILT Army").tag(), "_MILT");
        assert_eq!(lex_err("1 MY_TAG x"), LexErrorKind::TagMissingDelimOrTerm);

        let mut options = LexOptions::strict();
        options.allow_hyphen_or_underscore_in_tag = true;
        let mut lexer = Lexer::new(options);
        let token = lexer.lex_line("1 MY_TAG-2 x", 1).expect("lexes").expect("token");
        assert_eq!(token.tag(), "MY_TAG-2");
    }

    #[test]
    fn test_trailer_with_trailing_space() {
        let token = lex_ok("0 TRLR   ");
        assert_eq!(token.tag(), "TRLR");
        assert!(token.value.is_none());
    }

    #[test]
    fn test_empty_continuation_is_a_space() {
        let token = lex_ok("2 CONT ");
        assert_eq!(token.value.data(), Some(" "));

        let bare = lex_ok("2 CONC");
        assert_eq!(bare.value.data(), Some(" "));

        let other = lex_ok("1 BIRT ");
        assert!(other.value.is_none());
    }

    #[test]
    fn test_tabs_need_their_switch() {
        assert_eq!(lex_err("1 NOTE a\tb"), LexErrorKind::LineValueMissingTerm);

        let mut options = LexOptions::strict();
        options.allow_tabs = true;
        let token = Lexer::new(options)
            .lex_line("1 NOTE a\tb", 1)
            .expect("lexes")
            .expect("token");
        assert_eq!(token.value.data(), Some("a\tb"));
    }

    #[test]
    fn test_missing_terms_truncates_value() {
        let mut options = LexOptions::strict();
        options.ignore_missing_terms = true;
        let token = Lexer::new(options)
            .lex_line("1 NOTE abc\u{7}def", 1)
            .expect("lexes")
            .expect("token");
        assert_eq!(token.value.data(), Some("abc"));
    }

    #[test]
    fn test_blank_line_is_skipped() {
        assert_eq!(lex("").expect("blank"), None);
        assert_eq!(lex("   ").expect("blank"), None);
    }

    #[test]
    fn test_continuation_hack() {
        let mut options = LexOptions::strict();
        options.apply_conc_cont_on_new_line_hack = true;
        let mut lexer = Lexer::new(options);

        lexer.lex_line("1 NOTE first", 1).expect("lexes");
        assert_eq!(
            lexer.lex_line("broken line", 2).expect_err("no continuation yet").kind,
            LexErrorKind::LevelExpected
        );

        lexer.lex_line("2 CONT second", 3).expect("lexes");
        let token = lexer
            .lex_line("broken line", 4)
            .expect("hack applies")
            .expect("token");
        assert_eq!(token.level, 2);
        assert_eq!(token.tag(), "CONC");
        assert_eq!(token.value.data(), Some("broken line"));
        assert_eq!(lexer.previous_tag().map(|t| &**t), Some("CONC"));
    }

    #[test]
    fn test_tags_and_xrefs_are_interned() {
        let mut lexer = Lexer::new(LexOptions::strict());
        let first = lexer.lex_line("1 FAMC @F1@", 1).expect("lexes").expect("token");
        let second = lexer.lex_line("1 FAMC @F1@", 2).expect("lexes").expect("token");

        assert!(Rc::ptr_eq(&first.tag, &second.tag));
        match (&first.value, &second.value) {
            (LineValue::Pointer(a), LineValue::Pointer(b)) => assert!(Rc::ptr_eq(a, b)),
            other => panic!("expected pointers, got {other:?}"),
        }
        assert!(lexer.xrefs().contains("F1"));
        assert_eq!(lexer.last_token(), Some(&second));
    }
}
