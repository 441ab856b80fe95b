//! Line tokens
//!
//!     A [LineToken] is what the lexer makes of one physical GEDCOM line:
//!
//!         level [@xref@] tag [value]
//!
//!     The value is either a pointer to another record (`@I1@`), free text, or absent.
//!     Tokens are produced one per line, handed to the assembler and dropped; nothing
//!     keeps them around.
//!
//!     Rendering a token with `Display` gives back canonical GEDCOM text for the line, with
//!     a single space as delimiter.

use crate::gedcom::interning::Key;
use serde::Serialize;
use std::fmt;

/// The value part of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LineValue {
    None,
    /// A cross reference, without the surrounding `@`.
    Pointer(Key),
    /// Free text, with `@@` already unescaped to `@`.
    Data(String),
}

/// The classification of a line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineValueKind {
    None,
    Pointer,
    Data,
}

impl LineValue {
    pub fn kind(&self) -> LineValueKind {
        match self {
            LineValue::None => LineValueKind::None,
            LineValue::Pointer(_) => LineValueKind::Pointer,
            LineValue::Data(_) => LineValueKind::Data,
        }
    }

    pub fn pointer(&self) -> Option<&str> {
        match self {
            LineValue::Pointer(xref) => Some(xref),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&str> {
        match self {
            LineValue::Data(text) => Some(text),
            _ => None,
        }
    }

    /// The value as text: data as is, pointers without their `@` markers.
    pub fn text(&self) -> &str {
        match self {
            LineValue::None => "",
            LineValue::Pointer(xref) => xref,
            LineValue::Data(text) => text,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, LineValue::None)
    }
}

/// One lexed GEDCOM line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineToken {
    pub level: u8,
    pub xref: Option<Key>,
    pub tag: Key,
    pub value: LineValue,
    /// 1-based physical line number.
    pub line: usize,
}

impl LineToken {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn xref(&self) -> Option<&str> {
        self.xref.as_deref().filter(|xref| !xref.is_empty())
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        &*self.tag == tag
    }

    /// `CONT` or `CONC`.
    pub fn is_continuation(&self) -> bool {
        self.is_tag("CONT") || self.is_tag("CONC")
    }

    /// Vendor extension tags start with an underscore.
    pub fn is_custom(&self) -> bool {
        self.tag.starts_with('_')
    }

    /// The data value trimmed, or `None` if there is no data or only whitespace.
    pub fn text(&self) -> Option<&str> {
        self.value
            .data()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

impl fmt::Display for LineToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)?;
        if let Some(xref) = self.xref() {
            write!(f, " @{}@", xref)?;
        }
        write!(f, " {}", self.tag)?;
        match &self.value {
            LineValue::None => Ok(()),
            LineValue::Pointer(xref) => write!(f, " @{}@", xref),
            LineValue::Data(text) => write!(f, " {}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn token(level: u8, xref: Option<&str>, tag: &str, value: LineValue) -> LineToken {
        LineToken {
            level,
            xref: xref.map(Rc::from),
            tag: Rc::from(tag),
            value,
            line: 1,
        }
    }

    #[test]
    fn test_render_record_line() {
        let line = token(0, Some("I1"), "INDI", LineValue::None);
        insta::assert_snapshot!(line.to_string(), @"0 @I1@ INDI");
    }

    #[test]
    fn test_render_pointer_line() {
        let line = token(1, None, "FAMC", LineValue::Pointer(Rc::from("F1")));
        insta::assert_snapshot!(line.to_string(), @"1 FAMC @F1@");
    }

    #[test]
    fn test_render_data_line() {
        let line = token(1, None, "NAME", LineValue::Data("John /Doe/".to_string()));
        insta::assert_snapshot!(line.to_string(), @"1 NAME John /Doe/");
    }

    #[test]
    fn test_value_kinds() {
        assert_eq!(LineValue::None.kind(), LineValueKind::None);
        assert_eq!(
            LineValue::Pointer(Rc::from("S1")).kind(),
            LineValueKind::Pointer
        );
        assert_eq!(LineValue::Data("x".into()).kind(), LineValueKind::Data);
    }

    #[test]
    fn test_text_ignores_blank_data() {
        let blank = token(1, None, "NOTE", LineValue::Data("   ".to_string()));
        assert_eq!(blank.text(), None);

        let note = token(1, None, "NOTE", LineValue::Data(" hello ".to_string()));
        assert_eq!(note.text(), Some("hello"));
    }

    #[test]
    fn test_continuation_and_custom_tags() {
        assert!(token(2, None, "CONT", LineValue::None).is_continuation());
        assert!(token(2, None, "CONC", LineValue::None).is_continuation());
        assert!(token(1, None, "_MILT", LineValue::None).is_custom());
        assert!(!token(1, None, "NOTE", LineValue::None).is_custom());
    }
}
