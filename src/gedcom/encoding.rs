//! Character sets
//!
//!     GEDCOM files name their character set in the header (`1 CHAR ANSEL`), but the header
//!     can only be read once the bytes have been decoded with some charset. The reader
//!     therefore sniffs the raw bytes first (byte order mark, UTF-16 byte pattern, UTF-8
//!     validity), decodes with that guess, and restarts at most once if the header names a
//!     different charset.
//!
//!     Decoding sits behind the [Transcoder] trait. [DefaultTranscoder] uses `encoding_rs`
//!     and reads the single byte GEDCOM charsets (ANSEL, ANSI, ASCII) through the
//!     windows-1252 table; callers that need a real ANSEL table plug in their own.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use log::debug;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// The character sets a GEDCOM header can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Charset {
    Ansel,
    Ansi,
    Ascii,
    Utf8,
    /// UTF-16, little endian.
    Unicode,
    UnicodeBigEndian,
}

impl Charset {
    /// Read a `CHAR` value. Unknown names give `None`.
    pub fn from_declared(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "ANSEL" => Some(Charset::Ansel),
            "ANSI" | "IBMPC" | "IBM WINDOWS" | "WINDOWS" | "CP1252" | "WINDOWS-1252" | "LATIN1"
            | "ISO-8859-1" => Some(Charset::Ansi),
            "ASCII" | "US-ASCII" => Some(Charset::Ascii),
            "UTF-8" | "UTF8" => Some(Charset::Utf8),
            "UNICODE" | "UTF-16" | "UTF16" | "UTF-16LE" => Some(Charset::Unicode),
            "UTF-16BE" => Some(Charset::UnicodeBigEndian),
            _ => None,
        }
    }

    /// Two bytes per unit.
    pub fn is_wide(self) -> bool {
        matches!(self, Charset::Unicode | Charset::UnicodeBigEndian)
    }

    fn encoding(self) -> &'static Encoding {
        match self {
            Charset::Ansel | Charset::Ansi | Charset::Ascii => WINDOWS_1252,
            Charset::Utf8 => UTF_8,
            Charset::Unicode => UTF_16LE,
            Charset::UnicodeBigEndian => UTF_16BE,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Charset::Ansel => "ANSEL",
            Charset::Ansi => "ANSI",
            Charset::Ascii => "ASCII",
            Charset::Utf8 => "UTF-8",
            Charset::Unicode => "UNICODE",
            Charset::UnicodeBigEndian => "UTF-16BE",
        };
        f.write_str(name)
    }
}

/// What sniffing the raw bytes found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sniffed {
    pub charset: Charset,
    /// Length of the byte order mark, 0 when there is none.
    pub bom: usize,
}

/// Turns raw file bytes into text.
pub trait Transcoder {
    fn sniff(&self, bytes: &[u8]) -> Sniffed;

    /// Decode `bytes`, byte order mark already removed.
    fn decode<'b>(&self, bytes: &'b [u8], charset: Charset) -> Cow<'b, str>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranscoder;

impl Transcoder for DefaultTranscoder {
    fn sniff(&self, bytes: &[u8]) -> Sniffed {
        let (charset, bom) = match bytes {
            [0xEF, 0xBB, 0xBF, ..] => (Charset::Utf8, 3),
            [0xFF, 0xFE, ..] => (Charset::Unicode, 2),
            [0xFE, 0xFF, ..] => (Charset::UnicodeBigEndian, 2),
            // A GEDCOM file starts with the digit 0.
            [b'0', 0x00, ..] => (Charset::Unicode, 0),
            [0x00, b'0', ..] => (Charset::UnicodeBigEndian, 0),
            _ if bytes.is_ascii() => (Charset::Ascii, 0),
            _ if std::str::from_utf8(bytes).is_ok() => (Charset::Utf8, 0),
            _ => (Charset::Ansi, 0),
        };
        debug!("event=charset_sniffed charset={} bom={}", charset, bom);
        Sniffed { charset, bom }
    }

    fn decode<'b>(&self, bytes: &'b [u8], charset: Charset) -> Cow<'b, str> {
        let (text, had_errors) = charset
            .encoding()
            .decode_without_bom_handling(bytes);
        if had_errors {
            debug!("event=decode_replacements charset={}", charset);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_byte_order_marks() {
        let transcoder = DefaultTranscoder;
        assert_eq!(
            transcoder.sniff(&[0xEF, 0xBB, 0xBF, b'0']),
            Sniffed {
                charset: Charset::Utf8,
                bom: 3
            }
        );
        assert_eq!(transcoder.sniff(&[0xFF, 0xFE, b'0', 0]).charset, Charset::Unicode);
        assert_eq!(
            transcoder.sniff(&[0xFE, 0xFF, 0, b'0']).charset,
            Charset::UnicodeBigEndian
        );
    }

    #[test]
    fn test_sniff_without_bom() {
        let transcoder = DefaultTranscoder;
        assert_eq!(transcoder.sniff(b"0 HEAD\n").charset, Charset::Ascii);
        assert_eq!(transcoder.sniff("0 HEAD é".as_bytes()).charset, Charset::Utf8);
        assert_eq!(transcoder.sniff(b"0 HEAD \xE9").charset, Charset::Ansi);
        assert_eq!(transcoder.sniff(b"0\x00 \x00").charset, Charset::Unicode);
    }

    #[test]
    fn test_decode_single_byte_and_wide() {
        let transcoder = DefaultTranscoder;
        assert_eq!(transcoder.decode(b"Jos\xE9", Charset::Ansi), "José");
        let wide: Vec<u8> = "0 HEAD".encode_utf16().flat_map(u16::to_le_bytes).collect();
        assert_eq!(transcoder.decode(&wide, Charset::Unicode), "0 HEAD");
    }

    #[test]
    fn test_declared_names() {
        assert_eq!(Charset::from_declared("ansel"), Some(Charset::Ansel));
        assert_eq!(Charset::from_declared(" UTF-8 "), Some(Charset::Utf8));
        assert_eq!(Charset::from_declared("IBMPC"), Some(Charset::Ansi));
        assert_eq!(Charset::from_declared("EBCDIC"), None);
    }
}
