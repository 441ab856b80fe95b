//! Line terminator detection

use serde::{Deserialize, Serialize};

/// How many characters are inspected when looking for the first terminator.
const DETECTION_WINDOW: usize = 512;

/// The line terminator a file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Newline {
    #[default]
    Lf,
    Cr,
    CrLf,
    LfCr,
}

impl Newline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::Cr => "\r",
            Newline::CrLf => "\r\n",
            Newline::LfCr => "\n\r",
        }
    }

    /// Detect the terminator from the first CR or LF in the first 512 characters.
    ///
    /// Falls back to LF when none is found.
    pub fn detect(text: &str) -> Self {
        let mut chars = text.chars().take(DETECTION_WINDOW).peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    return if chars.peek() == Some(&'\n') {
                        Newline::CrLf
                    } else {
                        Newline::Cr
                    }
                }
                '\n' => {
                    return if chars.peek() == Some(&'\r') {
                        Newline::LfCr
                    } else {
                        Newline::Lf
                    }
                }
                _ => {}
            }
        }
        Newline::Lf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_each_terminator() {
        assert_eq!(Newline::detect("0 HEAD\n1 CHAR"), Newline::Lf);
        assert_eq!(Newline::detect("0 HEAD\r1 CHAR"), Newline::Cr);
        assert_eq!(Newline::detect("0 HEAD\r\n1 CHAR"), Newline::CrLf);
        assert_eq!(Newline::detect("0 HEAD\n\r1 CHAR"), Newline::LfCr);
    }

    #[test]
    fn test_detect_defaults_to_lf() {
        assert_eq!(Newline::detect("0 TRLR"), Newline::Lf);
        assert_eq!(Newline::detect(""), Newline::Lf);
    }

    #[test]
    fn test_detect_only_looks_at_window() {
        let mut text = "x".repeat(600);
        text.push_str("\r\n");
        assert_eq!(Newline::detect(&text), Newline::Lf);
    }
}
