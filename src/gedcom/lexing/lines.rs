//! Physical line splitting
//!
//!     Splits decoded text into physical lines. The detected terminator is consumed as a
//!     unit; any other lone CR or LF also ends a line, so a file that mixes terminators
//!     still splits sensibly. Empty lines are yielded too (the lexer skips them) so that
//!     line numbers stay true to the file.

use super::newline::Newline;

/// A physical line and where it sits in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// The line without its terminator.
    pub text: &'a str,
    /// Byte offset just past the line's terminator.
    pub end: usize,
}

/// Iterator over the physical lines of a text.
pub struct PhysicalLines<'a> {
    source: &'a str,
    newline: Newline,
    position: usize,
    number: usize,
}

impl<'a> PhysicalLines<'a> {
    pub fn new(source: &'a str, newline: Newline) -> Self {
        Self {
            source,
            newline,
            position: 0,
            number: 0,
        }
    }
}

impl<'a> Iterator for PhysicalLines<'a> {
    type Item = PhysicalLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.source.len() {
            return None;
        }
        let rest = &self.source[self.position..];
        self.number += 1;

        let (text, consumed) = match rest.find(['\r', '\n']) {
            Some(index) => {
                let terminator = &rest[index..];
                let width = if terminator.starts_with(self.newline.as_str()) {
                    self.newline.as_str().len()
                } else {
                    1
                };
                (&rest[..index], index + width)
            }
            None => (rest, rest.len()),
        };

        self.position += consumed;
        Some(PhysicalLine {
            number: self.number,
            text,
            end: self.position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str, newline: Newline) -> Vec<&str> {
        PhysicalLines::new(source, newline)
            .map(|line| line.text)
            .collect()
    }

    #[test]
    fn test_split_crlf() {
        assert_eq!(
            texts("0 HEAD\r\n1 CHAR UTF-8\r\n0 TRLR\r\n", Newline::CrLf),
            vec!["0 HEAD", "1 CHAR UTF-8", "0 TRLR"]
        );
    }

    #[test]
    fn test_split_without_final_terminator() {
        assert_eq!(
            texts("0 HEAD\n0 TRLR", Newline::Lf),
            vec!["0 HEAD", "0 TRLR"]
        );
    }

    #[test]
    fn test_stray_terminators_still_split() {
        // An LF file with one CR-only line break in the middle.
        assert_eq!(
            texts("0 HEAD\n1 NOTE a\r2 CONT b\n", Newline::Lf),
            vec!["0 HEAD", "1 NOTE a", "2 CONT b"]
        );
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let lines: Vec<_> = PhysicalLines::new("0 HEAD\n\n0 TRLR\n", Newline::Lf).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].number, 3);
        assert_eq!(lines[2].text, "0 TRLR");
        assert_eq!(lines[2].end, 15);
    }
}
