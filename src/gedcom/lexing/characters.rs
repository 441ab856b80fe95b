//! Character classes of the line grammar

use super::options::LexOptions;

const TAB: char = '\t';
const LINE_TAB: char = '\u{000B}';
const INFORMATION_SEPARATOR_ONE: char = '\u{001F}';

/// Characters allowed in a tag at `position` (0 for the first character).
///
/// A leading underscore marks a vendor extension and is always allowed.
pub fn is_tag_char(c: char, position: usize, options: &LexOptions) -> bool {
    if c.is_ascii_alphanumeric() {
        return true;
    }
    match c {
        '_' if position == 0 => true,
        '_' | '-' => options.allow_hyphen_or_underscore_in_tag,
        _ => false,
    }
}

/// Characters allowed in a data value, `@` excluded (it is handled by the lexer).
pub fn is_value_char(c: char, options: &LexOptions) -> bool {
    match c {
        ' '..='?' | 'A'..='~' => true,
        TAB => options.allow_tabs,
        LINE_TAB => options.allow_line_tabs,
        INFORMATION_SEPARATOR_ONE => options.allow_information_separator_one,
        c => c >= '\u{0080}',
    }
}

/// Whitespace between tokens. GEDCOM only knows the space, but tabs show up as padding.
pub fn is_padding(c: char) -> bool {
    c == ' ' || c == TAB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_chars() {
        let strict = LexOptions::strict();
        assert!(is_tag_char('N', 0, &strict));
        assert!(is_tag_char('9', 3, &strict));
        assert!(is_tag_char('_', 0, &strict));
        assert!(!is_tag_char('_', 2, &strict));
        assert!(!is_tag_char('-', 1, &strict));

        let lenient = LexOptions::lenient();
        assert!(is_tag_char('_', 2, &lenient));
        assert!(is_tag_char('-', 1, &lenient));
        assert!(!is_tag_char(' ', 1, &lenient));
    }

    #[test]
    fn test_value_chars() {
        let strict = LexOptions::strict();
        assert!(is_value_char('a', &strict));
        assert!(is_value_char('/', &strict));
        assert!(is_value_char('~', &strict));
        assert!(is_value_char('é', &strict));
        assert!(!is_value_char('@', &strict));
        assert!(!is_value_char('\t', &strict));
        assert!(!is_value_char('\u{001F}', &strict));
        assert!(!is_value_char('\u{0007}', &strict));

        let lenient = LexOptions::lenient();
        assert!(is_value_char('\t', &lenient));
        assert!(is_value_char('\u{000B}', &lenient));
        assert!(is_value_char('\u{001F}', &lenient));
        assert!(!is_value_char('\u{0007}', &lenient));
    }
}
