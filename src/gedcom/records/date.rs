//! Date values
//!
//!     Dates are kept as written. Parsing only pulls out the calendar escape and the
//!     qualifier keyword so callers can tell `ABT 1850` from `BEF 1850` without a date
//!     library; the remainder stays text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:@#D(GREGORIAN|JULIAN|HEBREW|FRENCH R|ROMAN|UNKNOWN)@\s*)?(?:(ABT|CAL|EST|BEF|AFT|BET|FROM|TO|INT)\b\s*)?(.*)$",
    )
    .expect("date pattern is valid")
});

static RANGE_SECOND_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s(AND|TO)\s").expect("range pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Calendar {
    #[default]
    Gregorian,
    Julian,
    Hebrew,
    French,
    Roman,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateQualifier {
    About,
    Calculated,
    Estimated,
    Before,
    After,
    /// `BET .. AND ..`
    Between,
    /// `FROM ..`, with or without a closing `TO ..`
    From,
    /// `FROM .. TO ..`
    Period,
    To,
    Interpreted,
}

/// A `DATE` structure with its optional `TIME`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DateValue {
    /// The value exactly as it appeared in the file.
    pub text: String,
    pub calendar: Calendar,
    pub qualifier: Option<DateQualifier>,
    /// What is left once the calendar escape and qualifier are removed.
    pub date: String,
    pub time: Option<String>,
}

impl DateValue {
    pub fn parse(text: &str) -> Self {
        let mut value = DateValue {
            text: text.to_string(),
            date: text.trim().to_string(),
            ..Self::default()
        };
        let Some(captures) = DATE_PATTERN.captures(text) else {
            return value;
        };

        if let Some(calendar) = captures.get(1) {
            value.calendar = match calendar.as_str().to_ascii_uppercase().as_str() {
                "JULIAN" => Calendar::Julian,
                "HEBREW" => Calendar::Hebrew,
                "FRENCH R" => Calendar::French,
                "ROMAN" => Calendar::Roman,
                "UNKNOWN" => Calendar::Unknown,
                _ => Calendar::Gregorian,
            };
        }
        let rest = captures.get(3).map_or("", |m| m.as_str()).trim();
        value.qualifier = captures.get(2).map(|keyword| {
            match keyword.as_str().to_ascii_uppercase().as_str() {
                "ABT" => DateQualifier::About,
                "CAL" => DateQualifier::Calculated,
                "EST" => DateQualifier::Estimated,
                "BEF" => DateQualifier::Before,
                "AFT" => DateQualifier::After,
                "BET" => DateQualifier::Between,
                "FROM" if RANGE_SECOND_PART.is_match(rest) => DateQualifier::Period,
                "FROM" => DateQualifier::From,
                "TO" => DateQualifier::To,
                _ => DateQualifier::Interpreted,
            }
        });
        value.date = rest.to_string();
        value
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_date() {
        let date = DateValue::parse("1 JAN 1900");
        assert_eq!(date.calendar, Calendar::Gregorian);
        assert_eq!(date.qualifier, None);
        assert_eq!(date.date, "1 JAN 1900");
    }

    #[test]
    fn test_calendar_and_qualifier() {
        let date = DateValue::parse("@#DJULIAN@ ABT 1700");
        assert_eq!(date.calendar, Calendar::Julian);
        assert_eq!(date.qualifier, Some(DateQualifier::About));
        assert_eq!(date.date, "1700");
        assert_eq!(date.text, "@#DJULIAN@ ABT 1700");
    }

    #[test]
    fn test_ranges() {
        assert_eq!(
            DateValue::parse("BET 1850 AND 1860").qualifier,
            Some(DateQualifier::Between)
        );
        assert_eq!(
            DateValue::parse("FROM 1900 TO 1910").qualifier,
            Some(DateQualifier::Period)
        );
        assert_eq!(
            DateValue::parse("FROM 1900").qualifier,
            Some(DateQualifier::From)
        );
    }

    #[test]
    fn test_french_calendar_has_a_space() {
        let date = DateValue::parse("@#DFRENCH R@ 1 VEND 11");
        assert_eq!(date.calendar, Calendar::French);
        assert_eq!(date.date, "1 VEND 11");
    }

    #[test]
    fn test_interpreted_keeps_phrase() {
        let date = DateValue::parse("INT 1900 (about nineteen hundred)");
        assert_eq!(date.qualifier, Some(DateQualifier::Interpreted));
        assert_eq!(date.date, "1900 (about nineteen hundred)");
    }
}
