//! Lexer switches
//!
//!     Each field relaxes one rule of the GEDCOM line grammar. The names follow the
//!     configuration keys in `defaults/gedcom.default.toml`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexOptions {
    /// Accept runs of spaces where a single delimiter is required.
    pub ignore_invalid_delim: bool,
    /// Accept a tag or value that runs straight into an unexpected character.
    pub ignore_missing_terms: bool,
    /// Accept `-` and non-leading `_` inside tags.
    pub allow_hyphen_or_underscore_in_tag: bool,
    /// Accept horizontal tabs in values.
    pub allow_tabs: bool,
    /// Accept vertical (line) tabs in values.
    pub allow_line_tabs: bool,
    /// Accept U+001F (Information Separator One) in values.
    pub allow_information_separator_one: bool,
    /// Treat a line without a level that follows `CONT`/`CONC` as a further `CONC`.
    pub apply_conc_cont_on_new_line_hack: bool,
}

impl LexOptions {
    /// The grammar as written: every relaxation off.
    pub fn strict() -> Self {
        Self {
            ignore_invalid_delim: false,
            ignore_missing_terms: false,
            allow_hyphen_or_underscore_in_tag: false,
            allow_tabs: false,
            allow_line_tabs: false,
            allow_information_separator_one: false,
            apply_conc_cont_on_new_line_hack: false,
        }
    }

    /// Every relaxation on.
    pub fn lenient() -> Self {
        Self {
            ignore_invalid_delim: true,
            ignore_missing_terms: true,
            allow_hyphen_or_underscore_in_tag: true,
            allow_tabs: true,
            allow_line_tabs: true,
            allow_information_separator_one: true,
            apply_conc_cont_on_new_line_hack: true,
        }
    }
}

impl Default for LexOptions {
    fn default() -> Self {
        Self::lenient()
    }
}
