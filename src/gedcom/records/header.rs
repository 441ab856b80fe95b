//! The file header

use super::common::{Address, CustomTag};
use super::date::DateValue;
use super::note::Note;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Header {
    pub source: HeaderSource,
    pub destination: Option<String>,
    pub date: Option<DateValue>,
    pub submitter: Option<String>,
    pub submission: Option<String>,
    pub file_name: Option<String>,
    pub copyright: Option<String>,
    pub gedcom_version: Option<String>,
    pub gedcom_form: Option<String>,
    pub charset: Option<String>,
    pub charset_version: Option<String>,
    pub language: Option<String>,
    pub place_form: Option<String>,
    pub notes: Vec<Note>,
    /// The header's first `NOTE`, moved here after the parse.
    pub content_description: Option<Note>,
    pub custom: Vec<CustomTag>,
}

/// `SOUR` under the header: the application that wrote the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeaderSource {
    pub system_id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub corporation: Option<String>,
    pub corporation_address: Option<Address>,
    pub data_name: Option<String>,
    pub data_date: Option<String>,
    pub data_copyright: Option<String>,
}
