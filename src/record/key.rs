//! Record keys, reference-token validation and display names.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

use super::Record;

/// Label used when a record has neither a name nor a key.
pub const UNKNOWN_LABEL: &str = "(unknown)";

/// Name fields consulted for display labels, in priority order.
const NAME_FIELDS: [&str; 3] = ["name", "title", "fullName"];

lazy_static! {
    static ref RECORD_REF_RE: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*:[A-Za-z0-9][A-Za-z0-9_-]*$")
            .expect("Invalid regex pattern");
}

/// Canonical identifier of a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RecordKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Explicit `record_key`, else `type_id:record_id`.
///
/// `None` means the record cannot be displayed or indexed.
pub fn key_of(record: &Record) -> Option<RecordKey> {
    if let Some(key) = &record.record_key {
        return Some(RecordKey(key.clone()));
    }
    match (&record.type_id, &record.record_id) {
        (Some(type_id), Some(record_id)) => Some(RecordKey(format!("{}:{}", type_id, record_id))),
        _ => None,
    }
}

/// True when `token` is shaped like a `type:id` key.
pub fn is_reference_token(token: &str) -> bool {
    RECORD_REF_RE.is_match(token)
}

/// Human label: `name`, `title` or `fullName` field, else the key.
pub fn display_name(record: &Record) -> String {
    NAME_FIELDS
        .iter()
        .find_map(|field| record.text_field(field))
        .map(str::to_string)
        .or_else(|| key_of(record).map(RecordKey::into_string))
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}
