//! Normalized record model.
//!
//! Host data arrives as loosely-typed JSON. Identity aliases are resolved once
//! here so the indexers and extractors only ever see one shape.

mod key;

pub use key::{display_name, is_reference_token, key_of, RecordKey, UNKNOWN_LABEL};

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Keys accepted for the parent pointer, in priority order.
const PARENT_ALIASES: [&str; 3] = ["parent", "parentKey", "parentRecordKey"];

/// Non-container leaf inside `fields`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Bool(bool),
    Null,
}

/// A value inside a record's `fields` mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
    Scalar(Scalar),
}

impl FieldValue {
    /// Depth-first fold over every string reachable from this value.
    pub fn fold_text<A>(&self, acc: A, f: &mut impl FnMut(A, &str) -> A) -> A {
        match self {
            FieldValue::Text(s) => f(acc, s),
            FieldValue::List(items) => items.iter().fold(acc, |acc, v| v.fold_text(acc, f)),
            FieldValue::Map(map) => map.values().fold(acc, |acc, v| v.fold_text(acc, f)),
            FieldValue::Scalar(_) => acc,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&JsonValue> for FieldValue {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::String(s) => FieldValue::Text(s.clone()),
            JsonValue::Array(items) => FieldValue::List(items.iter().map(FieldValue::from).collect()),
            JsonValue::Object(map) => FieldValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), FieldValue::from(v)))
                    .collect(),
            ),
            JsonValue::Number(n) => FieldValue::Scalar(Scalar::Number(n.as_f64().unwrap_or(0.0))),
            JsonValue::Bool(b) => FieldValue::Scalar(Scalar::Bool(*b)),
            JsonValue::Null => FieldValue::Scalar(Scalar::Null),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// One record of a snapshot, immutable for the duration of a render.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub type_id: Option<String>,
    pub record_id: Option<String>,
    /// Explicit key override; wins over `type_id:record_id`.
    pub record_key: Option<String>,
    /// Key of the owning record.
    pub parent: Option<String>,
    pub body: Option<String>,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(type_id: &str, record_id: &str) -> Self {
        Self {
            type_id: Some(type_id.to_string()),
            record_id: Some(record_id.to_string()),
            ..Self::default()
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.record_key = Some(key.to_string());
        self
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn with_field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Normalize a host JSON value into a record.
    ///
    /// Returns `None` when the value is not an object. Empty strings count as
    /// absent. Numeric and boolean identity fields are kept in their string
    /// form; objects, arrays and null are ignored.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        let obj = value.as_object()?;
        let text = |name: &str| obj.get(name).and_then(identity_text);

        let fields = match obj.get("fields") {
            Some(JsonValue::Object(map)) => map
                .iter()
                .map(|(k, v)| (k.clone(), FieldValue::from(v)))
                .collect(),
            _ => BTreeMap::new(),
        };

        Some(Self {
            type_id: text("typeId"),
            record_id: text("recordId"),
            record_key: text("recordKey"),
            parent: PARENT_ALIASES.iter().find_map(|alias| text(alias)),
            body: obj
                .get("body")
                .and_then(JsonValue::as_str)
                .map(str::to_string),
            fields,
        })
    }

    /// Canonical key, see [`key_of`].
    pub fn key(&self) -> Option<RecordKey> {
        key_of(self)
    }

    pub fn is_type(&self, type_id: &str) -> bool {
        self.type_id.as_deref() == Some(type_id)
    }

    /// Non-empty string field by name.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(FieldValue::as_text)
            .filter(|s| !s.is_empty())
    }
}

/// String form of a scalar identity value, e.g. `recordId: 1` in YAML.
fn identity_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_basic() {
        let value = json!({
            "typeId": "scout",
            "recordId": "7",
            "parent": "den:1",
            "body": "hello",
            "fields": {"name": "Sam", "age": 9}
        });
        let record = Record::from_json(&value).unwrap();
        assert_eq!(record.type_id.as_deref(), Some("scout"));
        assert_eq!(record.record_id.as_deref(), Some("7"));
        assert_eq!(record.parent.as_deref(), Some("den:1"));
        assert_eq!(record.body.as_deref(), Some("hello"));
        assert_eq!(record.text_field("name"), Some("Sam"));
        assert_eq!(
            record.fields.get("age"),
            Some(&FieldValue::Scalar(Scalar::Number(9.0)))
        );
    }

    #[test]
    fn test_from_json_parent_aliases() {
        let a = Record::from_json(&json!({"parentKey": "pack:1"})).unwrap();
        assert_eq!(a.parent.as_deref(), Some("pack:1"));

        let b = Record::from_json(&json!({"parentRecordKey": "den:2"})).unwrap();
        assert_eq!(b.parent.as_deref(), Some("den:2"));

        // `parent` wins over the aliases
        let c = Record::from_json(&json!({"parent": "x:1", "parentKey": "y:1"})).unwrap();
        assert_eq!(c.parent.as_deref(), Some("x:1"));

        // empty parent falls through to the next alias
        let d = Record::from_json(&json!({"parent": "", "parentKey": "y:1"})).unwrap();
        assert_eq!(d.parent.as_deref(), Some("y:1"));
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(Record::from_json(&json!("scout:1")).is_none());
        assert!(Record::from_json(&json!([1, 2])).is_none());
        assert!(Record::from_json(&json!(null)).is_none());
    }

    #[test]
    fn test_from_json_numeric_identity_keeps_key() {
        let record = Record::from_json(&json!({"typeId": "pack", "recordId": 1})).unwrap();
        assert_eq!(record.record_id.as_deref(), Some("1"));
        assert_eq!(record.key().unwrap().as_str(), "pack:1");

        let flagged = Record::from_json(&json!({"typeId": "den", "recordId": true, "parentKey": 7})).unwrap();
        assert_eq!(flagged.key().unwrap().as_str(), "den:true");
        assert_eq!(flagged.parent.as_deref(), Some("7"));
    }

    #[test]
    fn test_from_json_ignores_container_identity() {
        let record = Record::from_json(&json!({
            "typeId": {"name": "pack"},
            "recordId": [1],
            "recordKey": null,
            "fields": "nope"
        }))
        .unwrap();
        assert!(record.type_id.is_none());
        assert!(record.record_id.is_none());
        assert!(record.fields.is_empty());
        assert!(record.key().is_none());
    }

    #[test]
    fn test_fold_text_walks_nested_values() {
        let value = FieldValue::from(&json!({
            "a": "one",
            "b": ["two", {"c": "three"}, 4, true, null],
            "d": [[["four"]]]
        }));
        let collected = value.fold_text(Vec::new(), &mut |mut acc, s| {
            acc.push(s.to_string());
            acc
        });
        assert_eq!(collected, vec!["one", "two", "three", "four"]);
    }
}
