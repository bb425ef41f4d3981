//! Render-ready view models.
//!
//! Each view turns one snapshot into the data a drawing layer needs. Missing
//! input never errors: it becomes [`ViewResult::Fallback`] with a message the
//! host can show. Only structural violations (cycles, strict duplicate keys)
//! are returned as errors.

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::config::{Config, LayoutConfig, ViewsConfig};
use crate::error::{PackvizError, Result};
use crate::graph::{build_outgoing, RecordIndex};
use crate::hierarchy::{outline, ChildIndex, OutlineNode};
use crate::host::AdapterRegistry;
use crate::layout::{layout, RadialLayout};
use crate::links::{extract_all_links, extract_tokens, wrap_token};
use crate::record::{display_name, FieldValue, Record, UNKNOWN_LABEL};

/// A view or the reason it could not be produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "view", rename_all = "lowercase")]
pub enum ViewResult<T> {
    Rendered(T),
    Fallback(String),
}

impl<T> ViewResult<T> {
    fn fallback(message: &str) -> Self {
        ViewResult::Fallback(message.to_string())
    }

    pub fn rendered(self) -> Option<T> {
        match self {
            ViewResult::Rendered(view) => Some(view),
            ViewResult::Fallback(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ViewResult::Fallback(_))
    }
}

/// One member row of a roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterMember {
    pub key: String,
    pub label: String,
}

impl RosterMember {
    fn of(record: &Record) -> Self {
        Self {
            key: record
                .key()
                .map(|k| k.into_string())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            label: display_name(record),
        }
    }
}

/// Leaders and members of one group record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenRoster {
    pub key: String,
    pub title: String,
    pub leaders: Vec<String>,
    pub members: Vec<RosterMember>,
}

/// Raw outgoing tokens of one record. There is no incoming list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingList {
    pub key: String,
    pub links: Vec<String>,
    /// `links` in marker syntax, as shown in list views.
    pub markers: Vec<String>,
}

impl OutgoingList {
    fn of(focal: &Record) -> Self {
        let links = extract_all_links(focal);
        Self {
            key: focal.key().map(|k| k.into_string()).unwrap_or_default(),
            markers: links.iter().map(|l| wrap_token(l)).collect(),
            links,
        }
    }
}

/// Owns one normalized snapshot and renders views over it.
pub struct ViewRenderer {
    snapshot: std::result::Result<Vec<Record>, String>,
    views: ViewsConfig,
    layout: LayoutConfig,
}

impl ViewRenderer {
    pub fn new(records: Vec<Record>, config: &Config) -> Self {
        Self {
            snapshot: Ok(records),
            views: config.views.clone(),
            layout: config.layout.clone(),
        }
    }

    /// Resolve the snapshot from a host context. An unrecognized context is
    /// kept as a fallback message rather than an error.
    pub fn from_context(ctx: &JsonValue, registry: &AdapterRegistry, config: &Config) -> Result<Self> {
        let snapshot = match registry.resolve(ctx) {
            Ok(records) => Ok(records),
            Err(PackvizError::InputShape(message)) => {
                log::warn!("No records available: {}", message);
                Err(message)
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            snapshot,
            views: config.views.clone(),
            layout: config.layout.clone(),
        })
    }

    /// Snapshot records; empty when the context had no recognizable shape.
    pub fn records(&self) -> &[Record] {
        self.snapshot.as_deref().unwrap_or(&[])
    }

    pub fn find(&self, key: &str) -> Option<&Record> {
        self.records()
            .iter()
            .find(|r| r.key().map_or(false, |k| k.as_str() == key))
    }

    fn available(&self) -> Option<&[Record]> {
        self.snapshot.as_deref().ok()
    }

    fn record_index<'a>(&self, records: &'a [Record]) -> Result<RecordIndex<'a>> {
        if self.views.strict_keys {
            RecordIndex::build_strict(records)
        } else {
            Ok(RecordIndex::build(records))
        }
    }

    fn check_keys(&self, records: &[Record]) -> Result<()> {
        self.record_index(records).map(|_| ())
    }

    /// Outline of the hierarchy under the first root-type record.
    pub fn pack_tree(&self) -> Result<ViewResult<OutlineNode>> {
        let Some(records) = self.available() else {
            return Ok(ViewResult::fallback("couldn't find records on context"));
        };
        let Some(root) = records.iter().find(|r| r.is_type(&self.views.root_type)) else {
            return Ok(ViewResult::Fallback(format!(
                "No {} record found.",
                self.views.root_type
            )));
        };

        self.check_keys(records)?;
        let children = ChildIndex::build(records);
        Ok(ViewResult::Rendered(outline(root, &children)?))
    }

    /// Roster of `current` when it is a group record, else of the first group.
    pub fn den_roster(&self, current: Option<&Record>) -> Result<ViewResult<DenRoster>> {
        let Some(records) = self.available() else {
            return Ok(ViewResult::fallback("couldn't find records on context"));
        };
        let group_type = &self.views.group_type;
        let den = current
            .filter(|r| r.is_type(group_type))
            .or_else(|| records.iter().find(|r| r.is_type(group_type)));
        let Some(den) = den else {
            return Ok(ViewResult::Fallback(format!("No {} record found.", group_type)));
        };

        self.check_keys(records)?;
        let key = den
            .key()
            .map(|k| k.into_string())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());

        let children = ChildIndex::build(records);
        let members: Vec<RosterMember> = children
            .children_of_type(&key, &self.views.member_type)
            .into_iter()
            .map(RosterMember::of)
            .collect();

        Ok(ViewResult::Rendered(DenRoster {
            title: den.text_field("name").unwrap_or("Den roster").to_string(),
            leaders: leaders_of(den, &self.views.leaders_field),
            members,
            key,
        }))
    }

    /// All raw outgoing tokens of `current`, or of the first record.
    pub fn outgoing_list(&self, current: Option<&Record>) -> ViewResult<OutgoingList> {
        let Some(focal) = current.or_else(|| self.records().first()) else {
            return ViewResult::fallback("No record provided.");
        };
        ViewResult::Rendered(OutgoingList::of(focal))
    }

    /// Radial graph of the resolved outgoing references of `current`, or of
    /// the first record.
    pub fn outgoing_graph(&self, current: Option<&Record>) -> Result<ViewResult<RadialLayout>> {
        let records = self.records();
        let Some(focal) = current.or_else(|| records.first()) else {
            return Ok(ViewResult::fallback("No record provided."));
        };

        let index = self.record_index(records)?;
        let links = build_outgoing(focal, &index);
        if links.is_empty() {
            log::debug!("No outgoing record links to visualize");
        }

        let center_key = focal
            .key()
            .map(|k| k.into_string())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
        Ok(ViewResult::Rendered(layout(
            &center_key,
            &display_name(focal),
            &links,
            &self.layout,
        )))
    }
}

/// Tokens from the string entries of a record's leaders field.
fn leaders_of(record: &Record, field: &str) -> Vec<String> {
    match record.fields.get(field) {
        Some(FieldValue::List(items)) => items
            .iter()
            .filter_map(FieldValue::as_text)
            .flat_map(extract_tokens)
            .collect(),
        Some(FieldValue::Text(text)) => extract_tokens(text),
        _ => Vec::new(),
    }
}
