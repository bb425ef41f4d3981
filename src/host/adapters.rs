//! Built-in host context shapes.

use serde_json::Value as JsonValue;

use super::{normalize, HostAdapter};
use crate::error::{PackvizError, Result};
use crate::record::Record;

fn shape_error(adapter: &str) -> PackvizError {
    PackvizError::InputShape(format!("context does not match {}", adapter))
}

/// `{ "records": [ ... ] }`
pub struct RecordArray;

impl HostAdapter for RecordArray {
    fn name(&self) -> &str {
        "records"
    }

    fn records(&self, ctx: &JsonValue) -> Result<Vec<Record>> {
        ctx.get("records")
            .and_then(JsonValue::as_array)
            .map(|items| normalize(items))
            .ok_or_else(|| shape_error(self.name()))
    }
}

/// `{ "dataset": { "records": [ ... ] } }`
pub struct DatasetRecords;

impl HostAdapter for DatasetRecords {
    fn name(&self) -> &str {
        "dataset.records"
    }

    fn records(&self, ctx: &JsonValue) -> Result<Vec<Record>> {
        ctx.get("dataset")
            .and_then(|d| d.get("records"))
            .and_then(JsonValue::as_array)
            .map(|items| normalize(items))
            .ok_or_else(|| shape_error(self.name()))
    }
}

/// `{ "graph": { "records": { "<key>": { ... } } } }`, values in map order
pub struct GraphRecordMap;

impl HostAdapter for GraphRecordMap {
    fn name(&self) -> &str {
        "graph.records"
    }

    fn records(&self, ctx: &JsonValue) -> Result<Vec<Record>> {
        ctx.get("graph")
            .and_then(|g| g.get("records"))
            .and_then(JsonValue::as_object)
            .map(|map| normalize(map.values()))
            .ok_or_else(|| shape_error(self.name()))
    }
}

/// Caller-supplied accessor; `None` from the closure means "not my shape".
pub struct Accessor<F> {
    name: String,
    accessor: F,
}

impl<F> Accessor<F>
where
    F: Fn(&JsonValue) -> Option<Vec<Record>>,
{
    pub fn new(name: &str, accessor: F) -> Self {
        Self {
            name: name.to_string(),
            accessor,
        }
    }
}

impl<F> HostAdapter for Accessor<F>
where
    F: Fn(&JsonValue) -> Option<Vec<Record>>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn records(&self, ctx: &JsonValue) -> Result<Vec<Record>> {
        (self.accessor)(ctx).ok_or_else(|| shape_error(&self.name))
    }
}
