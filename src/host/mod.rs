//! Host context adapters.
//!
//! A host hands over an opaque JSON context. Each adapter recognizes one
//! context shape and turns it into normalized records; the registry tries
//! them in order.

pub mod adapters;
pub mod loader;

pub use adapters::{Accessor, DatasetRecords, GraphRecordMap, RecordArray};
pub use loader::load_context;

use serde_json::Value as JsonValue;

use crate::error::{PackvizError, Result};
use crate::record::Record;

/// Trait for host context adapters
pub trait HostAdapter {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Produce the snapshot's records, or an `InputShape` error when `ctx`
    /// does not have this adapter's shape.
    fn records(&self, ctx: &JsonValue) -> Result<Vec<Record>>;
}

/// Normalize raw JSON entries, skipping anything that is not an object.
pub(crate) fn normalize<'v>(values: impl IntoIterator<Item = &'v JsonValue>) -> Vec<Record> {
    let mut skipped = 0usize;
    let records: Vec<Record> = values
        .into_iter()
        .filter_map(|v| {
            let record = Record::from_json(v);
            if record.is_none() {
                skipped += 1;
            }
            record
        })
        .collect();
    if skipped > 0 {
        log::debug!("Skipped {} non-object entries in host context", skipped);
    }
    records
}

/// Adapter registry that selects the first adapter matching a context
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn HostAdapter>>,
}

impl AdapterRegistry {
    /// Create a new registry with all built-in adapters
    pub fn new() -> Self {
        let mut registry = Self {
            adapters: Vec::new(),
        };

        registry.register(Box::new(RecordArray));
        registry.register(Box::new(DatasetRecords));
        registry.register(Box::new(GraphRecordMap));

        registry
    }

    /// Register an adapter; later registrations are tried last
    pub fn register(&mut self, adapter: Box<dyn HostAdapter>) {
        self.adapters.push(adapter);
    }

    /// Records from the first adapter that recognizes `ctx`
    pub fn resolve(&self, ctx: &JsonValue) -> Result<Vec<Record>> {
        for adapter in &self.adapters {
            match adapter.records(ctx) {
                Ok(records) => {
                    log::debug!(
                        "Adapter {} produced {} records",
                        adapter.name(),
                        records.len()
                    );
                    return Ok(records);
                }
                Err(PackvizError::InputShape(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(PackvizError::InputShape(
            "couldn't find records on context; provide records, dataset.records or graph.records"
                .to_string(),
        ))
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
