//! Parent-pointer hierarchy: child index and nested outlines.

mod outline;

pub use outline::{outline, OutlineNode};

use std::collections::HashMap;

use crate::record::Record;

/// Parent key -> children, each bucket sorted ascending by child key.
///
/// Borrows the snapshot it was built from; rebuild it for every render.
#[derive(Debug, Default)]
pub struct ChildIndex<'a> {
    buckets: HashMap<&'a str, Vec<&'a Record>>,
}

impl<'a> ChildIndex<'a> {
    /// Bucket every record under its parent pointer. Parentless records are
    /// roots and appear in no bucket.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut buckets: HashMap<&'a str, Vec<&'a Record>> = HashMap::new();
        for record in records {
            if let Some(parent) = record.parent.as_deref() {
                buckets.entry(parent).or_default().push(record);
            }
        }

        for children in buckets.values_mut() {
            children.sort_by_cached_key(|r| r.key().map(|k| k.into_string()).unwrap_or_default());
        }

        log::debug!("Built child index with {} parent buckets", buckets.len());
        Self { buckets }
    }

    /// Children of `key` in key order; empty when the key has no children.
    pub fn children_of(&self, key: &str) -> &[&'a Record] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Children of `key` whose type is `type_id`, in key order.
    pub fn children_of_type(&self, key: &str, type_id: &str) -> Vec<&'a Record> {
        self.children_of(key)
            .iter()
            .copied()
            .filter(|r| r.is_type(type_id))
            .collect()
    }

    pub fn parent_count(&self) -> usize {
        self.buckets.len()
    }
}
