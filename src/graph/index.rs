//! Key -> record lookup over one snapshot.

use std::collections::HashMap;

use crate::error::{PackvizError, Result};
use crate::record::{Record, RecordKey};

/// O(1) key lookup. The first record seen for a key wins.
#[derive(Debug, Default)]
pub struct RecordIndex<'a> {
    by_key: HashMap<RecordKey, &'a Record>,
    duplicates: Vec<RecordKey>,
}

impl<'a> RecordIndex<'a> {
    /// Index every keyed record. Duplicate keys are logged and remembered;
    /// keyless records are skipped.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut index = Self::default();
        for record in records {
            let Some(key) = record.key() else {
                log::debug!("Skipping record without a key: {:?}", record.type_id);
                continue;
            };
            if index.by_key.contains_key(&key) {
                log::warn!("Duplicate record key {}; keeping the first record", key);
                index.duplicates.push(key);
                continue;
            }
            index.by_key.insert(key, record);
        }
        index
    }

    /// Like [`RecordIndex::build`] but a duplicate key is an error.
    pub fn build_strict<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let index = Self::build(records);
        match index.duplicates.first() {
            Some(key) => Err(PackvizError::DuplicateKey(key.to_string())),
            None => Ok(index),
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Record> {
        self.by_key.get(key).copied()
    }

    /// Keys that were seen more than once, in encounter order.
    pub fn duplicates(&self) -> &[RecordKey] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
