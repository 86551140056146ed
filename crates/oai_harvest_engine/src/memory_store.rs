use std::collections::BTreeMap;

use chrono::NaiveDate;
use oai_harvest_core::{CanonicalRecord, PutOutcome};

use crate::store::{decide, RecordStore, StoreError};

/// Non-durable store with the same upsert policy as the redb store.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecordStore {
    records: BTreeMap<String, CanonicalRecord>,
    revisions: BTreeMap<String, NaiveDate>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> impl Iterator<Item = &CanonicalRecord> {
        self.records.values()
    }
}

impl RecordStore for MemoryRecordStore {
    fn put(&mut self, record: &CanonicalRecord) -> Result<PutOutcome, StoreError> {
        let outcome = decide(
            self.revisions.get(&record.identity).copied(),
            record.revision,
        );
        if outcome != PutOutcome::Skipped {
            self.records
                .insert(record.identity.clone(), record.clone());
            self.revisions
                .insert(record.identity.clone(), record.revision);
        }
        Ok(outcome)
    }

    fn get(&self, identity: &str) -> Result<Option<CanonicalRecord>, StoreError> {
        Ok(self.records.get(identity).cloned())
    }

    fn revision(&self, identity: &str) -> Result<Option<NaiveDate>, StoreError> {
        Ok(self.revisions.get(identity).copied())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.revisions.len())
    }
}
