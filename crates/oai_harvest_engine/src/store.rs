use chrono::NaiveDate;
use oai_harvest_core::{CanonicalRecord, PutOutcome};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),
    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),
    #[error("table error: {0}")]
    Table(#[from] redb::TableError),
    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),
    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),
    #[error("record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("revision index entry for {identity} holds an invalid day count {days}")]
    CorruptIndex { identity: String, days: i32 },
}

/// Identity-keyed record store with last-wins-by-revision upserts.
///
/// Implementations keep a revision index next to the records so `put` can
/// compare without decoding the stored record; both change together.
pub trait RecordStore {
    /// Inserts when absent, replaces when the stored revision is strictly older,
    /// otherwise leaves the store untouched.
    fn put(&mut self, record: &CanonicalRecord) -> Result<PutOutcome, StoreError>;

    fn get(&self, identity: &str) -> Result<Option<CanonicalRecord>, StoreError>;

    /// Revision from the index only.
    fn revision(&self, identity: &str) -> Result<Option<NaiveDate>, StoreError>;

    fn len(&self) -> Result<usize, StoreError>;

    fn contains(&self, identity: &str) -> Result<bool, StoreError> {
        Ok(self.revision(identity)?.is_some())
    }

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

pub(crate) fn decide(stored: Option<NaiveDate>, incoming: NaiveDate) -> PutOutcome {
    match stored {
        None => PutOutcome::Inserted,
        Some(stored) if stored < incoming => PutOutcome::Replaced,
        Some(_) => PutOutcome::Skipped,
    }
}
