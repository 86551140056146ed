use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use oai_harvest_core::{revision_from_days, CanonicalRecord, PutOutcome};
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};

use crate::store::{decide, RecordStore, StoreError};

/// Full records, JSON encoded.
const RECORDS: TableDefinition<&str, &[u8]> = TableDefinition::new("records");
/// Revision index: identity to days since the common era.
const REVISIONS: TableDefinition<&str, i32> = TableDefinition::new("revisions");

/// Durable store: one redb file holding the record table and the revision index.
///
/// Each `put` is a single write transaction over both tables, so readers see
/// either the old record and revision or the new pair, never a mix.
pub struct RedbRecordStore {
    db: Database,
    path: PathBuf,
}

impl RedbRecordStore {
    /// Opens the database at `path`, creating the file and both tables if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let db = Database::create(&path)?;

        let write_txn = db.begin_write()?;
        {
            let _records = write_txn.open_table(RECORDS)?;
            let _revisions = write_txn.open_table(REVISIONS)?;
        }
        write_txn.commit()?;

        Ok(Self { db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Walks the record table and checks each entry has a matching index entry.
    /// Returns the number of records checked.
    pub fn verify_index(&self) -> Result<usize, StoreError> {
        let read_txn = self.db.begin_read()?;
        let records = read_txn.open_table(RECORDS)?;
        let revisions = read_txn.open_table(REVISIONS)?;

        let mut checked = 0;
        for row in records.iter()? {
            let (key, value) = row?;
            let identity = key.value();
            let record: CanonicalRecord = serde_json::from_slice(value.value())?;
            let indexed = revisions.get(identity)?.map(|days| days.value());
            if indexed != Some(record.revision_days()) {
                return Err(StoreError::CorruptIndex {
                    identity: identity.to_string(),
                    days: indexed.unwrap_or_default(),
                });
            }
            checked += 1;
        }

        if revisions.len()? as usize != checked {
            return Err(StoreError::CorruptIndex {
                identity: "<index has entries without records>".to_string(),
                days: 0,
            });
        }
        Ok(checked)
    }
}

impl RecordStore for RedbRecordStore {
    fn put(&mut self, record: &CanonicalRecord) -> Result<PutOutcome, StoreError> {
        let identity = record.identity.as_str();
        let incoming = record.revision_days();

        let write_txn = self.db.begin_write()?;
        let outcome = {
            let mut revisions = write_txn.open_table(REVISIONS)?;
            let stored = match revisions.get(identity)?.map(|days| days.value()) {
                Some(days) => Some(to_date(identity, days)?),
                None => None,
            };
            let outcome = decide(stored, record.revision);

            if outcome != PutOutcome::Skipped {
                let encoded = serde_json::to_vec(record)?;
                let mut records = write_txn.open_table(RECORDS)?;
                records.insert(identity, encoded.as_slice())?;
                revisions.insert(identity, incoming)?;
            }
            outcome
        };

        if outcome == PutOutcome::Skipped {
            write_txn.abort()?;
        } else {
            write_txn.commit()?;
        }
        Ok(outcome)
    }

    fn get(&self, identity: &str) -> Result<Option<CanonicalRecord>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS)?;
        let record = match table.get(identity)? {
            Some(bytes) => Some(serde_json::from_slice(bytes.value())?),
            None => None,
        };
        Ok(record)
    }

    fn revision(&self, identity: &str) -> Result<Option<NaiveDate>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REVISIONS)?;
        let days = table.get(identity)?.map(|days| days.value());
        days.map(|days| to_date(identity, days)).transpose()
    }

    fn len(&self) -> Result<usize, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REVISIONS)?;
        Ok(table.len()? as usize)
    }
}

fn to_date(identity: &str, days: i32) -> Result<NaiveDate, StoreError> {
    revision_from_days(days).ok_or_else(|| StoreError::CorruptIndex {
        identity: identity.to_string(),
        days,
    })
}
