mod common;

use chrono::NaiveDate;
use common::init_logging;
use oai_harvest_core::{normalize, CanonicalRecord, PutOutcome, RawEntry};
use oai_harvest_engine::{MemoryRecordStore, RecordStore, RedbRecordStore};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn record(identity: &str, updated: &str, title: &str) -> CanonicalRecord {
    let entry = RawEntry::new(format!("oai:arXiv.org:{identity}"))
        .with_field("id", identity)
        .with_field("created", "2019-01-01")
        .with_field("updated", updated)
        .with_field("title", title)
        .with_field("abstract", "Abstract.")
        .with_field("categories", "cs.LG");
    normalize(&entry).expect("test record normalizes")
}

fn open_temp() -> (TempDir, RedbRecordStore) {
    let temp = TempDir::new().unwrap();
    let store = RedbRecordStore::open(temp.path().join("papers.redb")).unwrap();
    (temp, store)
}

fn increasing_revisions_replace(store: &mut impl RecordStore) {
    let older = record("2101.00001", "2021-01-01", "Older");
    let newer = record("2101.00001", "2021-03-01", "Newer");

    assert_eq!(store.put(&older).unwrap(), PutOutcome::Inserted);
    assert_eq!(store.put(&newer).unwrap(), PutOutcome::Replaced);
    assert_eq!(store.get("2101.00001").unwrap(), Some(newer));
    assert_eq!(store.len().unwrap(), 1);
}

fn decreasing_revisions_skip(store: &mut impl RecordStore) {
    let older = record("2101.00002", "2021-01-01", "Older");
    let newer = record("2101.00002", "2021-03-01", "Newer");

    assert_eq!(store.put(&newer).unwrap(), PutOutcome::Inserted);
    assert_eq!(store.put(&older).unwrap(), PutOutcome::Skipped);
    assert_eq!(store.get("2101.00002").unwrap(), Some(newer));
    assert_eq!(
        store.revision("2101.00002").unwrap(),
        NaiveDate::from_ymd_opt(2021, 3, 1)
    );
}

fn repeated_put_is_idempotent(store: &mut impl RecordStore) {
    let first = record("2101.00003", "2021-01-01", "Same Day");
    let same_day = record("2101.00003", "2021-01-01", "Same Day, Other Title");

    assert_eq!(store.put(&first).unwrap(), PutOutcome::Inserted);
    assert_eq!(store.put(&first).unwrap(), PutOutcome::Skipped);
    assert_eq!(store.put(&same_day).unwrap(), PutOutcome::Skipped);
    assert_eq!(store.get("2101.00003").unwrap(), Some(first));
}

#[test]
fn redb_store_applies_upsert_policy() {
    init_logging();
    let (_temp, mut store) = open_temp();
    increasing_revisions_replace(&mut store);
    decreasing_revisions_skip(&mut store);
    repeated_put_is_idempotent(&mut store);
    assert_eq!(store.verify_index().unwrap(), 3);
}

#[test]
fn memory_store_applies_upsert_policy() {
    let mut store = MemoryRecordStore::new();
    increasing_revisions_replace(&mut store);
    decreasing_revisions_skip(&mut store);
    repeated_put_is_idempotent(&mut store);
    assert_eq!(store.records().count(), 3);
}

#[test]
fn missing_identity_reads_as_absent() {
    let (_temp, store) = open_temp();
    assert!(store.is_empty().unwrap());
    assert_eq!(store.get("nope").unwrap(), None);
    assert_eq!(store.revision("nope").unwrap(), None);
    assert!(!store.contains("nope").unwrap());
}

#[test]
fn records_and_index_survive_reopen() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("papers.redb");
    let stored = record("2101.00004", "2021-02-02", "Durable");

    {
        let mut store = RedbRecordStore::open(&path).unwrap();
        assert_eq!(store.put(&stored).unwrap(), PutOutcome::Inserted);
    }

    let mut reopened = RedbRecordStore::open(&path).unwrap();
    assert_eq!(reopened.path(), path.as_path());
    assert_eq!(reopened.len().unwrap(), 1);
    assert_eq!(reopened.get("2101.00004").unwrap(), Some(stored.clone()));
    assert_eq!(reopened.put(&stored).unwrap(), PutOutcome::Skipped);
    assert_eq!(reopened.verify_index().unwrap(), 1);
}

#[test]
fn optional_fields_round_trip_through_the_store() {
    let (_temp, mut store) = open_temp();
    let mut with_doi = record("2101.00005", "2021-02-02", "With DOI");
    with_doi.doi = Some("10.1000/xyz".to_string());
    with_doi.authors = vec!["Doe Jane".to_string(), "Roe Richard".to_string()];

    store.put(&with_doi).unwrap();

    assert_eq!(store.get("2101.00005").unwrap(), Some(with_doi));
}
