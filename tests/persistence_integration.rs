//! Integration tests for the persistence layer.
//!
//! These tests exercise the FileMetadataStore and StoreLock against real
//! directories created with tempfile.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;

use keystone_seo::core::metadata::schema::{parse_record, RECORD_KIND, SCHEMA_VERSION};
use keystone_seo::core::metadata::MetadataValue;
use keystone_seo::core::types::SubjectIdentity;
use keystone_seo::repository::{
    FileMetadataStore, MetadataRepository, RepositoryError, StoreLock, DEFAULT_LOCK_TIMEOUT,
};

// =============================================================================
// Test Helpers
// =============================================================================

struct TestStore {
    _dir: TempDir,
    store: FileMetadataStore,
}

impl TestStore {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let store = FileMetadataStore::open(dir.path().join("seo")).expect("open store");
        Self { _dir: dir, store }
    }
}

fn page(id: i64) -> SubjectIdentity {
    SubjectIdentity::new("page", id).expect("valid subject")
}

// =============================================================================
// Record format
// =============================================================================

#[test]
fn record_file_is_self_describing() {
    let t = TestStore::new();
    let meta = MetadataValue::new("Title", "Description")
        .with_canonical(Some("https://x.com/a".into()))
        .with_open_graph(json!({"title": "Title", "description": "Description"})
            .as_object()
            .cloned()
            .unwrap());

    t.store.save(&page(1), &meta).unwrap();

    let json = std::fs::read_to_string(t.store.record_path(&page(1))).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(raw["kind"], RECORD_KIND);
    assert_eq!(raw["schema_version"], SCHEMA_VERSION);
    assert_eq!(raw["subject_type"], "page");
    assert_eq!(raw["subject_id"], 1);
    assert_eq!(raw["no_index"], false);
    assert_eq!(raw["canonical"], "https://x.com/a");
    assert_eq!(raw["open_graph"]["title"], "Title");
    assert!(raw["created_at"].is_string());
    assert!(raw["updated_at"].is_string());
}

#[test]
fn upsert_preserves_created_at() {
    let t = TestStore::new();

    t.store.save(&page(1), &MetadataValue::new("First", "")).unwrap();
    let first = t.store.read_record(&page(1)).unwrap().unwrap();

    thread::sleep(Duration::from_millis(5));
    t.store
        .save(&page(1), &MetadataValue::new("Second", "D").with_no_index(true))
        .unwrap();
    let second = t.store.read_record(&page(1)).unwrap().unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.title, "Second");
    assert!(second.no_index);
    assert_eq!(t.store.list().unwrap(), vec![page(1)]);
}

#[test]
fn upsert_overwrites_every_field() {
    let t = TestStore::new();
    t.store
        .save(
            &page(1),
            &MetadataValue::new("T", "D")
                .with_canonical(Some("https://x.com/old".into()))
                .with_no_index(true),
        )
        .unwrap();

    t.store.save(&page(1), &MetadataValue::new("T2", "")).unwrap();

    let meta = t.store.find(&page(1)).unwrap().unwrap();
    assert_eq!(meta, MetadataValue::new("T2", ""));
}

#[test]
fn record_for_other_subject_is_corrupt() {
    let t = TestStore::new();
    t.store.save(&page(1), &MetadataValue::new("One", "")).unwrap();

    // Misplace page 1's record under page 2's key.
    std::fs::copy(t.store.record_path(&page(1)), t.store.record_path(&page(2))).unwrap();

    match t.store.find(&page(2)) {
        Err(RepositoryError::Corrupt { subject, message }) => {
            assert_eq!(subject, "page:2");
            assert!(message.contains("page:1"));
        }
        other => panic!("expected Corrupt, got {:?}", other),
    }
}

#[test]
fn stored_record_parses_with_schema() {
    let t = TestStore::new();
    t.store.save(&page(3), &MetadataValue::new("T", "D")).unwrap();

    let json = std::fs::read_to_string(t.store.record_path(&page(3))).unwrap();
    let record = parse_record(&json).unwrap();
    assert_eq!(record.subject().unwrap(), page(3));
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn concurrent_saves_last_write_wins() {
    let t = TestStore::new();
    let store = Arc::new(t.store.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .save(&page(1), &MetadataValue::new(format!("writer {i}"), ""))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let meta = store.find(&page(1)).unwrap().unwrap();
    assert!(meta.title().starts_with("writer "));
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn save_times_out_while_store_locked() {
    let t = TestStore::new();
    let store = t.store.clone().with_lock_timeout(Duration::from_millis(50));

    let _lock = StoreLock::acquire(store.root(), DEFAULT_LOCK_TIMEOUT).unwrap();
    let result = store.save(&page(1), &MetadataValue::new("T", ""));

    assert_eq!(result.unwrap_err(), RepositoryError::LockTimeout);
    assert_eq!(store.find(&page(1)).unwrap(), None);
}

#[test]
fn reads_do_not_take_the_lock() {
    let t = TestStore::new();
    t.store.save(&page(1), &MetadataValue::new("T", "")).unwrap();

    let _lock = StoreLock::acquire(t.store.root(), DEFAULT_LOCK_TIMEOUT).unwrap();
    assert!(t.store.find(&page(1)).unwrap().is_some());
}
