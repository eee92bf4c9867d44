// Integration tests for the changeset directory store
// Covers listing modes, record lifecycle and marker bookkeeping

use changeset_core::errors::ExErrorKind;
use changeset_core::model::{ChangesetRecord, Severity};
use changeset_core_types::ChangesetId;
use changeset_store::{ChangesetConfig, ChangesetStore, ListMode};
use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;

fn setup_test_store() -> (ChangesetStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp project directory");
    let store = ChangesetStore::new(&ChangesetConfig::new(dir.path()));
    (store, dir)
}

fn record(id: &str, severity: Severity, message: &str) -> ChangesetRecord {
    ChangesetRecord::new(
        ChangesetId::from(id),
        severity,
        message,
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        Some("alice".to_string()),
    )
    .unwrap()
}

#[test]
fn test_write_read_roundtrip() {
    // Given: A store
    let (store, _dir) = setup_test_store();
    let original = record("0001", Severity::Minor, "add Y");

    // When: We write a record
    let path = store.write(&original).unwrap();

    // Then: It lands as <id>.md and reads back identically
    assert_eq!(path, store.dir().join("0001.md"));
    assert_eq!(store.read(&original.id).unwrap(), original);
}

#[test]
fn test_list_is_sorted_and_filtered_by_extension() {
    let (store, _dir) = setup_test_store();
    store.write(&record("c", Severity::Patch, "fix Z")).unwrap();
    store.write(&record("a", Severity::Patch, "fix X")).unwrap();
    store.write(&record("b", Severity::Minor, "add Y")).unwrap();
    fs::write(store.dir().join("notes.txt"), "ignored").unwrap();
    fs::write(store.dir().join("README"), "ignored").unwrap();
    fs::create_dir_all(store.dir().join("nested.md")).unwrap();
    store
        .append_processed_markers(&[ChangesetId::from("zzz")])
        .unwrap();

    let listing = store.list(ListMode::All).unwrap();

    let ids: Vec<&str> = listing.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_write_refuses_existing_id() {
    let (store, _dir) = setup_test_store();
    let original = record("dup", Severity::Patch, "fix X");
    store.write(&original).unwrap();

    let err = store
        .write(&record("dup", Severity::Major, "something else"))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
    assert_eq!(store.read(&original.id).unwrap(), original);
}

#[test]
fn test_delete_is_idempotent() {
    let (store, _dir) = setup_test_store();
    let r = record("gone", Severity::Patch, "fix X");
    store.write(&r).unwrap();

    store.delete(&r.id).unwrap();
    store.delete(&r.id).unwrap();

    assert!(store.list(ListMode::All).unwrap().is_empty());
}

#[test]
fn test_read_malformed_record_names_it() {
    let (store, _dir) = setup_test_store();
    store.ensure_dir().unwrap();
    fs::write(store.dir().join("bad.md"), "just some text\n").unwrap();

    let err = store.read(&ChangesetId::from("bad")).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::MalformedRecord);
    assert_eq!(err.record_id().map(|id| id.as_str()), Some("bad"));
}

#[test]
fn test_read_missing_record_is_io_failure() {
    let (store, _dir) = setup_test_store();

    let err = store.read(&ChangesetId::from("missing")).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::IoFailure);
    assert!(err.path().is_some());
}

#[test]
fn test_staged_only_excludes_marked_ids() {
    let (store, _dir) = setup_test_store();
    store.write(&record("a", Severity::Patch, "fix X")).unwrap();
    store.write(&record("b", Severity::Patch, "fix Z")).unwrap();

    store
        .append_processed_markers(&[ChangesetId::from("a")])
        .unwrap();

    let staged: Vec<String> = store
        .list(ListMode::StagedOnly)
        .unwrap()
        .into_iter()
        .map(|id| id.into_string())
        .collect();
    assert_eq!(staged, vec!["b"]);

    // Full listing is unaffected by markers
    assert_eq!(store.list(ListMode::All).unwrap().len(), 2);
}

#[test]
fn test_marker_file_holds_file_names() {
    let (store, dir) = setup_test_store();

    store
        .append_processed_markers(&[ChangesetId::from("a"), ChangesetId::from("b")])
        .unwrap();

    let raw = fs::read_to_string(dir.path().join(".changeset/save.json")).unwrap();
    let names: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(names, vec!["a.md", "b.md"]);

    store.clear_processed_markers().unwrap();
    assert!(store.read_processed_markers().unwrap().is_empty());
}

#[test]
fn test_reads_records_written_by_hand() {
    let (store, _dir) = setup_test_store();
    store.ensure_dir().unwrap();
    fs::write(
        store.dir().join("legacy.md"),
        "---\ntype: major\ntimestamp: '2025-03-01'\nauthor: bob\n---\n\nremove the v1 API\n",
    )
    .unwrap();

    let r = store.read(&ChangesetId::from("legacy")).unwrap();

    assert_eq!(r.severity, Severity::Major);
    assert_eq!(r.message, "remove the v1 API");
    assert_eq!(r.author.as_deref(), Some("bob"));
    assert_eq!(r.created_at, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
}
