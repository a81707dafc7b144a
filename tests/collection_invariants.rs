//! Collection Store Invariant Tests
//!
//! Tests for the dense-id collection contract:
//! - Ids are always exactly 0..n-1, in insertion order
//! - Upsert keys on name: new names append, known names update in place
//! - Delete compacts the id range and rewrites embedded ids
//! - State survives a close and reopen through the backing file
//! - Backing files keep the decimal-string-key map shape

use std::fs;

use tempfile::TempDir;

use robostore::config::{CollectionKind, ResourcePaths};
use robostore::model::{Action, Task};
use robostore::observability::Logger;
use robostore::store::{CollectionStore, StoreError};

// =============================================================================
// Helper Functions
// =============================================================================

fn layout(tmp: &TempDir) -> ResourcePaths {
    ResourcePaths::new(tmp.path())
}

fn open_actions(paths: &ResourcePaths) -> CollectionStore<Action> {
    CollectionStore::open(paths, Logger::disabled()).unwrap()
}

fn action(name: &str) -> Action {
    Action::new(name, "click")
}

// =============================================================================
// Dense Id Assignment
// =============================================================================

/// Records receive sequential ids starting at zero, in insertion order.
#[test]
fn test_insertion_assigns_sequential_ids() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);
    let mut store = open_actions(&paths);

    for (i, name) in ["alpha", "beta", "gamma"].iter().enumerate() {
        let stored = store.upsert(action(name)).unwrap();
        assert_eq!(stored.id, Some(i as u32));
    }

    assert_eq!(store.len(), 3);
    assert_eq!(store.get(0).unwrap().name, "alpha");
    assert_eq!(store.get(2).unwrap().name, "gamma");
}

/// Deleting a middle record, then inserting a new one, yields the
/// compacted table: successors shift down and the freed top id is reused.
#[test]
fn test_delete_then_insert_compacts_id_range() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);
    let mut store = open_actions(&paths);

    store.upsert(action("alpha")).unwrap();
    store.upsert(action("beta")).unwrap();
    store.upsert(action("gamma")).unwrap();

    let removed = store.remove(1).unwrap().unwrap();
    assert_eq!(removed.name, "beta");
    assert_eq!(store.get(1).unwrap().name, "gamma");

    let stored = store.upsert(action("delta")).unwrap();
    assert_eq!(stored.id, Some(2));

    let names: Vec<&str> = store.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["alpha", "gamma", "delta"]);
    for (i, record) in store.iter().enumerate() {
        assert_eq!(record.id, Some(i as u32));
    }
}

/// Full add/update/delete sequence: two inserts, an upsert onto the
/// first name, then deleting id 0 leaves the survivor at id 0.
#[test]
fn test_add_update_delete_sequence() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);
    let mut store = open_actions(&paths);

    assert_eq!(store.upsert(action("a")).unwrap().id, Some(0));
    assert_eq!(store.upsert(action("b")).unwrap().id, Some(1));

    let mut extra = action("a");
    extra.num_repeats = 1;
    let stored = store.upsert(extra).unwrap();
    assert_eq!(stored.id, Some(0));
    assert_eq!(store.len(), 2);

    store.remove(0).unwrap().unwrap();
    assert_eq!(store.len(), 1);
    let survivor = store.get(0).unwrap();
    assert_eq!(survivor.name, "b");
    assert_eq!(survivor.id, Some(0));
}

/// Deleting an id that does not exist changes nothing and is not an error.
#[test]
fn test_delete_unknown_id_is_acknowledged_noop() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);
    let mut store = open_actions(&paths);

    store.upsert(action("alpha")).unwrap();

    assert!(store.remove(7).unwrap().is_none());
    assert_eq!(store.len(), 1);
}

// =============================================================================
// Upsert Semantics
// =============================================================================

/// Re-adding a known name updates that record in place, keeping its id
/// and the collection size.
#[test]
fn test_upsert_known_name_updates_in_place() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);
    let mut store = open_actions(&paths);

    store.upsert(action("alpha")).unwrap();
    store.upsert(action("beta")).unwrap();

    let replacement = Action::new("alpha", "drag");
    let stored = store.upsert(replacement).unwrap();

    assert_eq!(stored.id, Some(0));
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(0).unwrap().function, "drag");
    assert_eq!(store.get(1).unwrap().name, "beta");
}

/// Upserting the same record twice leaves one record; ids never skip.
#[test]
fn test_upsert_is_idempotent_for_same_record() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);
    let mut store = open_actions(&paths);

    let record = action("alpha");
    let first = store.upsert(record.clone()).unwrap();
    let second = store.upsert(record).unwrap();

    assert_eq!(first.id, Some(0));
    assert_eq!(second.id, Some(0));
    assert_eq!(store.len(), 1);

    let next = store.upsert(action("beta")).unwrap();
    assert_eq!(next.id, Some(1));
}

// =============================================================================
// Update Bounds
// =============================================================================

/// Updating one past the end is rejected and leaves the collection
/// untouched; the error names the offending id and the current size.
#[test]
fn test_update_one_past_end_rejected_without_side_effects() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);
    let mut store = open_actions(&paths);

    store.upsert(action("alpha")).unwrap();
    store.upsert(action("beta")).unwrap();

    let result = store.update(2, action("gamma"));
    assert!(matches!(
        result,
        Err(StoreError::InvalidId { id: 2, len: 2 })
    ));

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(0).unwrap().name, "alpha");
    assert_eq!(store.get(1).unwrap().name, "beta");
    assert!(store.get_by_name("gamma").is_none());
}

/// Update replaces the stored record wholesale, not field by field.
#[test]
fn test_update_replaces_record_wholesale() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);
    let mut store = open_actions(&paths);

    let mut original = action("alpha");
    original.num_repeats = 5;
    store.upsert(original).unwrap();

    // The replacement never set num_repeats, so the default must win
    let stored = store.update(0, action("alpha")).unwrap();
    assert_eq!(stored.id, Some(0));
    assert_eq!(store.get(0).unwrap().num_repeats, 0);
}

// =============================================================================
// Persistence Across Reopen
// =============================================================================

/// A reopened collection sees the same records in the same order with the
/// same ids.
#[test]
fn test_reopen_preserves_records_and_order() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);

    {
        let mut store = open_actions(&paths);
        let mut alpha = action("alpha");
        alpha.time_delay = 1.5;
        alpha.images.push("splash".to_string());
        store.upsert(alpha).unwrap();
        store.upsert(action("beta")).unwrap();
    }

    let store = open_actions(&paths);
    assert_eq!(store.len(), 2);

    let alpha = store.get(0).unwrap();
    assert_eq!(alpha.id, Some(0));
    assert_eq!(alpha.time_delay, 1.5);
    assert_eq!(alpha.images, ["splash"]);
    assert_eq!(store.get(1).unwrap().name, "beta");
}

/// Ids stay dense across a reopen that follows a delete.
#[test]
fn test_reopen_after_delete_keeps_dense_ids() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);

    {
        let mut store = open_actions(&paths);
        for name in ["alpha", "beta", "gamma", "delta"] {
            store.upsert(action(name)).unwrap();
        }
        store.remove(0).unwrap();
    }

    let store = open_actions(&paths);
    assert_eq!(store.len(), 3);
    let names: Vec<&str> = store.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["beta", "gamma", "delta"]);
    for (i, record) in store.iter().enumerate() {
        assert_eq!(record.id, Some(i as u32));
    }
}

// =============================================================================
// Backing File Contract
// =============================================================================

/// The backing file is a JSON object keyed by decimal strings, with keys
/// written in numeric order.
#[test]
fn test_backing_file_keys_in_numeric_order() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);
    let mut store = open_actions(&paths);

    for i in 0..11 {
        store.upsert(action(&format!("step_{i}"))).unwrap();
    }

    let content = fs::read_to_string(store.path()).unwrap();

    // Lexicographic ordering would place "10" before "9"
    let pos_nine = content.find("\"9\"").unwrap();
    let pos_ten = content.find("\"10\"").unwrap();
    assert!(pos_nine < pos_ten, "keys not in numeric order");

    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    let map = parsed.as_object().unwrap();
    assert_eq!(map.len(), 11);
    assert_eq!(map["10"]["name"], "step_10");
    assert_eq!(map["10"]["id"], 10);
}

/// A backing file that is not valid JSON surfaces as corruption, not as
/// an empty collection.
#[test]
fn test_damaged_backing_file_reports_corrupt() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);

    fs::write(paths.collection_file(CollectionKind::Action), "not json").unwrap();

    let result: Result<CollectionStore<Action>, _> =
        CollectionStore::open(&paths, Logger::disabled());
    assert!(matches!(result, Err(StoreError::Corrupt { .. })));
}

// =============================================================================
// Kind Isolation
// =============================================================================

/// Collections of different kinds under one root use separate backing
/// files and never see each other's records.
#[test]
fn test_kinds_are_isolated_under_one_root() {
    let tmp = TempDir::new().unwrap();
    let paths = layout(&tmp);

    let mut actions: CollectionStore<Action> =
        CollectionStore::open(&paths, Logger::disabled()).unwrap();
    let mut tasks: CollectionStore<Task> =
        CollectionStore::open(&paths, Logger::disabled()).unwrap();

    actions.upsert(action("alpha")).unwrap();
    tasks.upsert(Task::new("login")).unwrap();
    tasks.upsert(Task::new("export")).unwrap();

    assert_ne!(actions.path(), tasks.path());
    assert_eq!(actions.len(), 1);
    assert_eq!(tasks.len(), 2);

    let reopened: CollectionStore<Task> =
        CollectionStore::open(&paths, Logger::disabled()).unwrap();
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.get_by_name("login").unwrap().id, Some(0));
}
