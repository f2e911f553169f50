// tests/persistence_tests.rs
mod common;

use cartstore::{CartConfig, CartStorage, CartStore, FileStorage, MemoryStorage, StorageError, DEFAULT_STORAGE_KEY};
use common::*;

fn temp_files_in(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
  std::fs::read_dir(dir)
    .unwrap()
    .filter_map(|entry| entry.ok())
    .map(|entry| entry.path())
    .filter(|path| path.to_string_lossy().ends_with(".tmp"))
    .collect()
}

#[test]
fn test_every_mutation_writes_the_slot() {
  setup_tracing();
  let storage = MemoryStorage::new();
  let cart = CartStore::open(storage.clone(), CartConfig::default());
  assert!(storage.load(DEFAULT_STORAGE_KEY).unwrap().is_none());

  cart.add_item(&chair(), 2);
  let raw = storage.load(DEFAULT_STORAGE_KEY).unwrap().unwrap();
  let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
  let line = &value[0];
  assert_eq!(line["product_id"], 1);
  assert_eq!(line["product_name"], "Chair");
  assert_eq!(line["quantity"], 2);
  assert_eq!(line["unit_price"], 49.99);
  assert_eq!(line["imageUrl"], "a.jpg");
  assert_eq!(line["subtotal"], 2.0 * 49.99);

  cart.clear();
  assert_eq!(storage.load(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn test_reopen_restores_identical_sequence() {
  setup_tracing();
  let storage = MemoryStorage::new();
  let cart = CartStore::open(storage.clone(), CartConfig::default());
  cart.add_item(&table(), 2);
  cart.add_item(&chair(), 3);
  cart.add_item(&cutting_board(), 1);
  cart.update_quantity(2, 5);

  let reopened = CartStore::open(storage, CartConfig::default());
  assert_eq!(reopened.items(), cart.items());
  assert_eq!(reopened.snapshot(), cart.snapshot());
}

#[test]
fn test_custom_storage_key_is_isolated() {
  setup_tracing();
  let storage = MemoryStorage::new();
  let guest = CartStore::open(storage.clone(), CartConfig::default().with_storage_key("guest_cart"));
  guest.add_item(&chair(), 1);

  assert!(storage.load(DEFAULT_STORAGE_KEY).unwrap().is_none());
  assert!(storage.load("guest_cart").unwrap().is_some());
  assert!(CartStore::open(storage, CartConfig::default()).is_empty());
}

#[test]
fn test_missing_slot_opens_empty() {
  setup_tracing();
  let cart = CartStore::open(MemoryStorage::new(), CartConfig::default());
  assert!(cart.is_empty());
}

#[test]
fn test_corrupt_slot_opens_empty() {
  setup_tracing();
  let corrupt = [
    "{not json",
    r#"{"items": []}"#,
    r#"[{"product_id": "one"}]"#,
    r#"[{"product_id":1,"product_name":"A","quantity":0,"unit_price":1,"imageUrl":"","subtotal":0}]"#,
    "",
  ];
  for raw in corrupt {
    let storage = MemoryStorage::new().with_value(DEFAULT_STORAGE_KEY, raw);
    let cart = CartStore::open(storage, CartConfig::default());
    assert!(cart.is_empty(), "payload {:?} should be discarded", raw);
  }
}

#[test]
fn test_corrupt_slot_is_overwritten_by_next_mutation() {
  setup_tracing();
  let storage = MemoryStorage::new().with_value(DEFAULT_STORAGE_KEY, "garbage");
  let cart = CartStore::open(storage.clone(), CartConfig::default());
  cart.add_item(&chair(), 1);

  let reopened = CartStore::open(storage, CartConfig::default());
  assert_eq!(product_ids(&reopened.items()), vec![1]);
}

#[test]
fn test_unreadable_storage_opens_empty() {
  setup_tracing();
  let storage = FlakyStorage::failing_reads();
  let cart = CartStore::open(storage.clone(), CartConfig::default());
  assert!(cart.is_empty());
  assert_eq!(storage.load_attempts.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_failed_writes_keep_in_memory_state() {
  setup_tracing();
  let storage = FlakyStorage::failing_writes();
  let cart = CartStore::open(storage.clone(), CartConfig::default());

  assert!(cart.add_item(&chair(), 2));
  cart.add_item(&table(), 1);
  cart.update_quantity(2, 3);
  cart.remove_item(1);

  assert_eq!(product_ids(&cart.items()), vec![2]);
  assert_eq!(cart.quantity_of(2), 3);
  assert_eq!(storage.saves(), 4);
}

#[test]
fn test_noops_do_not_write() {
  setup_tracing();
  let storage = FlakyStorage::default();
  let cart = CartStore::open(storage.clone(), CartConfig::default());
  cart.add_item(&chair(), 0);
  cart.remove_item(99);
  cart.update_quantity(99, 4);
  assert_eq!(storage.saves(), 0);

  cart.clear();
  assert_eq!(storage.saves(), 1);
}

// --- File backend ---

#[test]
fn test_file_storage_round_trip() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let storage = FileStorage::new(dir.path().join("state"));

  {
    let cart = CartStore::open(storage.clone(), CartConfig::default());
    cart.add_item(&chair(), 3);
    cart.add_item(&table(), 1);
  }

  let path = storage.slot_path(DEFAULT_STORAGE_KEY).unwrap();
  assert!(path.exists());
  assert!(temp_files_in(path.parent().unwrap()).is_empty());

  let reopened = CartStore::open(storage, CartConfig::default());
  assert_eq!(product_ids(&reopened.items()), vec![1, 2]);
  assert_eq!(reopened.quantity_of(1), 3);
}

#[test]
fn test_concurrent_file_saves_leave_one_complete_value() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let storage = FileStorage::new(dir.path());

  let writers: Vec<_> = (0..8)
    .map(|writer| {
      let storage = storage.clone();
      std::thread::spawn(move || {
        for round in 0..25 {
          let value = format!("[{{\"writer\":{},\"round\":{}}}]", writer, round);
          storage.save("bw3_cart", &value).unwrap();
        }
      })
    })
    .collect();
  for writer in writers {
    writer.join().unwrap();
  }

  let stored = storage.load("bw3_cart").unwrap().unwrap();
  let value: serde_json::Value = serde_json::from_str(&stored).unwrap();
  assert_eq!(value[0]["round"], 24);
  assert!(temp_files_in(dir.path()).is_empty());
}

#[test]
fn test_file_storage_missing_and_remove() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let storage = FileStorage::new(dir.path());

  assert!(storage.load("bw3_cart").unwrap().is_none());
  assert!(!storage.remove("bw3_cart").unwrap());

  storage.save("bw3_cart", "[]").unwrap();
  assert_eq!(storage.load("bw3_cart").unwrap().as_deref(), Some("[]"));
  assert!(storage.remove("bw3_cart").unwrap());
  assert!(storage.load("bw3_cart").unwrap().is_none());
}

#[test]
fn test_file_storage_rejects_path_keys() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let storage = FileStorage::new(dir.path());

  let result = storage.save("../escape", "[]");
  assert!(matches!(result, Err(StorageError::InvalidKey { .. })));
  assert!(!dir.path().join("../escape.json").exists());
}

#[test]
fn test_store_with_invalid_key_still_works_in_memory() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let cart = CartStore::open(FileStorage::new(dir.path()), CartConfig::default().with_storage_key("a/b"));
  cart.add_item(&chair(), 1);
  assert_eq!(cart.quantity_of(1), 1);
}
