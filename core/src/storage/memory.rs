// cartstore/src/storage/memory.rs

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::StorageError;
use crate::storage::CartStorage;

/// In-memory storage backed by `Arc<RwLock<HashMap>>`.
///
/// Cloning shares the same slots, so a test can hand one clone to a store
/// and inspect or tamper with the raw value through another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
  slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Pre-populates `key`, e.g. with data left by an earlier session.
  pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.slots.write().insert(key.into(), value.into());
    self
  }

  pub fn len(&self) -> usize {
    self.slots.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.read().is_empty()
  }
}

impl CartStorage for MemoryStorage {
  fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
    Ok(self.slots.read().get(key).cloned())
  }

  fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
    self.slots.write().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<bool, StorageError> {
    Ok(self.slots.write().remove(key).is_some())
  }
}
