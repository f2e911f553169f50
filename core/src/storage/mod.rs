// cartstore/src/storage/mod.rs

//! The durable key-value slot the cart persists to.
//!
//! A slot holds one string value per key. The store only ever touches a
//! single key, but backends are keyed so several carts (or other client
//! state) can share one backend.

pub mod file;
pub mod memory;

use crate::error::StorageError;

/// Client-local durable key-value storage.
///
/// Implementations must be cheap to call from inside the store's write lock:
/// the store writes the slot while holding it so the slot never lags behind
/// a later mutation.
pub trait CartStorage: Send + Sync {
  /// Reads the value under `key`. A missing key is `Ok(None)`, not an error.
  fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

  /// Writes (or overwrites) the value under `key`.
  fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

  /// Deletes the value under `key`. Returns true if one existed.
  fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for std::sync::Arc<S> {
  fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
    (**self).load(key)
  }

  fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
    (**self).save(key, value)
  }

  fn remove(&self, key: &str) -> Result<bool, StorageError> {
    (**self).remove(key)
  }
}
