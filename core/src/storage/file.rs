// cartstore/src/storage/file.rs

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{event, Level};

use crate::error::StorageError;
use crate::storage::CartStorage;

/// File-backed storage: each key lives in `<dir>/<key>.json`.
///
/// The directory is created on first save. Values are written to a
/// temporary sibling unique to the write and renamed into place, so a reader
/// sees either the previous value or the new one, and concurrent writers
/// (threads or processes) never share a temp file.
#[derive(Debug, Clone)]
pub struct FileStorage {
  base_dir: PathBuf,
}

impl FileStorage {
  pub fn new(base_dir: impl Into<PathBuf>) -> Self {
    Self {
      base_dir: base_dir.into(),
    }
  }

  pub fn base_dir(&self) -> &Path {
    &self.base_dir
  }

  /// Path of the file holding `key`. Rejects keys that could escape `base_dir`.
  pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
    validate_key(key)?;
    Ok(self.base_dir.join(format!("{}.json", key)))
  }
}

/// Checks that `key` is usable as a file name: ASCII letters, digits, `_`,
/// `-` and `.`, not empty and not starting with a dot.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
  let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');
  if key.is_empty() || key.starts_with('.') || !key.chars().all(allowed) {
    return Err(StorageError::InvalidKey { key: key.to_string() });
  }
  Ok(())
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_path_for(path: &Path) -> PathBuf {
  let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
  path.with_extension(format!("json.{}.{}.tmp", std::process::id(), seq))
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
  StorageError::Io {
    key: key.to_string(),
    source,
  }
}

impl CartStorage for FileStorage {
  fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
    let path = self.slot_path(key)?;
    match fs::read_to_string(&path) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(io_error(key, e)),
    }
  }

  fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
    let path = self.slot_path(key)?;
    fs::create_dir_all(&self.base_dir).map_err(|e| io_error(key, e))?;

    let tmp_path = temp_path_for(&path);
    if let Err(e) = fs::write(&tmp_path, value).and_then(|()| fs::rename(&tmp_path, &path)) {
      if let Err(cleanup) = fs::remove_file(&tmp_path) {
        if cleanup.kind() != ErrorKind::NotFound {
          event!(Level::DEBUG, key, path = %tmp_path.display(), error = %cleanup, "Could not remove temp file.");
        }
      }
      return Err(io_error(key, e));
    }

    event!(Level::TRACE, key, path = %path.display(), bytes = value.len(), "Slot written.");
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<bool, StorageError> {
    let path = self.slot_path(key)?;
    match fs::remove_file(&path) {
      Ok(()) => Ok(true),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
      Err(e) => Err(io_error(key, e)),
    }
  }
}
