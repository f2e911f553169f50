// storefront_cli/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use cartstore::storage::file::validate_key;
use cartstore::{CartConfig, DEFAULT_STORAGE_KEY};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Directory holding the durable cart slot.
  pub storage_dir: PathBuf,
  pub storage_key: String,
  pub max_per_product: i32,
  /// Emit JSON log lines instead of the human-readable format.
  pub log_json: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let storage_dir = lookup("CART_STORAGE_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from(".storefront"));

    let storage_key = lookup("CART_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
    if storage_key.trim().is_empty() {
      return Err(AppError::Config("CART_STORAGE_KEY must not be empty".to_string()));
    }
    // The slot is a file named after the key; reject keys it cannot hold.
    validate_key(&storage_key).map_err(|e| AppError::Config(format!("Invalid CART_STORAGE_KEY: {}", e)))?;

    let max_per_product = lookup("CART_MAX_PER_PRODUCT")
      .unwrap_or_else(|| CartConfig::default().max_per_product.to_string())
      .parse::<i32>()
      .map_err(|e| AppError::Config(format!("Invalid CART_MAX_PER_PRODUCT: {}", e)))?;
    if max_per_product < 1 {
      return Err(AppError::Config(format!(
        "CART_MAX_PER_PRODUCT must be at least 1, got {}",
        max_per_product
      )));
    }

    let log_json = lookup("LOG_JSON")
      .unwrap_or_else(|| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid LOG_JSON value: {}", e)))?;

    Ok(Self {
      storage_dir,
      storage_key,
      max_per_product,
      log_json,
    })
  }

  /// Logs the effective settings. Call once the subscriber is installed.
  pub fn log_loaded(&self) {
    tracing::debug!(
      storage_dir = %self.storage_dir.display(),
      storage_key = %self.storage_key,
      max_per_product = self.max_per_product,
      log_json = self.log_json,
      "Configuration loaded."
    );
  }

  pub fn cart_config(&self) -> CartConfig {
    CartConfig::default()
      .with_storage_key(self.storage_key.clone())
      .with_max_per_product(self.max_per_product)
  }
}
