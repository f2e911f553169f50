// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use cartstore::{CartLineItem, CartStorage, Product, ShippingAddress, StorageError};
use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Fixtures ---
pub fn chair() -> Product {
  Product::new(1, "Chair", 49.99).with_image("a.jpg")
}

pub fn table() -> Product {
  Product::new(2, "Walnut Table", 10.0)
    .with_image("table-front.jpg")
    .with_image("table-side.jpg")
}

pub fn cutting_board() -> Product {
  Product::new(3, "Cutting Board", 5.0)
}

pub fn shipping_address() -> ShippingAddress {
  ShippingAddress {
    name: "Ada Joiner".to_string(),
    street: "12 Dovetail Lane".to_string(),
    city: "Portland".to_string(),
    state: "OR".to_string(),
    zip: "97201".to_string(),
    country: "US".to_string(),
  }
}

pub fn product_ids(items: &[CartLineItem]) -> Vec<i64> {
  items.iter().map(|item| item.product_id).collect()
}

// --- Storage that fails on demand ---

/// Storage whose reads and/or writes fail, counting every attempt.
#[derive(Clone, Default)]
pub struct FlakyStorage {
  pub fail_loads: bool,
  pub fail_saves: bool,
  pub load_attempts: Arc<AtomicUsize>,
  pub save_attempts: Arc<AtomicUsize>,
}

impl FlakyStorage {
  pub fn failing_writes() -> Self {
    Self {
      fail_saves: true,
      ..Self::default()
    }
  }

  pub fn failing_reads() -> Self {
    Self {
      fail_loads: true,
      ..Self::default()
    }
  }

  pub fn saves(&self) -> usize {
    self.save_attempts.load(Ordering::SeqCst)
  }
}

impl CartStorage for FlakyStorage {
  fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
    self.load_attempts.fetch_add(1, Ordering::SeqCst);
    if self.fail_loads {
      return Err(StorageError::backend(key, anyhow::anyhow!("storage unavailable")));
    }
    Ok(None)
  }

  fn save(&self, key: &str, _value: &str) -> Result<(), StorageError> {
    self.save_attempts.fetch_add(1, Ordering::SeqCst);
    if self.fail_saves {
      return Err(StorageError::backend(key, anyhow::anyhow!("quota exceeded")));
    }
    Ok(())
  }

  fn remove(&self, _key: &str) -> Result<bool, StorageError> {
    Ok(false)
  }
}

// --- Recording observer ---

/// Collects every list an observer receives.
#[derive(Clone, Default)]
pub struct Recorder {
  pub deliveries: Arc<Mutex<Vec<Vec<CartLineItem>>>>,
}

impl Recorder {
  pub fn observer(&self) -> impl Fn(&[CartLineItem]) + Send + Sync + 'static {
    let deliveries = Arc::clone(&self.deliveries);
    move |items: &[CartLineItem]| deliveries.lock().push(items.to_vec())
  }

  pub fn count(&self) -> usize {
    self.deliveries.lock().len()
  }

  pub fn last(&self) -> Option<Vec<CartLineItem>> {
    self.deliveries.lock().last().cloned()
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
