// cartstore/src/config.rs

/// Key the cart occupies in client-local storage.
pub const DEFAULT_STORAGE_KEY: &str = "bw3_cart";

/// Per-product limit the product page enforces before adding to the cart.
pub const DEFAULT_MAX_PER_PRODUCT: i32 = 5;

/// Settings for a `CartStore` instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
  /// Slot the line-item list is persisted under.
  pub storage_key: String,
  /// Upper bound handed to `QuantityPolicy` by callers; the store itself never enforces it.
  pub max_per_product: i32,
}

impl CartConfig {
  pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
    self.storage_key = key.into();
    self
  }

  pub fn with_max_per_product(mut self, max: i32) -> Self {
    self.max_per_product = max;
    self
  }
}

impl Default for CartConfig {
  fn default() -> Self {
    Self {
      storage_key: DEFAULT_STORAGE_KEY.to_string(),
      max_per_product: DEFAULT_MAX_PER_PRODUCT,
    }
  }
}
