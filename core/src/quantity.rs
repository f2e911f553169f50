// cartstore/src/quantity.rs

use crate::config::CartConfig;

/// Caller-side bounds for per-product quantities.
///
/// The cart merges whatever it is given; pages clamp with this first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityPolicy {
  max_per_product: i32,
}

impl QuantityPolicy {
  /// A maximum below 1 is raised to 1.
  pub fn new(max_per_product: i32) -> Self {
    Self {
      max_per_product: max_per_product.max(1),
    }
  }

  pub fn from_config(config: &CartConfig) -> Self {
    Self::new(config.max_per_product)
  }

  pub fn max_per_product(&self) -> i32 {
    self.max_per_product
  }

  /// Pulls `requested` into `1..=max_per_product`.
  pub fn clamp(&self, requested: i32) -> i32 {
    requested.clamp(1, self.max_per_product)
  }

  pub fn can_increase(&self, current: i32) -> bool {
    current < self.max_per_product
  }

  pub fn can_decrease(&self, current: i32) -> bool {
    current > 1
  }

  /// How many more units may be added on top of `current`.
  pub fn remaining(&self, current: i32) -> i32 {
    self.max_per_product.saturating_sub(current).max(0)
  }
}

impl Default for QuantityPolicy {
  fn default() -> Self {
    Self::from_config(&CartConfig::default())
  }
}
