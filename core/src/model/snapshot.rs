// cartstore/src/model/snapshot.rs

use serde::Serialize;

use crate::model::line_item::CartLineItem;

/// Read-only view of the cart with totals computed at the time it was taken.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
  pub items: Vec<CartLineItem>,
  pub total: f64,
  pub item_count: i64,
}

impl CartSnapshot {
  pub fn from_items(items: Vec<CartLineItem>) -> Self {
    let total = total_of(&items);
    let item_count = item_count_of(&items);
    Self {
      items,
      total,
      item_count,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

// Left-to-right sum, no rounding.
pub(crate) fn total_of(items: &[CartLineItem]) -> f64 {
  items.iter().fold(0.0, |sum, item| sum + item.subtotal)
}

pub(crate) fn item_count_of(items: &[CartLineItem]) -> i64 {
  items.iter().map(|item| i64::from(item.quantity)).sum()
}
