// cartstore/src/model/line_item.rs

use serde::{Deserialize, Serialize};

use crate::model::product::Product;

pub type ProductId = i64;

/// One distinct product in the cart with its quantity and price snapshot.
///
/// Field names match the persisted layout, which predates this crate:
/// everything is snake_case except `imageUrl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
  pub product_id: ProductId,
  pub product_name: String,
  pub quantity: i32,
  pub unit_price: f64,
  #[serde(rename = "imageUrl", default)]
  pub image_url: String,
  pub subtotal: f64,
}

impl CartLineItem {
  /// Snapshots `product` with the given quantity. `quantity` must already be >= 1.
  pub(crate) fn from_product(product: &Product, quantity: i32) -> Self {
    let mut item = Self {
      product_id: product.id,
      product_name: product.name.clone(),
      quantity,
      unit_price: product.price,
      image_url: product.thumbnail_url().to_string(),
      subtotal: 0.0,
    };
    item.recompute_subtotal();
    item
  }

  pub(crate) fn set_quantity(&mut self, quantity: i32) {
    self.quantity = quantity;
    self.recompute_subtotal();
  }

  pub(crate) fn add_quantity(&mut self, quantity: i32) {
    self.set_quantity(self.quantity.saturating_add(quantity));
  }

  pub(crate) fn recompute_subtotal(&mut self) {
    self.subtotal = f64::from(self.quantity) * self.unit_price;
  }

  /// Whether this item could have been produced by the store.
  pub(crate) fn is_well_formed(&self) -> bool {
    self.quantity >= 1 && self.unit_price.is_finite() && self.unit_price >= 0.0
  }
}
