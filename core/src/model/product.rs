// cartstore/src/model/product.rs

use serde::{Deserialize, Serialize};

use crate::model::line_item::ProductId;

/// A catalog product as received from the products API.
///
/// Only the fields the cart snapshots on add are modelled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub price: f64,
  #[serde(default)]
  pub image_urls: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl Product {
  pub fn new(id: ProductId, name: impl Into<String>, price: f64) -> Self {
    Self {
      id,
      name: name.into(),
      price,
      image_urls: Vec::new(),
      description: None,
    }
  }

  pub fn with_image(mut self, url: impl Into<String>) -> Self {
    self.image_urls.push(url.into());
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  /// The first image, or an empty string when the product has none.
  pub fn thumbnail_url(&self) -> &str {
    self.image_urls.first().map(String::as_str).unwrap_or("")
  }
}
