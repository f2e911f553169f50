// cartstore/src/order/draft.rs

use serde::{Deserialize, Serialize};

use crate::error::{CartResult, OrderDraftError};
use crate::model::line_item::ProductId;
use crate::model::snapshot::CartSnapshot;

/// Where the order ships to. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
  pub name: String,
  pub street: String,
  pub city: String,
  pub state: String,
  pub zip: String,
  pub country: String,
}

impl ShippingAddress {
  /// Fails on the first blank field, in form order.
  pub fn validate(&self) -> Result<(), OrderDraftError> {
    let fields = [
      ("name", &self.name),
      ("street", &self.street),
      ("city", &self.city),
      ("state", &self.state),
      ("zip", &self.zip),
      ("country", &self.country),
    ];
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
      Some((field, _)) => Err(OrderDraftError::MissingShippingField(*field)),
      None => Ok(()),
    }
  }
}

/// One `{product_id, quantity}` entry of the request. Prices are not sent;
/// the server prices the order itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
  pub product_id: ProductId,
  pub quantity: i32,
}

/// Body of the remote order-creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
  pub items: Vec<OrderLine>,
  pub shipping_address: ShippingAddress,
  pub payment_intent_id: String,
}

/// A validated order request plus the amount the payment intent was created for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraft {
  pub request: CreateOrderRequest,
  pub amount: f64,
}

impl OrderDraft {
  pub fn from_snapshot(
    snapshot: &CartSnapshot,
    address: ShippingAddress,
    payment_intent_id: impl Into<String>,
  ) -> Result<Self, OrderDraftError> {
    address.validate()?;
    if snapshot.is_empty() {
      return Err(OrderDraftError::EmptyCart);
    }
    let payment_intent_id = payment_intent_id.into();
    if payment_intent_id.trim().is_empty() {
      return Err(OrderDraftError::MissingPaymentIntent);
    }

    let items = snapshot
      .items
      .iter()
      .map(|item| OrderLine {
        product_id: item.product_id,
        quantity: item.quantity,
      })
      .collect();

    Ok(Self {
      request: CreateOrderRequest {
        items,
        shipping_address: address,
        payment_intent_id,
      },
      amount: snapshot.total,
    })
  }

  /// The request body as sent to the order API.
  pub fn request_json(&self) -> CartResult<String> {
    Ok(serde_json::to_string(&self.request)?)
  }
}
