// cartstore/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors raised by a `CartStorage` backend.
///
/// The cart store itself never returns these to its callers; it logs them
/// and keeps working in memory. They are public so backends and the demo
/// can report them.
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("Storage I/O failed for key '{key}'. Source: {source}")]
  Io {
    key: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Invalid storage key '{key}': only ASCII alphanumerics, '_', '-' and '.' are allowed")]
  InvalidKey { key: String },

  #[error("Storage backend failed for key '{key}'. Source: {source}")]
  Backend {
    key: String,
    #[source]
    source: AnyhowError,
  },
}

impl StorageError {
  /// Wraps an arbitrary backend error for `key`.
  pub fn backend(key: impl Into<String>, source: impl Into<AnyhowError>) -> Self {
    StorageError::Backend {
      key: key.into(),
      source: source.into(),
    }
  }
}

/// Validation failures when turning a cart into an order-creation request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderDraftError {
  #[error("Cannot place an order from an empty cart")]
  EmptyCart,

  #[error("Shipping address field '{0}' is required")]
  MissingShippingField(&'static str),

  #[error("A confirmed payment intent id is required")]
  MissingPaymentIntent,
}

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Cart storage error: {source}")]
  Storage {
    #[from]
    source: StorageError,
  },

  #[error("Order draft error: {source}")]
  OrderDraft {
    #[from]
    source: OrderDraftError,
  },

  #[error("Cart serialization error: {source}")]
  Serialization {
    #[from]
    source: serde_json::Error,
  },

  #[error("Persisted cart rejected: {0}")]
  InvalidPersistedCart(String),
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
