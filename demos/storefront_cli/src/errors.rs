// storefront_cli/src/errors.rs

use cartstore::{CartError, OrderDraftError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Cart Error: {source}")]
  Cart {
    #[from] // Allows conversion from cartstore::CartError
    source: CartError,
  },

  #[error("Output Error: {0}")]
  Output(#[from] serde_json::Error),
}

// Draft validation failures are user-facing; keep them under the cart variant.
impl From<OrderDraftError> for AppError {
  fn from(err: OrderDraftError) -> Self {
    AppError::Cart { source: err.into() }
  }
}

impl AppError {
  /// Process exit code for this error.
  pub fn exit_code(&self) -> i32 {
    match self {
      AppError::Validation(_) => 2,
      AppError::Config(_) => 78,
      AppError::Cart {
        source: CartError::OrderDraft { .. },
      } => 3,
      AppError::Cart { .. } | AppError::Output(_) => 1,
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
