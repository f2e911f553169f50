// cartstore/src/lib.rs

//! Cartstore: a persistent, observable client-side shopping cart.
//!
//! The cart keeps one line item per product with a price snapshot taken at
//! the time of add, and offers:
//!  - Merge-on-add quantities and derived subtotals/totals.
//!  - Persistence of the whole list to a durable key-value slot after every mutation.
//!  - Graceful fallback to an empty, in-memory cart when the slot is missing or corrupt.
//!  - Change notification with replay of the current state on subscribe.
//!  - Reconciliation of the cart into an order-creation request at checkout.

pub mod config;
pub mod error;
pub mod model;
pub mod order;
pub mod quantity;
pub mod storage;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::config::{CartConfig, DEFAULT_STORAGE_KEY};
pub use crate::error::{CartError, CartResult, OrderDraftError, StorageError};

pub use crate::model::line_item::{CartLineItem, ProductId};
pub use crate::model::product::Product;
pub use crate::model::snapshot::CartSnapshot;

pub use crate::order::draft::{CreateOrderRequest, OrderDraft, OrderLine, ShippingAddress};
pub use crate::quantity::QuantityPolicy;

pub use crate::storage::file::FileStorage;
pub use crate::storage::memory::MemoryStorage;
pub use crate::storage::CartStorage;

pub use crate::store::cart_store::CartStore;
pub use crate::store::observers::Subscription;

/*
    Typical flow:
    1. Pick a `CartStorage` backend (`MemoryStorage` in tests, `FileStorage` on disk).
    2. Build the store once with `CartStore::open(storage, CartConfig::default())`
       and hand clones of it to whatever needs the cart.
    3. Clamp requested quantities with `QuantityPolicy` before calling `add_item`.
    4. Render from `snapshot()`, or `subscribe()` to get the item list after each change.
    5. At checkout call `draft_order(address, payment_intent_id)`, send the request,
       and call `complete_order()` once the remote API confirms it.
*/
