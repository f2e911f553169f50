// cartstore/src/store/cart_store.rs

//! Defines `CartStore`, the authoritative client-side cart.
//!
//! The store owns the line-item list, writes it to a `CartStorage` slot after
//! every mutation, and notifies subscribers with the new list. Storage
//! failures are logged and swallowed: the cart degrades to in-memory only and
//! no operation ever returns a storage error.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::{ReentrantMutex, RwLock};
use tracing::{event, instrument, Level};

use crate::config::CartConfig;
use crate::error::{CartError, CartResult, OrderDraftError};
use crate::model::line_item::{CartLineItem, ProductId};
use crate::model::product::Product;
use crate::model::snapshot::{item_count_of, total_of, CartSnapshot};
use crate::order::draft::{OrderDraft, ShippingAddress};
use crate::storage::memory::MemoryStorage;
use crate::storage::CartStorage;
use crate::store::observers::{ObserverList, Subscription};

struct CartInner {
  items: RwLock<Vec<CartLineItem>>,
  // Serializes mutate-then-notify so every observer sees states in mutation
  // order. Reentrant so an observer may mutate the store from its callback;
  // such nested states are queued and delivered by the outermost mutation.
  publish: ReentrantMutex<RefCell<Deliveries>>,
  observers: Arc<ObserverList>,
  storage: Box<dyn CartStorage>,
  config: CartConfig,
}

/// States waiting to reach observers. Only touched with `publish` held.
#[derive(Default)]
struct Deliveries {
  pending: VecDeque<Vec<CartLineItem>>,
  draining: bool,
}

/// Resets the queue when the outermost drain ends, including by an observer panic.
struct DrainGuard<'a>(&'a RefCell<Deliveries>);

impl Drop for DrainGuard<'_> {
  fn drop(&mut self) {
    let mut deliveries = self.0.borrow_mut();
    deliveries.draining = false;
    deliveries.pending.clear();
  }
}

/// Shared handle to a cart. Clones refer to the same cart.
#[derive(Clone)]
pub struct CartStore {
  inner: Arc<CartInner>,
}

impl CartStore {
  /// Builds a store over `storage`, restoring whatever is under
  /// `config.storage_key`. Missing or unreadable data yields an empty cart.
  #[instrument(name = "CartStore::open", skip_all, fields(storage_key = %config.storage_key))]
  pub fn open(storage: impl CartStorage + 'static, config: CartConfig) -> Self {
    let items = restore(&storage, &config.storage_key);
    event!(Level::DEBUG, items = items.len(), "Cart store opened.");
    Self {
      inner: Arc::new(CartInner {
        items: RwLock::new(items),
        publish: ReentrantMutex::new(RefCell::new(Deliveries::default())),
        observers: Arc::new(ObserverList::default()),
        storage: Box::new(storage),
        config,
      }),
    }
  }

  /// An empty cart backed by a private `MemoryStorage`.
  pub fn in_memory() -> Self {
    Self::open(MemoryStorage::new(), CartConfig::default())
  }

  pub fn config(&self) -> &CartConfig {
    &self.inner.config
  }

  // --- Mutations ---

  /// Adds `quantity` of `product`, merging into an existing line for the same product.
  ///
  /// A new line snapshots the product's name, price, and thumbnail; a merge
  /// keeps the snapshot taken on first add. Returns false (and changes
  /// nothing) when `quantity` is below 1. No upper bound is applied here;
  /// see `QuantityPolicy`.
  #[instrument(name = "CartStore::add_item", skip(self, product), fields(product_id = product.id))]
  pub fn add_item(&self, product: &Product, quantity: i32) -> bool {
    if quantity < 1 {
      event!(Level::DEBUG, quantity, "Ignoring add with non-positive quantity.");
      return false;
    }
    self.mutate("add_item", |items| {
      match items.iter_mut().find(|item| item.product_id == product.id) {
        Some(existing) => existing.add_quantity(quantity),
        None => items.push(CartLineItem::from_product(product, quantity)),
      }
      true
    })
  }

  /// Sets the quantity of a line. Zero or less removes the line; an absent product is a no-op.
  #[instrument(name = "CartStore::update_quantity", skip(self))]
  pub fn update_quantity(&self, product_id: ProductId, quantity: i64) {
    if quantity <= 0 {
      self.remove_item(product_id);
      return;
    }
    let quantity = i32::try_from(quantity).unwrap_or(i32::MAX);
    self.mutate("update_quantity", |items| {
      match items.iter_mut().find(|item| item.product_id == product_id) {
        Some(existing) => {
          existing.set_quantity(quantity);
          true
        }
        None => false,
      }
    });
  }

  /// Removes the line for `product_id`, if any.
  #[instrument(name = "CartStore::remove_item", skip(self))]
  pub fn remove_item(&self, product_id: ProductId) {
    self.mutate("remove_item", |items| {
      let before = items.len();
      items.retain(|item| item.product_id != product_id);
      items.len() != before
    });
  }

  /// Empties the cart. Always persists and notifies, even if already empty.
  #[instrument(name = "CartStore::clear", skip(self))]
  pub fn clear(&self) {
    self.mutate("clear", |items| {
      items.clear();
      true
    });
  }

  // --- Reads ---

  /// Current items and totals. Computed on every call.
  pub fn snapshot(&self) -> CartSnapshot {
    CartSnapshot::from_items(self.items())
  }

  pub fn items(&self) -> Vec<CartLineItem> {
    self.inner.items.read().clone()
  }

  pub fn total(&self) -> f64 {
    total_of(&self.inner.items.read())
  }

  pub fn item_count(&self) -> i64 {
    item_count_of(&self.inner.items.read())
  }

  pub fn is_empty(&self) -> bool {
    self.inner.items.read().is_empty()
  }

  pub fn is_in_cart(&self, product_id: ProductId) -> bool {
    self.inner.items.read().iter().any(|item| item.product_id == product_id)
  }

  /// Quantity of `product_id` in the cart, 0 if absent.
  pub fn quantity_of(&self, product_id: ProductId) -> i32 {
    self
      .inner
      .items
      .read()
      .iter()
      .find(|item| item.product_id == product_id)
      .map_or(0, |item| item.quantity)
  }

  // --- Notifications ---

  /// Registers `observer`. It is called right away with the current items,
  /// then after every mutation, until the returned handle is dropped.
  ///
  /// Observers run on the mutating thread while the store's publish lock is
  /// held. From the callback they may read the store or mutate it (the new
  /// state is delivered to every observer once the current round finishes),
  /// but they must not block on another thread that uses the same store:
  /// that thread waits for the lock and the two deadlock.
  pub fn subscribe<F>(&self, observer: F) -> Subscription
  where
    F: Fn(&[CartLineItem]) + Send + Sync + 'static,
  {
    let _publish = self.inner.publish.lock();
    let observer: Arc<dyn Fn(&[CartLineItem]) + Send + Sync> = Arc::new(observer);
    let id = self.inner.observers.register(Arc::clone(&observer));
    let current = self.items();
    observer(&current);
    Subscription::new(id, &self.inner.observers)
  }

  pub fn subscriber_count(&self) -> usize {
    self.inner.observers.len()
  }

  // --- Checkout ---

  /// Builds the order-creation request for the current cart. The cart is left untouched.
  pub fn draft_order(
    &self,
    address: ShippingAddress,
    payment_intent_id: impl Into<String>,
  ) -> Result<OrderDraft, OrderDraftError> {
    OrderDraft::from_snapshot(&self.snapshot(), address, payment_intent_id)
  }

  /// Empties the cart once the remote order API has accepted the order.
  pub fn complete_order(&self) {
    event!(Level::INFO, items = self.inner.items.read().len(), "Order placed; clearing cart.");
    self.clear();
  }

  // --- Internals ---

  /// Applies `f` to a copy of the list and, if it reports a change, swaps the
  /// copy in, writes the slot, and notifies. Returns whether anything changed.
  fn mutate<F>(&self, op: &'static str, f: F) -> bool
  where
    F: FnOnce(&mut Vec<CartLineItem>) -> bool,
  {
    let publish = self.inner.publish.lock();
    let published = {
      let mut guard = self.inner.items.write();
      let mut next = guard.clone();
      if !f(&mut next) {
        event!(Level::TRACE, op, "No change; skipping persist and notify.");
        return false;
      }
      *guard = next;
      self.persist(op, &guard);
      guard.clone()
    };
    event!(Level::DEBUG, op, items = published.len(), "Cart updated.");
    publish.borrow_mut().pending.push_back(published);
    self.deliver(&publish);
    true
  }

  /// Hands queued states to every observer, oldest first. A mutation made
  /// from inside an observer only enqueues; the outermost call drains, so each
  /// observer's last delivery is the store's current state.
  fn deliver(&self, deliveries: &RefCell<Deliveries>) {
    {
      let mut state = deliveries.borrow_mut();
      if state.draining {
        event!(Level::TRACE, queued = state.pending.len(), "Delivery in progress; state queued.");
        return;
      }
      state.draining = true;
    }
    let _drain = DrainGuard(deliveries);
    loop {
      let next = deliveries.borrow_mut().pending.pop_front();
      match next {
        Some(items) => self.inner.observers.notify(&items),
        None => break,
      }
    }
  }

  fn persist(&self, op: &'static str, items: &[CartLineItem]) {
    let key = &self.inner.config.storage_key;
    let encoded = match serde_json::to_string(items) {
      Ok(encoded) => encoded,
      Err(e) => {
        event!(Level::WARN, op, key = %key, error = %e, "Failed to encode cart; keeping in-memory state only.");
        return;
      }
    };
    if let Err(e) = self.inner.storage.save(key, &encoded) {
      event!(Level::WARN, op, key = %key, error = %e, "Failed to persist cart; keeping in-memory state only.");
    }
  }
}

impl std::fmt::Debug for CartStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartStore")
      .field("storage_key", &self.inner.config.storage_key)
      .field("items", &*self.inner.items.read())
      .field("subscribers", &self.inner.observers.len())
      .finish()
  }
}

fn restore(storage: &dyn CartStorage, key: &str) -> Vec<CartLineItem> {
  let raw = match storage.load(key) {
    Ok(Some(raw)) => raw,
    Ok(None) => {
      event!(Level::DEBUG, key, "No persisted cart; starting empty.");
      return Vec::new();
    }
    Err(e) => {
      event!(Level::WARN, key, error = %e, "Failed to read persisted cart; starting empty.");
      return Vec::new();
    }
  };
  match decode_items(&raw) {
    Ok(items) => items,
    Err(e) => {
      event!(Level::WARN, key, error = %e, "Discarding unreadable persisted cart; starting empty.");
      Vec::new()
    }
  }
}

/// Parses a persisted list, rejecting anything the store could not have written.
pub(crate) fn decode_items(raw: &str) -> CartResult<Vec<CartLineItem>> {
  let mut items: Vec<CartLineItem> = serde_json::from_str(raw)?;
  let mut seen = HashSet::with_capacity(items.len());
  for item in &mut items {
    if !item.is_well_formed() {
      return Err(CartError::InvalidPersistedCart(format!(
        "line for product {} has quantity {} and unit price {}",
        item.product_id, item.quantity, item.unit_price
      )));
    }
    if !seen.insert(item.product_id) {
      return Err(CartError::InvalidPersistedCart(format!(
        "product {} appears more than once",
        item.product_id
      )));
    }
    item.recompute_subtotal();
  }
  Ok(items)
}
