// cartstore/src/store/observers.rs

//! Observer registry for cart change notifications.
//!
//! Observers are plain callbacks receiving the full line-item list. The
//! registry never calls them while its own lock is held, so an observer may
//! subscribe or unsubscribe others from inside its callback.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{event, Level};

use crate::model::line_item::CartLineItem;

pub(crate) type Observer = Arc<dyn Fn(&[CartLineItem]) + Send + Sync>;

#[derive(Default)]
pub(crate) struct ObserverList {
  next_id: AtomicU64,
  observers: Mutex<Vec<(u64, Observer)>>,
}

impl ObserverList {
  pub(crate) fn register(&self, observer: Observer) -> u64 {
    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
    self.observers.lock().push((id, observer));
    event!(Level::TRACE, subscriber_id = id, "Observer registered.");
    id
  }

  pub(crate) fn unregister(&self, id: u64) -> bool {
    let mut observers = self.observers.lock();
    let before = observers.len();
    observers.retain(|(existing, _)| *existing != id);
    let removed = observers.len() != before;
    if removed {
      event!(Level::TRACE, subscriber_id = id, "Observer unregistered.");
    }
    removed
  }

  pub(crate) fn notify(&self, items: &[CartLineItem]) {
    // Copy out so callbacks run without the registry lock.
    let current: Vec<Observer> = self.observers.lock().iter().map(|(_, o)| Arc::clone(o)).collect();
    event!(Level::TRACE, observers = current.len(), items = items.len(), "Notifying observers.");
    for observer in current {
      observer(items);
    }
  }

  pub(crate) fn len(&self) -> usize {
    self.observers.lock().len()
  }
}

/// Handle returned by `CartStore::subscribe`.
///
/// Delivery stops when the handle is dropped or `unsubscribe` is called.
/// Holding a handle does not keep the store alive.
#[must_use = "dropping a Subscription immediately unsubscribes the observer"]
pub struct Subscription {
  id: u64,
  observers: Weak<ObserverList>,
}

impl Subscription {
  pub(crate) fn new(id: u64, observers: &Arc<ObserverList>) -> Self {
    Self {
      id,
      observers: Arc::downgrade(observers),
    }
  }

  /// Stops delivery to this observer.
  pub fn unsubscribe(self) {
    // Drop does the work.
  }

  /// False once the store has been dropped.
  pub fn is_active(&self) -> bool {
    self.observers.strong_count() > 0
  }

  fn detach(&self) {
    if let Some(observers) = self.observers.upgrade() {
      observers.unregister(self.id);
    }
  }
}

impl Drop for Subscription {
  fn drop(&mut self) {
    self.detach();
  }
}

impl std::fmt::Debug for Subscription {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("id", &self.id)
      .field("active", &self.is_active())
      .finish()
  }
}
