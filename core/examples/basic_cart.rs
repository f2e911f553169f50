// cartstore/examples/basic_cart.rs

use cartstore::{CartConfig, CartLineItem, CartResult, CartStore, MemoryStorage, Product, QuantityPolicy, ShippingAddress};
use tracing::info;

fn main() -> CartResult<()> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Cart Example ---");

  // 1. One storage backend, one store. Clones of `cart` share the same cart.
  let storage = MemoryStorage::new();
  let cart = CartStore::open(storage.clone(), CartConfig::default());
  let policy = QuantityPolicy::from_config(cart.config());

  // 2. Watch the cart the way a header badge would.
  let _badge = cart.subscribe(|items: &[CartLineItem]| {
    let count: i32 = items.iter().map(|item| item.quantity).sum();
    info!("Badge shows {} item(s)", count);
  });

  // 3. Product pages clamp before adding.
  let chair = Product::new(1, "Ladder-back Chair", 49.99).with_image("chair.jpg");
  let board = Product::new(2, "End-grain Cutting Board", 35.0);
  cart.add_item(&chair, policy.clamp(2));
  cart.add_item(&chair, policy.clamp(1));
  cart.add_item(&board, policy.clamp(8));

  let snapshot = cart.snapshot();
  info!("Cart: {} line(s), {} item(s), total {:.2}", snapshot.items.len(), snapshot.item_count, snapshot.total);

  // 4. A second store over the same storage sees the persisted cart.
  let reloaded = CartStore::open(storage, CartConfig::default());
  info!("After reload: {:?}", reloaded.items().iter().map(|i| (i.product_id, i.quantity)).collect::<Vec<_>>());

  // 5. Checkout.
  let address = ShippingAddress {
    name: "Ada Joiner".into(),
    street: "12 Dovetail Lane".into(),
    city: "Portland".into(),
    state: "OR".into(),
    zip: "97201".into(),
    country: "US".into(),
  };
  let draft = cart.draft_order(address, "pi_demo_123")?;
  info!("Order request: {}", draft.request_json()?);
  cart.complete_order();
  info!("Cart empty after order: {}", cart.is_empty());

  Ok(())
}
