// storefront_cli/src/commands.rs

//! One cart operation per invocation; every command prints JSON on success.

use crate::errors::{AppError, Result};
use cartstore::{CartStore, Product, QuantityPolicy, ShippingAddress};
use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Add a product, merging with an existing line. The quantity is clamped to the per-product limit.
  Add {
    #[arg(long)]
    id: i64,
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    image: Option<String>,
    #[arg(long, short = 'q', default_value_t = 1)]
    quantity: i32,
  },
  /// Set the quantity of a line; zero or less removes it.
  Update {
    id: i64,
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
  },
  /// Remove a line.
  Remove { id: i64 },
  /// Empty the cart.
  Clear,
  /// Print the cart with totals.
  Show,
  /// Print the order-creation request for the current cart.
  Draft(DraftArgs),
  /// Empty the cart after the order API accepted the order.
  Complete,
}

#[derive(Debug, Args)]
pub struct DraftArgs {
  #[arg(long)]
  pub payment_intent: String,
  #[arg(long)]
  pub name: String,
  #[arg(long)]
  pub street: String,
  #[arg(long)]
  pub city: String,
  #[arg(long)]
  pub state: String,
  #[arg(long)]
  pub zip: String,
  #[arg(long)]
  pub country: String,
}

#[derive(Serialize)]
struct ChangeReport {
  changed: bool,
  #[serde(rename = "itemCount")]
  item_count: i64,
  total: f64,
}

fn report(cart: &CartStore, changed: bool) -> Result<String> {
  let snapshot = cart.snapshot();
  Ok(serde_json::to_string(&ChangeReport {
    changed,
    item_count: snapshot.item_count,
    total: snapshot.total,
  })?)
}

pub fn run(command: Command, cart: &CartStore, policy: &QuantityPolicy) -> Result<String> {
  match command {
    Command::Add {
      id,
      name,
      price,
      image,
      quantity,
    } => {
      if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(format!("price must be a non-negative number, got {}", price)));
      }
      let mut product = Product::new(id, name, price);
      if let Some(image) = image {
        product = product.with_image(image);
      }
      let quantity = policy.clamp(quantity);
      let room = policy.remaining(cart.quantity_of(id));
      if room == 0 {
        info!(product_id = id, max = policy.max_per_product(), "Product already at its limit.");
        return report(cart, false);
      }
      let changed = cart.add_item(&product, quantity.min(room));
      report(cart, changed)
    }
    Command::Update { id, quantity } => {
      let before = cart.items();
      cart.update_quantity(id, quantity);
      report(cart, cart.items() != before)
    }
    Command::Remove { id } => {
      let existed = cart.is_in_cart(id);
      cart.remove_item(id);
      report(cart, existed)
    }
    Command::Clear => {
      cart.clear();
      report(cart, true)
    }
    Command::Show => Ok(serde_json::to_string_pretty(&cart.snapshot())?),
    Command::Draft(args) => {
      let address = ShippingAddress {
        name: args.name,
        street: args.street,
        city: args.city,
        state: args.state,
        zip: args.zip,
        country: args.country,
      };
      let draft = cart.draft_order(address, args.payment_intent)?;
      info!(amount = draft.amount, lines = draft.request.items.len(), "Order draft ready.");
      Ok(serde_json::to_string_pretty(&draft)?)
    }
    Command::Complete => {
      cart.complete_order();
      report(cart, true)
    }
  }
}
