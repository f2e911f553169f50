// cartstore/src/model/mod.rs

//! Data carried by the cart: catalog input, stored line items, and derived snapshots.

pub mod line_item;
pub mod product;
pub mod snapshot;

pub use line_item::{CartLineItem, ProductId};
pub use product::Product;
pub use snapshot::CartSnapshot;
