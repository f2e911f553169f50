// cartstore/src/order/mod.rs

//! Checkout-side reconciliation of a cart into an order-creation request.

pub mod draft;
