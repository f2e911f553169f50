// cartstore/src/store/mod.rs

pub mod cart_store;
pub mod observers;
