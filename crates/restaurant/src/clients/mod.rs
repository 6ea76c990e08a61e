//! Typed clients over the generic [`StoreClient`](entity_store::StoreClient).
//!
//! Each client implements [`StoreBacked`](entity_store::StoreBacked) for the common
//! reads and adds the domain calls (stock actions, status changes) on top.

pub mod dish_client;
pub mod order_client;

pub use dish_client::DishClient;
pub use order_client::OrderClient;
