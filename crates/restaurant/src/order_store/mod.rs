//! # Order Store
//!
//! The store actor that keeps [`Order`] records.
//!
//! ## Structure
//!
//! - [`entity`] - [`StoredEntity`](entity_store::StoredEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`], the aggregate's rule violations
//! - [`actions`] - [`OrderAction`] and [`OrderActionResult`] for status changes and line edits
//! - [`new()`] - Factory function that creates the actor and client
//!
//! Orders are looked up by `user_id` and `status` through
//! [`StoreClient::find_by`](entity_store::StoreClient::find_by); anything that needs every
//! match filters [`StoreClient::list`](entity_store::StoreClient::list).

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use entity_store::{StoreActor, StoreClient};

/// Creates a new Order store actor and its client.
pub fn new(buffer_size: usize) -> (StoreActor<Order>, StoreClient<Order>) {
    StoreActor::new(buffer_size)
}
