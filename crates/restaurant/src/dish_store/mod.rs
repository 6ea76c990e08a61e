//! # Dish Store
//!
//! This module implements the menu store: dish records plus the stock actions orders
//! depend on.
//!
//! ## Structure
//!
//! - [`entity`] - [`StoredEntity`](entity_store::StoredEntity) implementation for [`Dish`]
//! - [`error`] - [`DishError`] type for type-safe error handling
//! - [`actions`] - [`DishAction`] and [`DishActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Stock Actions
//!
//! Stock changes run inside the store actor, so two orders can never both take the last
//! portion of a dish:
//!
//! ```rust,ignore
//! let on_hand = dish_client.check_stock(dish_id).await?;
//! dish_client.reserve(dish_id, 2).await?;   // fails with InsufficientStock
//! dish_client.restock(dish_id, 2).await?;   // an order line was removed
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use restaurant::clients::DishClient;
//! use restaurant::dish_store;
//! use restaurant::model::DishCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, store) = dish_store::new(32);
//!     let client = DishClient::new(store);
//!     tokio::spawn(actor.run());
//!
//!     let id = client
//!         .create_dish(DishCreate {
//!             name: "Ramen".to_string(),
//!             description: "Pork broth".to_string(),
//!             quantity: 10,
//!             cooking_time_minutes: 12,
//!             price: 11.0,
//!         })
//!         .await?;
//!
//!     client.reserve(id, 3).await?;
//!     assert_eq!(client.check_stock(id).await?, 7);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Dish;
use entity_store::{StoreActor, StoreClient};

/// Creates a new Dish store actor and its client.
pub fn new(buffer_size: usize) -> (StoreActor<Dish>, StoreClient<Dish>) {
    StoreActor::new(buffer_size)
}
