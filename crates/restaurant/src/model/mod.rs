//! Pure data structures for the kitchen: [`Dish`] and [`Order`] with their identifiers.
//!
//! The store integrations live next to their stores ([`crate::dish_store`],
//! [`crate::order_store`]); this module only knows about the data and its own rules.

pub mod dish;
pub mod order;

pub use dish::*;
pub use order::*;
