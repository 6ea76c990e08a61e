//! Error types for dishes.

use crate::model::DishId;
use thiserror::Error;

/// Errors that can occur during dish operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DishError {
    /// The requested dish was not found.
    #[error("Dish not found: {0}")]
    NotFound(DishId),

    /// The requested quantity exceeds the portions on hand.
    #[error("Insufficient stock for {dish_id}: requested {requested}, available {available}")]
    InsufficientStock {
        dish_id: DishId,
        requested: u32,
        available: u32,
    },

    #[error("Dish name must not be empty")]
    EmptyName,

    #[error("Dish quantity must be at least 1")]
    InvalidQuantity,

    #[error("Cooking time must be at least 1 minute")]
    InvalidCookingTime,

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// The dish is still part of an order the kitchen has not finished.
    #[error("{0} is part of an order in progress")]
    InUse(DishId),

    /// An error occurred while communicating with the store actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
