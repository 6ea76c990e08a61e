//! Error types for orders.

use crate::model::{DishId, OrderStatus};
use thiserror::Error;

/// Rule violations of the order aggregate, plus store communication failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// A line quantity must be strictly positive.
    #[error("Invalid quantity for {dish_id}: must be at least 1")]
    InvalidQuantity { dish_id: DishId },

    /// Removing more portions than the line holds.
    #[error("Cannot remove {requested} of {dish_id}: only {present} in the order")]
    InsufficientLineQuantity {
        dish_id: DishId,
        requested: u32,
        present: u32,
    },

    #[error("Order cannot go from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Review mark must be between 1 and 5, got {0}")]
    InvalidMark(u8),

    #[error("Only paid orders can be reviewed (status is {0})")]
    NotPaid(OrderStatus),

    #[error("Order can no longer be changed (status is {0})")]
    NotEditable(OrderStatus),

    #[error("Order has no line for {0}")]
    LineNotFound(DishId),

    #[error("An order needs at least one dish")]
    EmptyOrder,

    /// An error occurred while communicating with the store actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
