//! Error types for the kitchen scheduler.

use crate::model::{DishId, OrderId, OrderStatus};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchedulerError {
    /// An order line refers to a dish the menu does not have.
    #[error("Unknown dish: {0}")]
    UnknownDish(DishId),

    /// The order has no running preparation task.
    #[error("{0} is not being prepared")]
    NotInFlight(OrderId),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("{order_id} cannot be canceled in status {status}")]
    InvalidState {
        order_id: OrderId,
        status: OrderStatus,
    },

    /// A store read or write failed. Never retried.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Capacity gate closed")]
    GateClosed,
}
