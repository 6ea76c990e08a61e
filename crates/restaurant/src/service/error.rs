use crate::dish_store::DishError;
use crate::model::{DishId, OrderId, OrderStatus};
use crate::order_store::OrderError;
use crate::scheduler::SchedulerError;
use thiserror::Error;

/// Errors returned by the menu and order flows.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error(transparent)]
    Dish(#[from] DishError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Unknown dish: {0}")]
    UnknownDish(DishId),

    #[error("An order needs at least one dish")]
    EmptyOrder,

    #[error("{0} is already ready")]
    AlreadyReady(OrderId),

    #[error("{0} is already paid")]
    AlreadyPaid(OrderId),

    #[error("{0} was canceled")]
    Canceled(OrderId),

    #[error("{order_id} is not ready yet (status is {status})")]
    NotReady {
        order_id: OrderId,
        status: OrderStatus,
    },
}
