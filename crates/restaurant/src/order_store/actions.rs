//! Custom actions for the Order store.
//!
//! Every status change and line edit is a conditional update executed inside the store
//! actor: the rule check and the write happen in one step, so a preparation task and a
//! customer editing or canceling the same order cannot overwrite each other.

use crate::model::{Dish, Order, Review};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// ACCEPTED → PREPARING.
    StartPreparing,
    /// PREPARING → READY.
    MarkReady,
    /// ACCEPTED or PREPARING → CANCELED.
    Cancel,
    /// READY → PAID.
    MarkPaid,
    /// Only on PAID orders.
    AttachReview(Review),
    /// Adds portions and their price. Only while ACCEPTED.
    AddDish { dish: Dish, quantity: u32 },
    /// Removes portions and their price. Only while ACCEPTED, and the line must exist.
    RemoveDish { dish: Dish, quantity: u32 },
}

/// Results from OrderActions - variants match 1:1 with OrderAction.
///
/// Most carry the order as stored after the action; `RemoveDish` carries the number of
/// portions actually removed.
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    StartPreparing(Order),
    MarkReady(Order),
    Cancel(Order),
    MarkPaid(Order),
    AttachReview(Order),
    AddDish(Order),
    RemoveDish(u32),
}
