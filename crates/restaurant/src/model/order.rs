//! Represents a customer order and its line items.
//!
//! # Entity Store
//! [`Order`] implements [`StoredEntity`](entity_store::StoredEntity) in
//! [`crate::order_store`]. The store owns orders between scheduler operations; while an
//! order is queued or preparing the scheduler works on a copy and writes it back at every
//! status transition.
//!
//! # Lifecycle
//!
//! ```text
//! ACCEPTED ──► PREPARING ──► READY ──► PAID
//!    │             │
//!    └─────────────┴──► CANCELED
//! ```
//!
//! Status changes are crate-private: only the scheduler and the payment/rating flows
//! move an order along.
use crate::model::{Dish, DishId};
use crate::order_store::OrderError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Identifier of the customer who owns an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Accepted,
    Preparing,
    Ready,
    Paid,
    Canceled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Canceled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Paid => "PAID",
            OrderStatus::Canceled => "CANCELED",
        };
        f.write_str(s)
    }
}

/// One dish of an order. Quantities are always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub dish_id: DishId,
    pub quantity: u32,
}

/// A customer's rating, attached once the order is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    mark: u8,
    comment: String,
}

impl Review {
    /// Fails with [`OrderError::InvalidMark`] unless `mark` is within 1..=5.
    pub fn new(mark: u8, comment: impl Into<String>) -> Result<Self, OrderError> {
        if !(1..=5).contains(&mark) {
            return Err(OrderError::InvalidMark(mark));
        }
        Ok(Self {
            mark,
            comment: comment.into(),
        })
    }

    pub fn mark(&self) -> u8 {
        self.mark
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    status: OrderStatus,
    lines: Vec<LineItem>,
    price: f64,
    review: Option<Review>,
}

impl Order {
    /// Creates an empty, ACCEPTED order for `user_id`.
    ///
    /// The id is a placeholder until the store assigns one.
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: OrderId(0),
            user_id,
            created_at: Utc::now(),
            status: OrderStatus::Accepted,
            lines: Vec::new(),
            price: 0.0,
            review: None,
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Accumulated price: Σ unit price × quantity over the lines.
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn review(&self) -> Option<&Review> {
        self.review.as_ref()
    }

    pub fn line_quantity(&self, dish_id: DishId) -> Option<u32> {
        self.lines
            .iter()
            .find(|l| l.dish_id == dish_id)
            .map(|l| l.quantity)
    }

    pub fn contains_dish(&self, dish_id: DishId) -> bool {
        self.line_quantity(dish_id).is_some()
    }

    /// Lines can only be changed before the kitchen picks the order up.
    pub fn is_editable(&self) -> bool {
        self.status == OrderStatus::Accepted
    }

    /// Adds `quantity` portions of a dish, merging into an existing line.
    ///
    /// A merge that would overflow the line is rejected with
    /// [`OrderError::InvalidQuantity`] and leaves the order unchanged.
    pub fn add_line(&mut self, dish_id: DishId, quantity: u32) -> Result<(), OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity { dish_id });
        }
        match self.lines.iter_mut().find(|l| l.dish_id == dish_id) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or(OrderError::InvalidQuantity { dish_id })?;
            }
            None => self.lines.push(LineItem { dish_id, quantity }),
        }
        Ok(())
    }

    /// Removes up to `quantity` portions of a dish and returns how many were removed.
    ///
    /// Missing lines are a no-op (returns 0). A line that reaches zero is deleted.
    pub fn remove_line(&mut self, dish_id: DishId, quantity: u32) -> Result<u32, OrderError> {
        let Some(pos) = self.lines.iter().position(|l| l.dish_id == dish_id) else {
            return Ok(0);
        };
        let present = self.lines[pos].quantity;
        if quantity > present {
            return Err(OrderError::InsufficientLineQuantity {
                dish_id,
                requested: quantity,
                present,
            });
        }
        if quantity == present {
            self.lines.remove(pos);
        } else {
            self.lines[pos].quantity -= quantity;
        }
        Ok(quantity)
    }

    /// [`Order::add_line`] plus the matching price increase.
    pub fn add_dish(&mut self, dish: &Dish, quantity: u32) -> Result<(), OrderError> {
        self.add_line(dish.id, quantity)?;
        self.price += dish.price * f64::from(quantity);
        Ok(())
    }

    /// [`Order::remove_line`] plus the matching price decrease.
    pub fn remove_dish(&mut self, dish: &Dish, quantity: u32) -> Result<u32, OrderError> {
        let removed = self.remove_line(dish.id, quantity)?;
        // float drift must not push an emptied order below zero
        self.price = (self.price - dish.price * f64::from(removed)).max(0.0);
        Ok(removed)
    }

    fn transition(&mut self, allowed: &[OrderStatus], to: OrderStatus) -> Result<(), OrderError> {
        if !allowed.contains(&self.status) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    pub(crate) fn start_preparing(&mut self) -> Result<(), OrderError> {
        self.transition(&[OrderStatus::Accepted], OrderStatus::Preparing)
    }

    pub(crate) fn mark_ready(&mut self) -> Result<(), OrderError> {
        self.transition(&[OrderStatus::Preparing], OrderStatus::Ready)
    }

    pub(crate) fn cancel(&mut self) -> Result<(), OrderError> {
        self.transition(
            &[OrderStatus::Accepted, OrderStatus::Preparing],
            OrderStatus::Canceled,
        )
    }

    pub(crate) fn mark_paid(&mut self) -> Result<(), OrderError> {
        self.transition(&[OrderStatus::Ready], OrderStatus::Paid)
    }

    pub(crate) fn attach_review(&mut self, review: Review) -> Result<(), OrderError> {
        if self.status != OrderStatus::Paid {
            return Err(OrderError::NotPaid(self.status));
        }
        self.review = Some(review);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: u32, price: f64) -> Dish {
        Dish {
            id: DishId(id),
            name: format!("dish {id}"),
            description: String::new(),
            quantity: 10,
            cooking_time_minutes: 5,
            price,
        }
    }

    #[test]
    fn test_add_line_merges_existing() {
        let mut order = Order::new(UserId(1));
        order.add_line(DishId(1), 2).unwrap();
        order.add_line(DishId(2), 1).unwrap();
        order.add_line(DishId(1), 3).unwrap();

        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.line_quantity(DishId(1)), Some(5));
        assert_eq!(order.line_quantity(DishId(2)), Some(1));
    }

    #[test]
    fn test_add_line_rejects_overflowing_merge() {
        let mut order = Order::new(UserId(1));
        order.add_line(DishId(1), u32::MAX).unwrap();

        let err = order.add_line(DishId(1), 1).unwrap_err();
        assert_eq!(err, OrderError::InvalidQuantity { dish_id: DishId(1) });
        assert_eq!(order.line_quantity(DishId(1)), Some(u32::MAX));
    }

    #[test]
    fn test_add_line_rejects_zero() {
        let mut order = Order::new(UserId(1));
        let err = order.add_line(DishId(1), 0).unwrap_err();
        assert_eq!(err, OrderError::InvalidQuantity { dish_id: DishId(1) });
        assert!(order.lines().is_empty());
    }

    #[test]
    fn test_add_then_remove_restores_lines() {
        let mut order = Order::new(UserId(1));
        order.add_line(DishId(1), 2).unwrap();
        let before = order.lines().to_vec();

        order.add_line(DishId(1), 4).unwrap();
        order.remove_line(DishId(1), 4).unwrap();
        assert_eq!(order.lines(), before.as_slice());

        order.add_line(DishId(9), 1).unwrap();
        order.remove_line(DishId(9), 1).unwrap();
        assert_eq!(order.lines(), before.as_slice());
    }

    #[test]
    fn test_remove_line_edge_cases() {
        let mut order = Order::new(UserId(1));
        assert_eq!(order.remove_line(DishId(1), 3).unwrap(), 0);

        order.add_line(DishId(1), 2).unwrap();
        let err = order.remove_line(DishId(1), 3).unwrap_err();
        assert_eq!(
            err,
            OrderError::InsufficientLineQuantity {
                dish_id: DishId(1),
                requested: 3,
                present: 2
            }
        );
        assert_eq!(order.line_quantity(DishId(1)), Some(2));

        assert_eq!(order.remove_line(DishId(1), 1).unwrap(), 1);
        assert_eq!(order.line_quantity(DishId(1)), Some(1));
        assert_eq!(order.remove_line(DishId(1), 1).unwrap(), 1);
        assert!(!order.contains_dish(DishId(1)));
    }

    #[test]
    fn test_price_follows_lines() {
        let pasta = dish(1, 12.5);
        let soup = dish(2, 4.0);
        let mut order = Order::new(UserId(1));

        order.add_dish(&pasta, 2).unwrap();
        order.add_dish(&soup, 1).unwrap();
        assert_eq!(order.price(), 29.0);

        order.remove_dish(&pasta, 1).unwrap();
        assert_eq!(order.price(), 16.5);

        // nothing removed, nothing refunded
        assert_eq!(order.remove_dish(&dish(3, 100.0), 1).unwrap(), 0);
        assert_eq!(order.price(), 16.5);
    }

    #[test]
    fn test_status_transitions() {
        let mut order = Order::new(UserId(1));
        assert!(order.is_editable());
        assert!(order.mark_ready().is_err());

        order.start_preparing().unwrap();
        assert!(!order.is_editable());
        order.mark_ready().unwrap();

        let err = order.cancel().unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Ready,
                to: OrderStatus::Canceled
            }
        );

        order.mark_paid().unwrap();
        assert!(order.status().is_terminal());
        assert!(order.mark_paid().is_err());
    }

    #[test]
    fn test_cancel_from_accepted_and_preparing() {
        let mut queued = Order::new(UserId(1));
        queued.cancel().unwrap();
        assert_eq!(queued.status(), OrderStatus::Canceled);
        assert!(queued.cancel().is_err());

        let mut cooking = Order::new(UserId(1));
        cooking.start_preparing().unwrap();
        cooking.cancel().unwrap();
        assert_eq!(cooking.status(), OrderStatus::Canceled);
    }

    #[test]
    fn test_review_rules() {
        assert_eq!(Review::new(0, "").unwrap_err(), OrderError::InvalidMark(0));
        assert_eq!(Review::new(6, "").unwrap_err(), OrderError::InvalidMark(6));

        let review = Review::new(5, "great").unwrap();
        let mut order = Order::new(UserId(1));
        assert_eq!(
            order.attach_review(review.clone()).unwrap_err(),
            OrderError::NotPaid(OrderStatus::Accepted)
        );

        order.start_preparing().unwrap();
        order.mark_ready().unwrap();
        order.mark_paid().unwrap();
        order.attach_review(review).unwrap();
        assert_eq!(order.review().map(Review::mark), Some(5));
    }
}
