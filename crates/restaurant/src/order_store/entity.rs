//! StoredEntity trait implementation for the Order domain type.
//!
//! Status changes and line edits are [`OrderAction`]s; plain `update` remains available
//! for whole-record writes.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::model::{Order, OrderId};
use entity_store::StoredEntity;

impl StoredEntity for Order {
    type Id = OrderId;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn set_id(&mut self, id: OrderId) {
        self.id = id;
    }

    /// Supported fields: `user_id` (numeric) and `status` (e.g. `"PREPARING"`).
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "user_id" => Some(self.user_id.0.to_string()),
            "status" => Some(self.status().to_string()),
            _ => None,
        }
    }

    fn on_create(&mut self) -> Result<(), OrderError> {
        if self.lines().is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        Ok(())
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::StartPreparing => {
                self.start_preparing()?;
                Ok(OrderActionResult::StartPreparing(self.clone()))
            }
            OrderAction::MarkReady => {
                self.mark_ready()?;
                Ok(OrderActionResult::MarkReady(self.clone()))
            }
            OrderAction::Cancel => {
                self.cancel()?;
                Ok(OrderActionResult::Cancel(self.clone()))
            }
            OrderAction::MarkPaid => {
                self.mark_paid()?;
                Ok(OrderActionResult::MarkPaid(self.clone()))
            }
            OrderAction::AttachReview(review) => {
                self.attach_review(review)?;
                Ok(OrderActionResult::AttachReview(self.clone()))
            }
            OrderAction::AddDish { dish, quantity } => {
                if !self.is_editable() {
                    return Err(OrderError::NotEditable(self.status()));
                }
                self.add_dish(&dish, quantity)?;
                Ok(OrderActionResult::AddDish(self.clone()))
            }
            OrderAction::RemoveDish { dish, quantity } => {
                if !self.is_editable() {
                    return Err(OrderError::NotEditable(self.status()));
                }
                if !self.contains_dish(dish.id) {
                    return Err(OrderError::LineNotFound(dish.id));
                }
                let removed = self.remove_dish(&dish, quantity)?;
                Ok(OrderActionResult::RemoveDish(removed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dish, DishId, OrderStatus, UserId};
    use entity_store::StoreError;

    fn soup() -> Dish {
        Dish {
            id: DishId(1),
            name: "Soup".into(),
            description: String::new(),
            quantity: 10,
            cooking_time_minutes: 4,
            price: 6.0,
        }
    }

    fn accepted_order() -> Order {
        let mut order = Order::new(UserId(7));
        order.add_dish(&soup(), 1).unwrap();
        order
    }

    #[tokio::test]
    async fn test_find_by_user_and_status() {
        let (actor, client) = crate::order_store::new(8);
        tokio::spawn(actor.run());

        let id = client.create(accepted_order()).await.unwrap();
        assert_eq!(id, OrderId(1));

        let by_user = client.find_by("user_id", "7").await.unwrap().unwrap();
        assert_eq!(by_user.id, id);
        let by_status = client.find_by("status", "ACCEPTED").await.unwrap();
        assert!(by_status.is_some());
        assert!(client.find_by("status", "READY").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_order_is_rejected() {
        let (actor, client) = crate::order_store::new(8);
        tokio::spawn(actor.run());

        let err = client.create(Order::new(UserId(1))).await.unwrap_err();
        assert!(matches!(err, StoreError::EntityError(_)));
        assert_eq!(err.entity_error::<OrderError>(), Some(&OrderError::EmptyOrder));
    }

    #[test]
    fn test_edits_only_while_accepted() {
        let mut order = accepted_order();
        let added = order
            .handle_action(OrderAction::AddDish {
                dish: soup(),
                quantity: 2,
            })
            .unwrap();
        assert!(matches!(added, OrderActionResult::AddDish(o) if o.price() == 18.0));

        order.handle_action(OrderAction::StartPreparing).unwrap();
        let err = order
            .handle_action(OrderAction::RemoveDish {
                dish: soup(),
                quantity: 1,
            })
            .unwrap_err();
        assert_eq!(err, OrderError::NotEditable(OrderStatus::Preparing));
        assert_eq!(order.line_quantity(DishId(1)), Some(3));
    }

    #[test]
    fn test_remove_missing_line() {
        let mut order = accepted_order();
        let mut other = soup();
        other.id = DishId(2);

        let err = order
            .handle_action(OrderAction::RemoveDish {
                dish: other,
                quantity: 1,
            })
            .unwrap_err();
        assert_eq!(err, OrderError::LineNotFound(DishId(2)));
    }

    #[test]
    fn test_canceled_order_cannot_start() {
        let mut order = accepted_order();
        order.handle_action(OrderAction::Cancel).unwrap();

        let err = order.handle_action(OrderAction::StartPreparing).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                from: OrderStatus::Canceled,
                to: OrderStatus::Preparing
            }
        );
    }
}
