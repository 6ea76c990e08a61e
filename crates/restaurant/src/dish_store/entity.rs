//! StoredEntity trait implementation for the Dish domain type.
//!
//! Includes the stock actions and the validation run when a dish is added to the menu.

use super::actions::{DishAction, DishActionResult};
use super::error::DishError;
use crate::model::{Dish, DishId};
use entity_store::StoredEntity;

impl StoredEntity for Dish {
    type Id = DishId;
    type Action = DishAction;
    type ActionResult = DishActionResult;
    type Error = DishError;

    fn id(&self) -> &DishId {
        &self.id
    }

    fn set_id(&mut self, id: DishId) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }

    /// Rejects dishes without a name, stock or cooking time, and negative prices.
    fn on_create(&mut self) -> Result<(), DishError> {
        if self.name.trim().is_empty() {
            return Err(DishError::EmptyName);
        }
        if self.quantity == 0 {
            return Err(DishError::InvalidQuantity);
        }
        if self.cooking_time_minutes == 0 {
            return Err(DishError::InvalidCookingTime);
        }
        if self.price.is_nan() || self.price < 0.0 {
            return Err(DishError::InvalidPrice(self.price));
        }
        Ok(())
    }

    fn handle_action(&mut self, action: DishAction) -> Result<DishActionResult, DishError> {
        match action {
            DishAction::CheckStock => Ok(DishActionResult::CheckStock(self.quantity)),
            DishAction::Reserve(requested) => {
                if requested > self.quantity {
                    return Err(DishError::InsufficientStock {
                        dish_id: self.id,
                        requested,
                        available: self.quantity,
                    });
                }
                self.quantity -= requested;
                Ok(DishActionResult::Reserve(self.quantity))
            }
            DishAction::Restock(amount) => {
                self.quantity = self.quantity.saturating_add(amount);
                Ok(DishActionResult::Restock(self.quantity))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DishCreate;

    fn ramen() -> Dish {
        Dish::new(DishCreate {
            name: "Ramen".into(),
            description: String::new(),
            quantity: 3,
            cooking_time_minutes: 12,
            price: 11.0,
        })
    }

    #[test]
    fn test_reserve_and_restock() {
        let mut dish = ramen();
        assert_eq!(
            dish.handle_action(DishAction::Reserve(2)).unwrap(),
            DishActionResult::Reserve(1)
        );
        assert_eq!(
            dish.handle_action(DishAction::Reserve(2)).unwrap_err(),
            DishError::InsufficientStock {
                dish_id: DishId(0),
                requested: 2,
                available: 1
            }
        );
        assert_eq!(
            dish.handle_action(DishAction::Restock(4)).unwrap(),
            DishActionResult::Restock(5)
        );
    }

    #[test]
    fn test_on_create_validation() {
        let mut dish = ramen();
        assert!(dish.on_create().is_ok());

        dish.cooking_time_minutes = 0;
        assert_eq!(dish.on_create().unwrap_err(), DishError::InvalidCookingTime);

        let mut dish = ramen();
        dish.quantity = 0;
        assert_eq!(dish.on_create().unwrap_err(), DishError::InvalidQuantity);

        let mut dish = ramen();
        dish.price = -1.0;
        assert_eq!(dish.on_create().unwrap_err(), DishError::InvalidPrice(-1.0));

        let mut dish = ramen();
        dish.name = "  ".into();
        assert_eq!(dish.on_create().unwrap_err(), DishError::EmptyName);
    }
}
