use super::error::ServiceError;
use crate::clients::{DishClient, OrderClient};
use crate::dish_store::DishError;
use crate::model::{Dish, DishCreate, DishId, OrderStatus};
use entity_store::StoreBacked;
use tracing::{info, instrument};

/// Menu management.
#[derive(Clone)]
pub struct MenuService {
    dishes: DishClient,
    orders: OrderClient,
}

impl MenuService {
    pub fn new(dishes: DishClient, orders: OrderClient) -> Self {
        Self { dishes, orders }
    }

    /// Adds a dish. Stock and cooking time must be positive and the price not negative.
    #[instrument(skip(self))]
    pub async fn add_dish(&self, params: DishCreate) -> Result<DishId, ServiceError> {
        let id = self.dishes.create_dish(params).await?;
        info!(dish_id = %id, "Dish added to menu");
        Ok(id)
    }

    /// Removes a dish unless an order the kitchen has not finished still contains it.
    #[instrument(skip(self))]
    pub async fn remove_dish(&self, id: DishId) -> Result<(), ServiceError> {
        if self.dishes.get(id).await?.is_none() {
            return Err(DishError::NotFound(id).into());
        }
        let busy = self.orders.list().await?.into_iter().any(|o| {
            matches!(o.status(), OrderStatus::Accepted | OrderStatus::Preparing)
                && o.contains_dish(id)
        });
        if busy {
            return Err(DishError::InUse(id).into());
        }
        self.dishes.delete(id).await?;
        info!(dish_id = %id, "Dish removed from menu");
        Ok(())
    }

    pub async fn list_dishes(&self) -> Result<Vec<Dish>, ServiceError> {
        Ok(self.dishes.list().await?)
    }

    pub async fn dish(&self, id: DishId) -> Result<Dish, ServiceError> {
        self.dishes
            .get(id)
            .await?
            .ok_or(ServiceError::Dish(DishError::NotFound(id)))
    }
}
