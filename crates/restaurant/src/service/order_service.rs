use super::error::ServiceError;
use crate::clients::{DishClient, OrderClient};
use crate::model::{Dish, DishId, LineItem, Order, OrderId, OrderStatus, Review, UserId};
use crate::order_store::OrderError;
use crate::scheduler::Scheduler;
use entity_store::StoreBacked;
use tracing::{info, instrument, warn};

/// Order flows for customers.
///
/// Talks to the kitchen only through [`Scheduler::submit`] and [`Scheduler::cancel`].
/// Dish stock and order lines live in different stores, so every flow that touches both
/// reserves first and puts stock back if the order side fails.
#[derive(Clone)]
pub struct OrderService {
    orders: OrderClient,
    dishes: DishClient,
    scheduler: Scheduler,
}

impl OrderService {
    pub fn new(orders: OrderClient, dishes: DishClient, scheduler: Scheduler) -> Self {
        Self {
            orders,
            dishes,
            scheduler,
        }
    }

    /// Reserves stock for every line, stores the order as ACCEPTED and hands it to the
    /// kitchen.
    ///
    /// If any line fails, the stock already reserved for earlier lines is put back.
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        user_id: UserId,
        lines: &[LineItem],
    ) -> Result<OrderId, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::EmptyOrder);
        }

        let mut order = Order::new(user_id);
        let mut reserved = Vec::with_capacity(lines.len());
        for line in lines {
            if let Err(e) = self.reserve_into(&mut order, *line).await {
                self.release(&reserved).await;
                return Err(e);
            }
            reserved.push(*line);
        }

        let order_id = match self.orders.create_order(order.clone()).await {
            Ok(id) => id,
            Err(e) => {
                self.release(&reserved).await;
                return Err(e.into());
            }
        };
        order.id = order_id;
        info!(%order_id, price = order.price(), "Order placed");

        Ok(self.scheduler.submit(order))
    }

    /// Adds dishes to an order that is still ACCEPTED. Returns the updated order.
    #[instrument(skip(self))]
    pub async fn add_to_order(
        &self,
        order_id: OrderId,
        lines: &[LineItem],
    ) -> Result<Order, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::EmptyOrder);
        }
        let mut latest = self.editable_order(order_id).await?;

        for line in lines {
            if line.quantity == 0 {
                return Err(OrderError::InvalidQuantity {
                    dish_id: line.dish_id,
                }
                .into());
            }
            let dish = self.dish(line.dish_id).await?;
            self.dishes.reserve(dish.id, line.quantity).await?;
            match self.orders.add_dish(order_id, dish, line.quantity).await {
                Ok(order) => latest = order,
                Err(e) => {
                    self.release(std::slice::from_ref(line)).await;
                    return Err(e.into());
                }
            }
        }

        info!(%order_id, price = latest.price(), "Dishes added");
        Ok(latest)
    }

    /// Removes dishes from an order that is still ACCEPTED and puts their stock back.
    ///
    /// Fails with [`OrderError::LineNotFound`] for dishes the order does not contain.
    #[instrument(skip(self))]
    pub async fn remove_from_order(
        &self,
        order_id: OrderId,
        lines: &[LineItem],
    ) -> Result<Order, ServiceError> {
        if lines.is_empty() {
            return Err(ServiceError::EmptyOrder);
        }
        self.editable_order(order_id).await?;

        for line in lines {
            let dish = self.dish(line.dish_id).await?;
            let removed = self
                .orders
                .remove_dish(order_id, dish, line.quantity)
                .await?;
            if removed > 0 {
                self.dishes.restock(line.dish_id, removed).await?;
            }
        }

        let order = self.order(order_id).await?;
        info!(%order_id, price = order.price(), "Dishes removed");
        Ok(order)
    }

    /// Cancels an order the kitchen is still working on. READY orders are refused.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<(), ServiceError> {
        let order = self.order(order_id).await?;
        if order.status() == OrderStatus::Ready {
            return Err(ServiceError::AlreadyReady(order_id));
        }
        self.scheduler.cancel(order_id).await?;
        Ok(())
    }

    /// READY → PAID.
    #[instrument(skip(self))]
    pub async fn pay_order(&self, order_id: OrderId) -> Result<Order, ServiceError> {
        let order = self.order(order_id).await?;
        match order.status() {
            OrderStatus::Ready => {}
            OrderStatus::Paid => return Err(ServiceError::AlreadyPaid(order_id)),
            OrderStatus::Canceled => return Err(ServiceError::Canceled(order_id)),
            status => return Err(ServiceError::NotReady { order_id, status }),
        }
        let paid = self.orders.mark_paid(order_id).await?;
        info!(%order_id, price = paid.price(), "Order paid");
        Ok(paid)
    }

    /// Attaches a review (mark 1..=5) to a PAID order.
    #[instrument(skip(self, comment))]
    pub async fn rate_order(
        &self,
        order_id: OrderId,
        mark: u8,
        comment: &str,
    ) -> Result<Order, ServiceError> {
        let review = Review::new(mark, comment)?;
        let order = self.order(order_id).await?;
        if order.status() != OrderStatus::Paid {
            return Err(OrderError::NotPaid(order.status()).into());
        }
        let rated = self.orders.attach_review(order_id, review).await?;
        info!(%order_id, mark, "Order rated");
        Ok(rated)
    }

    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, ServiceError> {
        Ok(self.orders.orders_for_user(user_id).await?)
    }

    pub async fn all_orders(&self) -> Result<Vec<Order>, ServiceError> {
        Ok(self.orders.list().await?)
    }

    pub async fn order(&self, order_id: OrderId) -> Result<Order, ServiceError> {
        self.orders
            .get(order_id)
            .await?
            .ok_or(ServiceError::OrderNotFound(order_id))
    }

    async fn editable_order(&self, order_id: OrderId) -> Result<Order, ServiceError> {
        let order = self.order(order_id).await?;
        if !order.is_editable() {
            return Err(OrderError::NotEditable(order.status()).into());
        }
        Ok(order)
    }

    async fn dish(&self, dish_id: DishId) -> Result<Dish, ServiceError> {
        self.dishes
            .get(dish_id)
            .await?
            .ok_or(ServiceError::UnknownDish(dish_id))
    }

    async fn reserve_into(&self, order: &mut Order, line: LineItem) -> Result<(), ServiceError> {
        let dish = self.dish(line.dish_id).await?;
        order.add_dish(&dish, line.quantity)?;
        self.dishes.reserve(dish.id, line.quantity).await?;
        Ok(())
    }

    async fn release(&self, lines: &[LineItem]) {
        for line in lines {
            if let Err(e) = self.dishes.restock(line.dish_id, line.quantity).await {
                warn!(dish_id = %line.dish_id, quantity = line.quantity, error = %e, "Failed to put stock back");
            }
        }
    }
}
