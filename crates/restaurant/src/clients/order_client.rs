//! # Order Client
//!
//! Provides a high‑level API for interacting with the order store.
//! It wraps a `StoreClient<Order>` and turns [`OrderAction`]s into plain async calls.
use crate::model::{Dish, Order, OrderId, OrderStatus, Review, UserId};
use crate::order_store::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use entity_store::{StoreBacked, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the order store.
#[derive(Clone)]
pub struct OrderClient {
    inner: StoreClient<Order>,
}

impl OrderClient {
    pub fn new(inner: StoreClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreBacked<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &StoreClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.entity_error::<OrderError>() {
            Some(inner) => inner.clone(),
            None => OrderError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl OrderClient {
    #[instrument(skip(self, order), fields(user_id = %order.user_id))]
    pub async fn create_order(&self, order: Order) -> Result<OrderId, OrderError> {
        debug!(?order, "create_order called");
        self.inner.create(order).await.map_err(Self::map_error)
    }

    /// Orders owned by `user_id`, in id order.
    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        let all = self.list().await?;
        Ok(all.into_iter().filter(|o| o.user_id == user_id).collect())
    }

    /// Orders currently in `status`, in id order.
    #[instrument(skip(self))]
    pub async fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        let all = self.list().await?;
        Ok(all.into_iter().filter(|o| o.status() == status).collect())
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        debug!(%id, ?action, "Sending action");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    pub async fn start_preparing(&self, id: OrderId) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::StartPreparing).await? {
            OrderActionResult::StartPreparing(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }

    pub async fn mark_ready(&self, id: OrderId) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::MarkReady).await? {
            OrderActionResult::MarkReady(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }

    pub async fn cancel(&self, id: OrderId) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::Cancel).await? {
            OrderActionResult::Cancel(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }

    pub async fn mark_paid(&self, id: OrderId) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::MarkPaid).await? {
            OrderActionResult::MarkPaid(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }

    pub async fn attach_review(&self, id: OrderId, review: Review) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::AttachReview(review)).await? {
            OrderActionResult::AttachReview(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }

    pub async fn add_dish(
        &self,
        id: OrderId,
        dish: Dish,
        quantity: u32,
    ) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::AddDish { dish, quantity }).await? {
            OrderActionResult::AddDish(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }

    /// Returns the portions actually removed.
    pub async fn remove_dish(
        &self,
        id: OrderId,
        dish: Dish,
        quantity: u32,
    ) -> Result<u32, OrderError> {
        match self.act(id, OrderAction::RemoveDish { dish, quantity }).await? {
            OrderActionResult::RemoveDish(removed) => Ok(removed),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("mismatched action result: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DishId;
    use entity_store::mock::MockStore;

    fn order(id: u32) -> Order {
        let mut order = Order::new(UserId(3));
        order.id = OrderId(id);
        order.add_line(DishId(1), 1).unwrap();
        order
    }

    #[tokio::test]
    async fn test_entity_errors_are_unwrapped() {
        let mut mock = MockStore::<Order>::new();
        mock.expect_action(OrderId(1))
            .return_err(StoreError::EntityError(Box::new(OrderError::NotEditable(
                OrderStatus::Ready,
            ))));
        mock.expect_action(OrderId(1))
            .return_err(StoreError::ActorClosed);

        let client = OrderClient::new(mock.client());
        assert_eq!(
            client.mark_paid(OrderId(1)).await.unwrap_err(),
            OrderError::NotEditable(OrderStatus::Ready)
        );
        assert!(matches!(
            client.mark_paid(OrderId(1)).await,
            Err(OrderError::ActorCommunicationError(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_orders_for_user_filters_list() {
        let mut mock = MockStore::<Order>::new();
        let mut foreign = order(2);
        foreign.user_id = UserId(4);
        mock.expect_list().return_ok(vec![order(1), foreign, order(3)]);

        let client = OrderClient::new(mock.client());
        let mine = client.orders_for_user(UserId(3)).await.unwrap();
        assert_eq!(
            mine.iter().map(|o| o.id).collect::<Vec<_>>(),
            vec![OrderId(1), OrderId(3)]
        );

        mock.verify();
    }
}
