//! # Dish Client
//!
//! Provides a high‑level API for interacting with the dish store.
//! It wraps a `StoreClient<Dish>` and exposes the stock actions.
use crate::dish_store::{DishAction, DishActionResult, DishError};
use crate::model::{Dish, DishCreate, DishId};
use async_trait::async_trait;
use entity_store::{StoreBacked, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the dish store.
#[derive(Clone)]
pub struct DishClient {
    inner: StoreClient<Dish>,
}

impl DishClient {
    pub fn new(inner: StoreClient<Dish>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StoreBacked<Dish> for DishClient {
    type Error = DishError;

    fn inner(&self) -> &StoreClient<Dish> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e.entity_error::<DishError>() {
            Some(inner) => inner.clone(),
            None => DishError::ActorCommunicationError(e.to_string()),
        }
    }
}

impl DishClient {
    #[instrument(skip(self))]
    pub async fn create_dish(&self, params: DishCreate) -> Result<DishId, DishError> {
        debug!("Sending request");
        self.inner
            .create(Dish::new(params))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Dish>, DishError> {
        self.inner
            .find_by("name", name)
            .await
            .map_err(Self::map_error)
    }

    async fn stock_action(
        &self,
        id: DishId,
        action: DishAction,
    ) -> Result<DishActionResult, DishError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => DishError::NotFound(id),
                e => Self::map_error(e),
            })
    }

    /// Check the portions on hand for a dish.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: DishId) -> Result<u32, DishError> {
        debug!(%id, "Checking stock");
        match self.stock_action(id, DishAction::CheckStock).await? {
            DishActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Take `quantity` portions for an order line.
    ///
    /// Returns the portions left, or [`DishError::InsufficientStock`].
    #[instrument(skip(self))]
    pub async fn reserve(&self, id: DishId, quantity: u32) -> Result<u32, DishError> {
        debug!(%id, quantity, "Reserving portions");
        match self.stock_action(id, DishAction::Reserve(quantity)).await? {
            DishActionResult::Reserve(left) => Ok(left),
            other => Err(unexpected(other)),
        }
    }

    /// Put `quantity` portions back. Returns the portions on hand afterwards.
    #[instrument(skip(self))]
    pub async fn restock(&self, id: DishId, quantity: u32) -> Result<u32, DishError> {
        debug!(%id, quantity, "Restocking portions");
        match self.stock_action(id, DishAction::Restock(quantity)).await? {
            DishActionResult::Restock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: DishActionResult) -> DishError {
    DishError::ActorCommunicationError(format!("mismatched action result: {result:?}"))
}
