//! # Store Client
//!
//! The typed async handle used to reach a [`StoreActor`](crate::StoreActor).

use crate::entity::StoredEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a `StoreActor`.
///
/// Holds only a channel sender, so cloning is cheap and clones can be moved into as
/// many tasks as needed. The actor stops once every clone is dropped.
pub struct StoreClient<T: StoredEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

// Manual impl: `T` itself does not have to be `Clone` for the handle to be.
impl<T: StoredEntity> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: StoredEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Stores a new record and returns the id the store assigned to it.
    pub async fn create(&self, entity: T) -> Result<T::Id, StoreError> {
        self.request(|respond_to| StoreRequest::Create { entity, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    /// First record (in id order) whose `field` renders as `value`.
    pub async fn find_by(
        &self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<T>, StoreError> {
        let field = field.into();
        let value = value.into();
        self.request(|respond_to| StoreRequest::FindBy {
            field,
            value,
            respond_to,
        })
        .await
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::List { respond_to })
            .await
    }

    /// Replaces the stored record that has the same id as `entity`.
    pub async fn update(&self, entity: T) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Update { entity, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| StoreRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
