//! # StoreBacked Trait
//!
//! Common read/delete operations for domain clients that wrap a [`StoreClient`].
use crate::{StoreClient, StoreError, StoredEntity};
use async_trait::async_trait;

/// Trait for domain-specific clients to inherit the standard store operations.
///
/// Implementors only say where their inner `StoreClient` lives and how a
/// [`StoreError`] becomes their own error type; `get`, `list` and `delete` come for free.
///
/// # Example
///
/// ```rust
/// use entity_store::{StoreBacked, StoreClient, StoreError, StoredEntity};
///
/// #[derive(Clone, Debug)] struct Table { id: u32 }
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TableError(String);
///
/// impl StoredEntity for Table {
///     type Id = u32; type Action = (); type ActionResult = (); type Error = TableError;
///     fn id(&self) -> &u32 { &self.id }
///     fn set_id(&mut self, id: u32) { self.id = id; }
///     fn handle_action(&mut self, _: ()) -> Result<(), TableError> { Ok(()) }
/// }
///
/// struct TableClient { inner: StoreClient<Table> }
///
/// impl StoreBacked<Table> for TableClient {
///     type Error = TableError;
///     fn inner(&self) -> &StoreClient<Table> { &self.inner }
///     fn map_error(e: StoreError) -> TableError { TableError(e.to_string()) }
/// }
///
/// async fn usage(client: TableClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait StoreBacked<T: StoredEntity>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Map store errors to the domain error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every record, in id order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
