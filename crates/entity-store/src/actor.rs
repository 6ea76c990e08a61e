//! # Store Actor
//!
//! This module defines the `StoreActor`, the server half of the store. It owns the record
//! map and processes requests one at a time, which is what gives callers read-your-writes
//! consistency per entity type.

use crate::client::StoreClient;
use crate::entity::StoredEntity;
use crate::error::StoreError;
use crate::message::StoreRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that keeps every record of one entity type.
///
/// **Concurrency Model**:
/// The actor processes its messages *sequentially* in a loop, so the `records` map needs
/// no `Mutex`. Many callers can share clones of the [`StoreClient`]; their requests are
/// serialized by the channel.
///
/// # Usage Pattern
///
/// 1.  **Create**: `StoreActor::new()` returns the actor (server) and a client.
/// 2.  **Run**: spawn `actor.run()` in a background task.
/// 3.  **Use**: clone the client wherever the records are needed.
///
/// # Operations
///
/// * **Create**: assigns the next id (starting at 1), runs `on_create`, inserts.
/// * **Get / FindBy / List**: return clones; `List` is in id order.
/// * **Update**: replaces the stored record with the same id, `NotFound` if absent.
/// * **Delete**: removes the record, `NotFound` if absent.
/// * **Action**: runs `handle_action` on the stored record in place.
pub struct StoreActor<T: StoredEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: StoredEntity> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client
    /// calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: BTreeMap::new(),
            next_id: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self) {
        // "Dish" instead of "restaurant::model::dish::Dish"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create {
                    mut entity,
                    respond_to,
                } => {
                    let id = T::Id::from(self.next_id);
                    entity.set_id(id.clone());
                    if let Err(e) = entity.on_create() {
                        warn!(entity_type, error = %e, "Create rejected");
                        let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.next_id += 1;
                    self.records.insert(id.clone(), entity);
                    info!(entity_type, %id, size = self.records.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.records.get(&id).cloned();
                    debug!(entity_type, %id, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::FindBy {
                    field,
                    value,
                    respond_to,
                } => {
                    let record = self
                        .records
                        .values()
                        .find(|r| r.field(&field).as_deref() == Some(value.as_str()))
                        .cloned();
                    debug!(entity_type, %field, %value, found = record.is_some(), "FindBy");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::List { respond_to } => {
                    debug!(entity_type, size = self.records.len(), "List");
                    let _ = respond_to.send(Ok(self.records.values().cloned().collect()));
                }
                StoreRequest::Update { entity, respond_to } => {
                    let id = entity.id().clone();
                    match self.records.get_mut(&id) {
                        Some(slot) => {
                            *slot = entity;
                            debug!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(()));
                        }
                        None => {
                            warn!(entity_type, %id, "Update of missing record");
                            let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        }
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    if self.records.remove(&id).is_some() {
                        info!(entity_type, %id, size = self.records.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Delete of missing record");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(record) = self.records.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = record
                        .handle_action(action)
                        .map_err(|e| StoreError::EntityError(Box::new(e)));
                    if let Err(e) = &result {
                        warn!(entity_type, %id, error = %e, "Action failed");
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }
}
