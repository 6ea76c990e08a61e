//! # Entity Store
//!
//! This crate provides the persistence collaborator used by the kitchen: a generic,
//! actor-based, in-memory store for keyed records. Each entity type (dishes, orders, ...)
//! gets its own [`StoreActor`] running in a Tokio task, and the rest of the system talks
//! to it through a cheap, cloneable [`StoreClient`].
//!
//! ## Why an Actor?
//!
//! - **Isolated state**: the actor owns its records exclusively, so there are no locks
//!   around the map itself.
//! - **Read-your-writes**: requests for one entity type are processed sequentially, in
//!   arrival order. A write acknowledged to a caller is visible to every later read.
//! - **Atomic entity-local updates**: read-modify-write operations that must not race
//!   (e.g. reserving dish stock) are expressed as [`StoredEntity::Action`]s and executed
//!   inside the actor loop.
//!
//! There are no cross-entity transactions. A caller that updates a dish and then an
//! order performs two independent writes.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`StoredEntity`]) - how a record is identified, validated and acted upon
//! 2. **Runtime Layer** ([`StoreActor`]) - message processing and the record map
//! 3. **Interface Layer** ([`StoreClient`], [`StoreBacked`]) - type-safe async access
//!
//! ## Example
//!
//! ```rust
//! use entity_store::{StoreActor, StoredEntity};
//!
//! #[derive(Clone, Debug)]
//! struct Table { id: u32, seats: u32 }
//!
//! #[derive(Debug)] enum TableAction { AddSeat }
//! #[derive(Debug, thiserror::Error)] #[error("table error")] struct TableError;
//!
//! impl StoredEntity for Table {
//!     type Id = u32;
//!     type Action = TableAction;
//!     type ActionResult = u32;
//!     type Error = TableError;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!     fn set_id(&mut self, id: u32) { self.id = id; }
//!     fn handle_action(&mut self, action: TableAction) -> Result<u32, TableError> {
//!         match action {
//!             TableAction::AddSeat => { self.seats += 1; Ok(self.seats) }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::<Table>::new(10);
//!     tokio::spawn(actor.run());
//!
//!     let id = client.create(Table { id: 0, seats: 4 }).await.unwrap();
//!     let seats = client.perform_action(id, TableAction::AddSeat).await.unwrap();
//!     assert_eq!(seats, 5);
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides a [`MockStore`](mock::MockStore) that speaks the same
//! protocol as a real actor but answers from a queue of expectations. It is the easiest way
//! to inject persistence failures.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::StoreBacked;
pub use entity::StoredEntity;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
