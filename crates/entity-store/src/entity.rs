//! # StoredEntity Trait
//!
//! The `StoredEntity` trait is the contract every record type (Dish, Order, ...) implements
//! to be kept by a [`StoreActor`](crate::StoreActor). It fixes the identifier type, the
//! entity-local actions the store can run atomically, and the error those actions report.
//!
//! # Provided Methods (Hooks)
//! - [`StoredEntity::field`] - defaults to "no such field"
//! - [`StoredEntity::on_create`] - defaults to accepting the record as-is

use std::fmt::{Debug, Display};

/// Trait that any record must implement to be managed by a `StoreActor`.
///
/// Ids are assigned by the store, never by the caller: `create` overwrites whatever id the
/// record carries via [`StoredEntity::set_id`]. That is why `Id` must be constructible from
/// the store's `u32` counter.
pub trait StoredEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Entity-local operations executed inside the actor loop (e.g. `Reserve(3)`).
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The error type reported by hooks and actions.
    type Error: std::error::Error + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    fn set_id(&mut self, id: Self::Id);

    /// String view of a named attribute, used by `find_by`.
    ///
    /// Returns `None` for unknown field names.
    fn field(&self, _name: &str) -> Option<String> {
        None
    }

    /// Called after the id is assigned and before the record is inserted.
    /// An error here rejects the create.
    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom entity-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}
