//! Custom actions for the Dish store.
//!
//! These are the stock operations that must be atomic with respect to other orders, so
//! they are executed by the store actor itself through
//! [`StoredEntity::handle_action`](entity_store::StoredEntity::handle_action).

/// Stock operations on a single dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DishAction {
    /// Reads the portions on hand without modifying them.
    CheckStock,
    /// Takes portions for an order line.
    ///
    /// # Errors
    /// Fails if the requested amount exceeds the portions on hand.
    Reserve(u32),
    /// Puts portions back after a line was removed or an order placement was unwound.
    Restock(u32),
}

/// Results from DishActions - variants match 1:1 with DishAction.
///
/// Every variant carries the portions on hand after the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DishActionResult {
    CheckStock(u32),
    Reserve(u32),
    Restock(u32),
}
