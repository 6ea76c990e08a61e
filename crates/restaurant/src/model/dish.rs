//! Represents a dish on the menu.
//!
//! # Entity Store
//! This struct implements the [`StoredEntity`](entity_store::StoredEntity) trait,
//! allowing it to be kept by a [`StoreActor`](entity_store::StoreActor).
//!
//! See [`crate::dish_store`] for the stock actions ([`DishAction`](crate::dish_store::DishAction)).
use serde::{Deserialize, Serialize};

use std::fmt::Display;

/// Type-safe identifier for Dishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DishId(pub u32);

impl From<u32> for DishId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for DishId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dish_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: DishId,
    pub name: String,
    pub description: String,
    /// Portions currently on hand.
    pub quantity: u32,
    pub cooking_time_minutes: u32,
    /// Unit price.
    pub price: f64,
}

impl Dish {
    /// Builds a dish from a creation payload. The id is a placeholder until the store
    /// assigns one.
    pub fn new(params: DishCreate) -> Self {
        Self {
            id: DishId(0),
            name: params.name,
            description: params.description,
            quantity: params.quantity,
            cooking_time_minutes: params.cooking_time_minutes,
            price: params.price,
        }
    }
}

/// Payload for adding a dish to the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub cooking_time_minutes: u32,
    pub price: f64,
}
