//! # Restaurant Kitchen
//!
//! Order management for a restaurant: customers place orders from the menu, the kitchen
//! prepares them with a bounded number of workers, and customers pay and rate them.
//!
//! - **[model]**: [`Dish`](model::Dish) and [`Order`](model::Order), with the order's line and
//!   status rules
//! - **[dish_store] / [order_store]**: store integrations of the model on top of
//!   [`entity_store`]
//! - **[clients]**: typed store clients
//! - **[scheduler]**: admission queue, capacity gate, processing registry and the
//!   [`Scheduler`](scheduler::Scheduler) that drives orders through the kitchen
//! - **[service]**: menu and order flows
//! - **[lifecycle]**: wiring, shutdown and tracing setup
//! - **[config] / [ledger]**: kitchen configuration and the revenue counter

pub mod clients;
pub mod config;
pub mod dish_store;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod order_store;
pub mod scheduler;
pub mod service;
