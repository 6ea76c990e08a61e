//! Customer- and staff-facing flows built on the stores and the scheduler.
//!
//! - [`MenuService`] - adding, listing and removing dishes
//! - [`OrderService`] - placing, editing, canceling, paying and rating orders

pub mod error;
pub mod menu_service;
pub mod order_service;

pub use error::ServiceError;
pub use menu_service::MenuService;
pub use order_service::OrderService;
