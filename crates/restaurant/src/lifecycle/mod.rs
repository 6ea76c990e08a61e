//! # System Lifecycle
//!
//! Starting, wiring and stopping the kitchen.
//!
//! [`RestaurantSystem`] is the conductor: it spawns one store actor per entity type,
//! builds the scheduler on top of their clients and hands out the services.
//!
//! ## Shutdown Order
//!
//! 1. **Stop the scheduler** - queued orders are dropped, running preparation tasks stop
//!    at their next suspension point and leave the order status as it was
//! 2. **Drop all clients** - services and scheduler hold clones, so they go too
//! 3. **Await the store actors** - each actor exits once its channel is closed
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the `tracing-subscriber` formatter. Filtering follows
//! `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # order lifecycle
//! RUST_LOG=debug cargo run     # every store request and action
//! ```

pub mod restaurant_system;
pub mod tracing;

pub use restaurant_system::*;
pub use tracing::*;
