//! # Observability & Tracing
//!
//! Preparation tasks run inside a `prepare` span carrying the `order_id`, so every line
//! they log is attributed to its order:
//!
//! ```text
//! INFO prepare{order_id=order_1}: Preparing minutes=11
//! INFO prepare{order_id=order_1}: Revenue credited amount=29.0 total=29.0
//! INFO prepare{order_id=order_1}: Order ready price=29.0
//! ```
//!
//! Store actors log with an `entity_type` field instead of the module path, which is why
//! targets are hidden.

/// Installs the global fmt subscriber with `RUST_LOG` filtering.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
