//! The restaurant-wide revenue counter and kitchen size.
//!
//! A [`Ledger`] is created once and shared as `Arc<Ledger>`; the scheduler credits it when
//! an order becomes READY.

use std::sync::Mutex;
use tracing::info;

#[derive(Debug)]
pub struct Ledger {
    workers: usize,
    revenue: Mutex<f64>,
}

impl Ledger {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            revenue: Mutex::new(0.0),
        }
    }

    /// Number of kitchen workers, i.e. how many orders may be prepared at once.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Adds `amount` to the revenue and returns the new total.
    pub fn credit(&self, amount: f64) -> f64 {
        let mut revenue = self.revenue.lock().unwrap_or_else(|e| e.into_inner());
        *revenue += amount;
        info!(amount, total = *revenue, "Revenue credited");
        *revenue
    }

    pub fn revenue(&self) -> f64 {
        *self.revenue.lock().unwrap_or_else(|e| e.into_inner())
    }
}
