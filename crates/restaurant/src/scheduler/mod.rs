//! # Kitchen Scheduler
//!
//! Admits accepted orders, prepares them with bounded concurrency and supports
//! canceling them mid-flight.
//!
//! ## Structure
//!
//! - [`queue`] - [`AdmissionQueue`], strict FIFO of orders waiting for dispatch
//! - [`gate`] - [`CapacityGate`], the permit pool sized by the number of kitchen workers
//! - [`registry`] - [`ProcessingRegistry`], order id → cancellation handle of its task
//! - [`error`] - [`SchedulerError`]
//!
//! ## Flow
//!
//! ```text
//! submit ─► queue ─► dispatch ─► task: permit ─► duration ─► PREPARING ─► sleep ─► READY
//!                       ▲                                                          │
//!                       └──────────── permit released, dispatch again ◄────────────┘
//! ```
//!
//! Dispatch spawns one task per order right away; the tasks themselves wait on the
//! [`CapacityGate`], so only the number of orders *being prepared* is bounded.
//!
//! Cancellation is cooperative. A task can be interrupted while it waits for a permit and
//! while it sleeps, and it re-checks its token right after the permit is granted.
//! Whoever claims the registry entry first decides the outcome: the task (the order
//! becomes READY and revenue is credited) or [`Scheduler::cancel`] (the order becomes
//! CANCELED). Revenue is therefore credited at most once and never for a canceled order.

pub mod error;
pub mod gate;
pub mod queue;
pub mod registry;

pub use error::*;
pub use gate::*;
pub use queue::*;
pub use registry::*;

use crate::clients::{DishClient, OrderClient};
use crate::ledger::Ledger;
use crate::model::{Order, OrderId, OrderStatus};
use entity_store::StoreBacked;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};

/// How a preparation task ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ready,
    Canceled,
    Stopped,
}

/// Handle on the kitchen scheduler. Cloning is cheap; all clones drive the same kitchen.
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<Inner>,
}

struct Inner {
    queue: AdmissionQueue,
    gate: CapacityGate,
    registry: ProcessingRegistry,
    orders: OrderClient,
    dishes: DishClient,
    ledger: Arc<Ledger>,
    minute: Duration,
    shutdown: CancellationToken,
    /// Number of spawned preparation tasks that have not finished yet.
    active: watch::Sender<usize>,
}

impl Scheduler {
    /// Creates a scheduler whose gate is sized by `ledger.workers()`.
    ///
    /// `minute` is the real duration of one cooking minute.
    pub fn new(
        orders: OrderClient,
        dishes: DishClient,
        ledger: Arc<Ledger>,
        minute: Duration,
    ) -> Self {
        let workers = ledger.workers();
        info!(workers, ?minute, "Kitchen scheduler started");
        let (active, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                queue: AdmissionQueue::new(),
                gate: CapacityGate::new(workers),
                registry: ProcessingRegistry::new(),
                orders,
                dishes,
                ledger,
                minute,
                shutdown: CancellationToken::new(),
                active,
            }),
        }
    }

    /// Admits an ACCEPTED order and returns its id immediately.
    ///
    /// The order must already be stored. Preparation happens in the background.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub fn submit(&self, order: Order) -> OrderId {
        let order_id = order.id;
        if self.inner.shutdown.is_cancelled() {
            warn!("Scheduler is shut down, order not admitted");
            return order_id;
        }
        let queued = self.inner.queue.enqueue(order);
        debug!(queued, "Order admitted");
        self.inner.try_dispatch_next();
        order_id
    }

    /// Cancels an order whose preparation task is still running.
    ///
    /// Works while the order waits for a permit (ACCEPTED) and while it is PREPARING.
    /// Fails without touching the order if it has no running task
    /// ([`SchedulerError::NotInFlight`]) or is in any other status
    /// ([`SchedulerError::InvalidState`]).
    #[instrument(skip(self))]
    pub async fn cancel(&self, order_id: OrderId) -> Result<(), SchedulerError> {
        let inner = &self.inner;
        let ctx = inner
            .registry
            .get(order_id)
            .ok_or(SchedulerError::NotInFlight(order_id))?;

        let order = inner
            .orders
            .get(order_id)
            .await
            .map_err(|e| SchedulerError::PersistenceFailure(e.to_string()))?
            .ok_or(SchedulerError::OrderNotFound(order_id))?;

        let status = order.status();
        if !matches!(status, OrderStatus::Accepted | OrderStatus::Preparing) {
            return Err(SchedulerError::InvalidState { order_id, status });
        }

        // The task may have claimed the entry to finish the order in the meantime.
        if !inner.registry.claim(&ctx) {
            return Err(SchedulerError::NotInFlight(order_id));
        }
        ctx.token.cancel();

        inner
            .orders
            .cancel(order_id)
            .await
            .map_err(|e| SchedulerError::PersistenceFailure(e.to_string()))?;
        info!(from = %status, "Order canceled");
        Ok(())
    }

    /// Stops the kitchen.
    ///
    /// Queued orders are dropped and running tasks stop at their next suspension point
    /// without changing the order status. Returns once every task has exited.
    pub async fn shutdown(&self) {
        info!("Shutting down kitchen scheduler...");
        self.inner.shutdown.cancel();

        let dropped = self.inner.queue.drain();
        if !dropped.is_empty() {
            warn!(count = dropped.len(), "Dropped queued orders");
        }

        let mut active = self.inner.active.subscribe();
        let _ = active.wait_for(|n| *n == 0).await;
        info!("Kitchen scheduler stopped");
    }

    pub fn workers(&self) -> usize {
        self.inner.gate.capacity()
    }

    /// Orders waiting in the admission queue.
    pub fn queued(&self) -> usize {
        self.inner.queue.len()
    }

    /// Orders with a registered preparation task.
    pub fn in_flight(&self) -> usize {
        self.inner.registry.len()
    }

    pub fn available_permits(&self) -> usize {
        self.inner.gate.available()
    }

    /// Highest number of orders prepared at the same time so far.
    pub fn peak_preparing(&self) -> usize {
        self.inner.gate.peak()
    }
}

impl Inner {
    /// Pops the head of the queue, if any, and spawns its preparation task.
    fn try_dispatch_next(self: &Arc<Self>) {
        if self.shutdown.is_cancelled() {
            return;
        }
        let Some(order) = self.queue.dequeue_next() else {
            return;
        };
        let order_id = order.id;
        let Some(ctx) = self.registry.register(order_id) else {
            warn!(%order_id, "Order is already being prepared, duplicate dropped");
            return self.try_dispatch_next();
        };

        self.active.send_modify(|n| *n += 1);
        let span = info_span!("prepare", %order_id);
        let inner = Arc::clone(self);
        tokio::spawn(inner.prepare(order, ctx).instrument(span));
    }

    async fn prepare(self: Arc<Self>, order: Order, ctx: ProcessingContext) {
        match self.run_preparation(&order, &ctx).await {
            Ok(Outcome::Ready) => {}
            Ok(Outcome::Canceled) => info!("Preparation canceled"),
            Ok(Outcome::Stopped) => info!("Preparation stopped by shutdown"),
            Err(e) => error!(error = %e, "Preparation failed"),
        }

        // No-op when the entry was already claimed by completion or cancel.
        self.registry.claim(&ctx);
        self.active.send_modify(|n| *n = n.saturating_sub(1));
        self.try_dispatch_next();
    }

    /// The permit lives in this frame, so it is released on every return path.
    async fn run_preparation(
        &self,
        queued: &Order,
        ctx: &ProcessingContext,
    ) -> Result<Outcome, SchedulerError> {
        let order_id = queued.id;

        let _permit = tokio::select! {
            permit = self.gate.acquire() => permit?,
            _ = ctx.token.cancelled() => return Ok(Outcome::Canceled),
            _ = self.shutdown.cancelled() => return Ok(Outcome::Stopped),
        };
        if ctx.token.is_cancelled() {
            return Ok(Outcome::Canceled);
        }
        debug!(in_use = self.gate.in_use(), "Permit acquired");

        // Lines may have been edited while the order was queued.
        let snapshot = self
            .orders
            .get(order_id)
            .await
            .map_err(|e| SchedulerError::PersistenceFailure(e.to_string()))?
            .ok_or(SchedulerError::OrderNotFound(order_id))?;
        let mut minutes = self.cooking_minutes(&snapshot).await?;

        let started = match self.orders.start_preparing(order_id).await {
            Ok(order) => order,
            Err(_) if ctx.token.is_cancelled() => return Ok(Outcome::Canceled),
            Err(e) => return Err(SchedulerError::PersistenceFailure(e.to_string())),
        };
        if started.lines() != snapshot.lines() {
            minutes = self.cooking_minutes(&started).await?;
        }
        info!(minutes, "Preparing");

        let duration = self
            .minute
            .saturating_mul(u32::try_from(minutes).unwrap_or(u32::MAX));
        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            _ = ctx.token.cancelled() => return Ok(Outcome::Canceled),
            _ = self.shutdown.cancelled() => return Ok(Outcome::Stopped),
        }

        if !self.registry.claim(ctx) {
            return Ok(Outcome::Canceled);
        }
        let ready = self
            .orders
            .mark_ready(order_id)
            .await
            .map_err(|e| SchedulerError::PersistenceFailure(e.to_string()))?;
        self.ledger.credit(ready.price());
        info!(price = ready.price(), "Order ready");
        Ok(Outcome::Ready)
    }

    /// Σ quantity × cooking minutes over the order's lines.
    async fn cooking_minutes(&self, order: &Order) -> Result<u64, SchedulerError> {
        let mut minutes = 0u64;
        for line in order.lines() {
            let dish = self
                .dishes
                .get(line.dish_id)
                .await
                .map_err(|e| SchedulerError::PersistenceFailure(e.to_string()))?
                .ok_or(SchedulerError::UnknownDish(line.dish_id))?;
            minutes += u64::from(line.quantity) * u64::from(dish.cooking_time_minutes);
        }
        Ok(minutes)
    }
}
