use crate::model::OrderId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Handle on one running preparation task.
///
/// `generation` tells two dispatches of the same order id apart.
#[derive(Debug, Clone)]
pub struct ProcessingContext {
    pub order_id: OrderId,
    pub generation: u64,
    pub token: CancellationToken,
}

/// Order id → processing context of its in-flight preparation task.
///
/// An entry is removed exactly once, by whoever [`claim`](ProcessingRegistry::claim)s it
/// first: the task finishing the order, the caller canceling it, or the task's own
/// cleanup.
#[derive(Debug, Default)]
pub struct ProcessingRegistry {
    contexts: Mutex<HashMap<OrderId, ProcessingContext>>,
    next_generation: AtomicU64,
}

impl ProcessingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fresh context for `order_id`. Returns `None` if the order already has one.
    pub fn register(&self, order_id: OrderId) -> Option<ProcessingContext> {
        let mut contexts = self.contexts.lock().unwrap_or_else(|e| e.into_inner());
        if contexts.contains_key(&order_id) {
            return None;
        }
        let ctx = ProcessingContext {
            order_id,
            generation: self.next_generation.fetch_add(1, Ordering::Relaxed),
            token: CancellationToken::new(),
        };
        contexts.insert(order_id, ctx.clone());
        Some(ctx)
    }

    pub fn get(&self, order_id: OrderId) -> Option<ProcessingContext> {
        self.contexts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&order_id)
            .cloned()
    }

    /// Removes the entry if it is still `ctx`. Returns whether this call removed it.
    pub fn claim(&self, ctx: &ProcessingContext) -> bool {
        let mut contexts = self.contexts.lock().unwrap_or_else(|e| e.into_inner());
        match contexts.get(&ctx.order_id) {
            Some(current) if current.generation == ctx.generation => {
                contexts.remove(&ctx.order_id);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.contexts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_succeeds_once() {
        let registry = ProcessingRegistry::new();
        let ctx = registry.register(OrderId(1)).unwrap();
        assert!(registry.get(OrderId(1)).is_some());

        assert!(registry.claim(&ctx));
        assert!(!registry.claim(&ctx));
        assert!(registry.get(OrderId(1)).is_none());
    }

    #[test]
    fn test_duplicate_register_is_refused() {
        let registry = ProcessingRegistry::new();
        let _ctx = registry.register(OrderId(1)).unwrap();
        assert!(registry.register(OrderId(1)).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_stale_context_cannot_claim_new_dispatch() {
        let registry = ProcessingRegistry::new();
        let old = registry.register(OrderId(1)).unwrap();
        assert!(registry.claim(&old));

        let new = registry.register(OrderId(1)).unwrap();
        assert_ne!(old.generation, new.generation);
        assert!(!registry.claim(&old));
        assert!(registry.claim(&new));
        assert!(registry.is_empty());
    }
}
