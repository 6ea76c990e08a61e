use super::error::SchedulerError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting permit pool bounding how many orders are prepared at once.
///
/// Only permit holders are bounded; any number of tasks may wait in `acquire`.
/// Dropping the returned permit releases it.
#[derive(Debug)]
pub struct CapacityGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    peak: AtomicUsize,
}

impl CapacityGate {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            peak: AtomicUsize::new(0),
        }
    }

    /// Waits for a free permit.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, SchedulerError> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| SchedulerError::GateClosed)?;
        self.peak.fetch_max(self.in_use(), Ordering::Relaxed);
        Ok(permit)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn in_use(&self) -> usize {
        self.capacity - self.available()
    }

    /// Highest number of permits held at the same time so far.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_acquire_waits_for_release() {
        let gate = CapacityGate::new(2);
        let first = gate.acquire().await.unwrap();
        let _second = gate.acquire().await.unwrap();
        assert_eq!(gate.available(), 0);

        let blocked = tokio::time::timeout(Duration::from_millis(50), gate.acquire()).await;
        assert!(blocked.is_err());

        drop(first);
        assert_eq!(gate.available(), 1);
        let _third = gate.acquire().await.unwrap();
        assert_eq!(gate.in_use(), 2);
        assert_eq!(gate.peak(), 2);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let gate = CapacityGate::new(0);
        assert_eq!(gate.capacity(), 1);
        assert_eq!(gate.available(), 1);
    }
}
