use crate::model::Order;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Strict FIFO of orders waiting to be dispatched.
#[derive(Debug, Default)]
pub struct AdmissionQueue {
    orders: Mutex<VecDeque<Order>>,
}

impl AdmissionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `order` and returns the queue length afterwards.
    pub fn enqueue(&self, order: Order) -> usize {
        let mut orders = self.orders.lock().unwrap_or_else(|e| e.into_inner());
        orders.push_back(order);
        orders.len()
    }

    pub fn dequeue_next(&self) -> Option<Order> {
        self.orders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }

    /// Empties the queue, returning what was waiting in admission order.
    pub fn drain(&self) -> Vec<Order> {
        self.orders
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.orders.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderId, UserId};

    fn order(id: u32) -> Order {
        let mut order = Order::new(UserId(1));
        order.id = OrderId(id);
        order
    }

    #[test]
    fn test_fifo_order() {
        let queue = AdmissionQueue::new();
        assert_eq!(queue.enqueue(order(3)), 1);
        assert_eq!(queue.enqueue(order(1)), 2);
        assert_eq!(queue.enqueue(order(2)), 3);

        assert_eq!(queue.dequeue_next().map(|o| o.id), Some(OrderId(3)));
        assert_eq!(queue.dequeue_next().map(|o| o.id), Some(OrderId(1)));
        assert_eq!(queue.dequeue_next().map(|o| o.id), Some(OrderId(2)));
        assert!(queue.dequeue_next().is_none());
    }

    #[test]
    fn test_drain_empties_queue() {
        let queue = AdmissionQueue::new();
        queue.enqueue(order(1));
        queue.enqueue(order(2));

        let drained: Vec<_> = queue.drain().into_iter().map(|o| o.id).collect();
        assert_eq!(drained, vec![OrderId(1), OrderId(2)]);
        assert!(queue.is_empty());
    }
}
