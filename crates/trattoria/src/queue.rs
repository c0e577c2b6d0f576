//! The bounded FIFO handoff between customers and cooks (the "waiter").
//!
//! [`DispatchQueue`] wraps a bounded Tokio MPSC channel. Customers admit
//! orders through a cloned sender; cooks share the single receiver behind a
//! fair async mutex, so whichever idle cook has waited longest receives the
//! next order. The channel capacity is the only backpressure in the system.
//!
//! Closing the queue drops the stored sender. Admissions that already hold a
//! clone of it finish normally, and the receiver only reports end-of-stream
//! after every clone is gone and the buffer is empty.

use crate::{
    error::{DispatchError, Result},
    order::Order,
};
use core::time::Duration;
use parking_lot::RwLock;
use portable_atomic::{AtomicUsize, Ordering};
use tokio::{
    sync::{Mutex, mpsc},
    time::timeout,
};

/// The outcome of [`DispatchQueue::try_admit`].
#[derive(Debug)]
pub enum Admission {
    /// The order is in the queue and will be picked up by a cook.
    Admitted,
    /// No slot freed up before the deadline. The order was never enqueued
    /// and is handed back to the caller.
    TimedOut(Order),
}

#[derive(Debug)]
pub struct DispatchQueue {
    tx: RwLock<Option<mpsc::Sender<Order>>>,
    rx: Mutex<mpsc::Receiver<Order>>,
    capacity: usize,
    admitted: AtomicUsize,
    taken: AtomicUsize,
    high_water: AtomicUsize,
}

impl DispatchQueue {
    /// Creates an open queue holding at most `capacity` pending orders.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx: RwLock::new(Some(tx)),
            rx: Mutex::new(rx),
            capacity,
            admitted: AtomicUsize::new(0),
            taken: AtomicUsize::new(0),
            high_water: AtomicUsize::new(0),
        }
    }

    /// Tries to place `order` in the queue, waiting at most `deadline` for a
    /// free slot.
    ///
    /// A slot is reserved before the order is moved into the channel, so the
    /// order is either fully admitted or returned untouched in
    /// [`Admission::TimedOut`]. If a slot is free the call succeeds without
    /// waiting, even for a zero deadline.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::QueueClosed`] if [`close`](Self::close) has
    /// already run.
    pub async fn try_admit(&self, order: Order, deadline: Duration) -> Result<Admission> {
        let tx = self.tx.read().clone();
        let Some(tx) = tx else {
            return Err(DispatchError::QueueClosed {
                order_id: order.id(),
            });
        };

        match timeout(deadline, tx.reserve()).await {
            Ok(Ok(permit)) => {
                // The held permit counts as occupied, so this includes the
                // order being admitted.
                let occupied = tx.max_capacity() - tx.capacity();
                self.high_water.fetch_max(occupied, Ordering::Relaxed);
                permit.send(order);
                self.admitted.fetch_add(1, Ordering::Relaxed);
                Ok(Admission::Admitted)
            }
            // The receiver lives as long as the queue itself.
            Ok(Err(_)) => Err(DispatchError::QueueClosed {
                order_id: order.id(),
            }),
            Err(_) => Ok(Admission::TimedOut(order)),
        }
    }

    /// Waits for the next order in arrival order.
    ///
    /// Returns `None` once the queue is closed and every admitted order has
    /// been taken.
    pub async fn take(&self) -> Option<Order> {
        let order = self.rx.lock().await.recv().await;
        if order.is_some() {
            self.taken.fetch_add(1, Ordering::Relaxed);
        }
        order
    }

    /// Switches the queue to drain-only. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::AlreadyClosed`] on a second call.
    pub fn close(&self) -> Result<()> {
        match self.tx.write().take() {
            Some(_) => Ok(()),
            None => Err(DispatchError::AlreadyClosed),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.read().is_none()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Orders admitted since creation.
    pub fn admitted(&self) -> usize {
        self.admitted.load(Ordering::Relaxed)
    }

    /// Orders handed to cooks since creation.
    pub fn taken(&self) -> usize {
        self.taken.load(Ordering::Relaxed)
    }

    /// Orders admitted but not yet taken.
    ///
    /// Exact once producers and consumers are quiescent; a racing reader may
    /// briefly see a stale value.
    pub fn pending(&self) -> usize {
        self.admitted().saturating_sub(self.taken())
    }

    /// Peak number of occupied slots observed at any admission.
    pub fn high_water(&self) -> usize {
        self.high_water.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{OrderId, Reply};
    use std::sync::Arc;

    fn order(id: u64) -> (Order, Reply) {
        Order::new(OrderId::new(id), Arc::from("Sama"))
    }

    async fn admit(queue: &DispatchQueue, id: u64, deadline: Duration) -> Admission {
        let (order, _reply) = order(id);
        queue.try_admit(order, deadline).await.unwrap()
    }

    #[tokio::test]
    async fn hands_out_orders_in_arrival_order() {
        let queue = DispatchQueue::new(3);
        for id in 1..=3 {
            assert!(matches!(
                admit(&queue, id, Duration::ZERO).await,
                Admission::Admitted
            ));
        }
        assert_eq!(queue.pending(), 3);

        for id in 1..=3 {
            assert_eq!(queue.take().await.unwrap().id(), OrderId::new(id));
        }
        assert_eq!(queue.pending(), 0);
        assert_eq!(queue.high_water(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn full_queue_times_out_and_returns_the_order() {
        let queue = DispatchQueue::new(1);
        assert!(matches!(
            admit(&queue, 1, Duration::from_millis(10)).await,
            Admission::Admitted
        ));

        let start = tokio::time::Instant::now();
        match admit(&queue, 2, Duration::from_millis(10)).await {
            Admission::TimedOut(order) => assert_eq!(order.id(), OrderId::new(2)),
            Admission::Admitted => panic!("admitted into a full queue"),
        }
        assert!(start.elapsed() >= Duration::from_millis(10));
        assert_eq!(queue.admitted(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn blocked_admission_proceeds_when_a_slot_frees() {
        let queue = Arc::new(DispatchQueue::new(1));
        admit(&queue, 1, Duration::ZERO).await;

        let q = Arc::clone(&queue);
        let waiter = tokio::spawn(async move { admit(&q, 2, Duration::from_secs(7)).await });

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(queue.take().await.unwrap().id(), OrderId::new(1));
        assert!(matches!(waiter.await.unwrap(), Admission::Admitted));
        assert_eq!(queue.take().await.unwrap().id(), OrderId::new(2));
    }

    #[tokio::test]
    async fn close_is_one_shot() {
        let queue = DispatchQueue::new(3);
        assert!(!queue.is_closed());
        queue.close().unwrap();
        assert!(queue.is_closed());
        assert_eq!(queue.close(), Err(DispatchError::AlreadyClosed));
    }

    #[tokio::test]
    async fn drains_then_rejects_late_admissions() {
        let queue = DispatchQueue::new(3);
        admit(&queue, 1, Duration::ZERO).await;
        admit(&queue, 2, Duration::ZERO).await;
        queue.close().unwrap();

        assert_eq!(queue.take().await.unwrap().id(), OrderId::new(1));
        assert_eq!(queue.take().await.unwrap().id(), OrderId::new(2));
        assert!(queue.take().await.is_none());
        assert!(queue.take().await.is_none());
        assert_eq!(queue.pending(), 0);

        let (late, _reply) = order(3);
        assert_eq!(
            queue.try_admit(late, Duration::from_secs(1)).await.unwrap_err(),
            DispatchError::QueueClosed {
                order_id: OrderId::new(3)
            }
        );
        assert_eq!(queue.admitted(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn admission_racing_close_completes_before_end_of_stream() {
        let queue = Arc::new(DispatchQueue::new(1));
        admit(&queue, 1, Duration::ZERO).await;

        let q = Arc::clone(&queue);
        let racing = tokio::spawn(async move { admit(&q, 2, Duration::from_secs(7)).await });
        // Let the spawned admission pick up its sender and park on the full
        // channel.
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        queue.close().unwrap();
        assert_eq!(queue.take().await.unwrap().id(), OrderId::new(1));
        assert!(matches!(racing.await.unwrap(), Admission::Admitted));
        assert_eq!(queue.take().await.unwrap().id(), OrderId::new(2));
        assert!(queue.take().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn occupancy_never_exceeds_capacity() {
        const CAPACITY: usize = 3;
        const PRODUCERS: u64 = 16;
        const PER_PRODUCER: u64 = 250;
        const CONSUMERS: usize = 4;

        let queue = Arc::new(DispatchQueue::new(CAPACITY));

        let consumers: Vec<_> = (0..CONSUMERS)
            .map(|_| {
                let q = Arc::clone(&queue);
                tokio::spawn(async move {
                    let mut n = 0_u64;
                    while q.take().await.is_some() {
                        n += 1;
                    }
                    n
                })
            })
            .collect();

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let q = Arc::clone(&queue);
                tokio::spawn(async move {
                    for i in 0..PER_PRODUCER {
                        let admission = admit(&q, p * PER_PRODUCER + i, Duration::from_secs(30)).await;
                        assert!(matches!(admission, Admission::Admitted));
                    }
                })
            })
            .collect();

        for p in futures::future::join_all(producers).await {
            p.unwrap();
        }
        queue.close().unwrap();

        let consumed: u64 = futures::future::join_all(consumers)
            .await
            .into_iter()
            .map(Result::unwrap)
            .sum();

        assert_eq!(consumed, PRODUCERS * PER_PRODUCER);
        assert!(queue.high_water() >= 1);
        assert!(queue.high_water() <= CAPACITY);
        assert_eq!(queue.pending(), 0);
    }
}
