//! The unit of demand flowing from a customer, through the dispatch queue, to
//! a cook and back.
//!
//! An [`Order`] owns the sending half of its private reply path. Completing
//! the order consumes it, so the reply path can carry at most one value and
//! the cook's name is attached exactly once. The originating customer keeps
//! the matching [`Reply`] and is the only party that can read from it.

use crate::error::{DispatchError, Result};
use core::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Unique order identifier, issued by [`crate::OrderIds`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(u64);

impl OrderId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An order waiting to be cooked.
#[derive(Debug)]
pub struct Order {
    id: OrderId,
    customer: Arc<str>,
    reply: oneshot::Sender<PreparedOrder>,
}

/// An order after a cook has finished it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedOrder {
    id: OrderId,
    customer: Arc<str>,
    prepared_by: Arc<str>,
}

/// The customer's end of an order's private reply path.
#[derive(Debug)]
pub struct Reply {
    id: OrderId,
    rx: oneshot::Receiver<PreparedOrder>,
}

/// Outcome of handing a prepared order back to its customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The customer is still holding its [`Reply`].
    Delivered,
    /// The customer stopped waiting. The meal was discarded.
    Unclaimed,
}

impl Order {
    /// Creates an order along with a fresh single-slot reply path.
    pub fn new(id: OrderId, customer: Arc<str>) -> (Self, Reply) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                id,
                customer,
                reply: tx,
            },
            Reply { id, rx },
        )
    }

    pub const fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Marks the order as prepared by `cook` and delivers it to the customer.
    ///
    /// Never blocks. If the customer has already dropped its [`Reply`] the
    /// prepared order is dropped and [`Delivery::Unclaimed`] is returned.
    pub fn complete(self, cook: Arc<str>) -> Delivery {
        let prepared = PreparedOrder {
            id: self.id,
            customer: self.customer,
            prepared_by: cook,
        };
        match self.reply.send(prepared) {
            Ok(()) => Delivery::Delivered,
            Err(_) => Delivery::Unclaimed,
        }
    }
}

impl PreparedOrder {
    pub const fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn prepared_by(&self) -> &str {
        &self.prepared_by
    }
}

impl Reply {
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Waits until the order has been cooked.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ReplyLost`] if the order was dropped without
    /// being completed, e.g. because the cook holding it panicked.
    pub async fn wait(self) -> Result<PreparedOrder> {
        self.rx
            .await
            .map_err(|_| DispatchError::ReplyLost { order_id: self.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: u64) -> (Order, Reply) {
        Order::new(OrderId::new(id), Arc::from("Faisal"))
    }

    #[tokio::test]
    async fn completed_order_reaches_its_customer() {
        let (order, reply) = order(7);
        assert_eq!(order.customer(), "Faisal");
        assert_eq!(order.complete(Arc::from("Remy")), Delivery::Delivered);

        let meal = reply.wait().await.unwrap();
        assert_eq!(meal.id(), OrderId::new(7));
        assert_eq!(meal.customer(), "Faisal");
        assert_eq!(meal.prepared_by(), "Remy");
    }

    #[test]
    fn completing_for_departed_customer_is_silent() {
        let (order, reply) = order(8);
        drop(reply);
        // Must neither block nor panic.
        assert_eq!(order.complete(Arc::from("Colette")), Delivery::Unclaimed);
    }

    #[tokio::test]
    async fn dropped_order_reports_lost_reply() {
        let (order, reply) = order(9);
        drop(order);
        assert_eq!(
            reply.wait().await,
            Err(DispatchError::ReplyLost {
                order_id: OrderId::new(9)
            })
        );
    }
}
