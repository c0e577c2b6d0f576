//! Owns the dispatch queue and the lifecycles of both pools.
//!
//! [`Coordinator::run`] is the whole shutdown protocol:
//!
//! 1. spawn every cook, then every customer;
//! 2. wait for every customer to finish;
//! 3. close the queue, exactly once;
//! 4. wait for every cook to drain the queue and exit.
//!
//! Cooks are only awaited after the queue is closed. Awaiting them earlier
//! would block forever, since a cook only exits on end-of-stream.

use super::{
    cook::{CookReport, cook_loop},
    customer::{CustomerConfig, CustomerReport, customer_loop},
};
use crate::{
    error::{DispatchError, Result},
    id::OrderIds,
    pace::PaceSource,
    queue::DispatchQueue,
};
use futures::future::join_all;
use std::sync::Arc;

pub const DEFAULT_COOKS: [&str; 3] = ["Remy", "Colette", "Linguini"];
pub const DEFAULT_CUSTOMERS: [&str; 10] = [
    "Faisal", "Fahad", "Khaled", "Yazeed", "Sama", "Sara", "Jawad", "Meshary", "Nawaf", "Turki",
];
pub const DEFAULT_QUEUE_CAPACITY: usize = 3;

/// Pool membership and sizing. One task is spawned per name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KitchenConfig {
    pub cooks: Vec<String>,
    pub customers: Vec<String>,
    pub queue_capacity: usize,
    pub customer: CustomerConfig,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            cooks: DEFAULT_COOKS.iter().map(ToString::to_string).collect(),
            customers: DEFAULT_CUSTOMERS.iter().map(ToString::to_string).collect(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            customer: CustomerConfig::default(),
        }
    }
}

/// Summary of a completed service.
#[derive(Clone, Debug)]
pub struct ServiceReport {
    pub customers: Vec<CustomerReport>,
    pub cooks: Vec<CookReport>,
    pub admitted: usize,
    pub pending: usize,
    pub high_water: usize,
}

impl ServiceReport {
    pub fn meals_served(&self) -> usize {
        self.customers.iter().map(|c| c.served).sum()
    }

    pub fn orders_abandoned(&self) -> usize {
        self.customers.iter().map(|c| c.abandoned).sum()
    }
}

pub struct Coordinator {
    config: KitchenConfig,
    pace: Arc<dyn PaceSource>,
    ids: Arc<OrderIds>,
    queue: Arc<DispatchQueue>,
}

impl Coordinator {
    /// Builds a coordinator around a fresh queue of `config.queue_capacity`.
    ///
    /// Order ids come from [`OrderIds::global`] unless another counter is
    /// injected with [`with_order_ids`](Self::with_order_ids).
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidConfig`] if the queue capacity is zero
    /// or any cook or customer name is blank. A cook's name is what a
    /// delivered order reports as `prepared_by`, so it must not be empty.
    pub fn new(config: KitchenConfig, pace: Arc<dyn PaceSource>) -> Result<Self> {
        if config.queue_capacity == 0 {
            return Err(DispatchError::InvalidConfig {
                reason: "queue capacity must be greater than 0".to_string(),
            });
        }

        for (role, names) in [("cook", &config.cooks), ("customer", &config.customers)] {
            if let Some(idx) = names.iter().position(|name| name.trim().is_empty()) {
                return Err(DispatchError::InvalidConfig {
                    reason: format!("{role} #{idx} has a blank name"),
                });
            }
        }

        let queue = Arc::new(DispatchQueue::new(config.queue_capacity));
        Ok(Self {
            config,
            pace,
            ids: OrderIds::global(),
            queue,
        })
    }

    #[must_use]
    pub fn with_order_ids(mut self, ids: Arc<OrderIds>) -> Self {
        self.ids = ids;
        self
    }

    pub const fn queue(&self) -> &Arc<DispatchQueue> {
        &self.queue
    }

    /// Runs the service to completion.
    ///
    /// The queue is closed and every cook joined even when a customer fails,
    /// so no task outlives this call.
    ///
    /// # Errors
    ///
    /// Returns the first customer error, a [`DispatchError::TaskFailed`] if
    /// any task panicked, or [`DispatchError::AlreadyClosed`] if the queue
    /// was closed behind the coordinator's back.
    pub async fn run(self) -> Result<ServiceReport> {
        let Self {
            config,
            pace,
            ids,
            queue,
        } = self;

        tracing::info!(
            "Opening with {} cooks, {} customers and room for {} pending orders",
            config.cooks.len(),
            config.customers.len(),
            queue.capacity()
        );

        let cooks: Vec<_> = config
            .cooks
            .iter()
            .map(|name| {
                tokio::spawn(cook_loop(
                    Arc::from(name.as_str()),
                    Arc::clone(&queue),
                    Arc::clone(&pace),
                ))
            })
            .collect();

        let customers: Vec<_> = config
            .customers
            .iter()
            .map(|name| {
                tokio::spawn(customer_loop(
                    Arc::from(name.as_str()),
                    Arc::clone(&queue),
                    Arc::clone(&ids),
                    Arc::clone(&pace),
                    config.customer.clone(),
                ))
            })
            .collect();

        // === Phase 1: every customer has gone home ===
        let customers = join_all(customers)
            .await
            .into_iter()
            .map(|joined| joined.map_err(DispatchError::from).and_then(|r| r))
            .collect::<Result<Vec<_>>>();

        // === Phase 2: stop admissions, let the cooks drain ===
        tracing::info!("All customers have left, no more orders");
        let closed = queue.close();

        // === Phase 3: every cook has finished the backlog ===
        let cooks = join_all(cooks)
            .await
            .into_iter()
            .map(|joined| joined.map_err(DispatchError::from))
            .collect::<Result<Vec<_>>>();

        tracing::info!("The restaurant is closing");

        let customers = customers?;
        let cooks = cooks?;
        closed?;
        Ok(ServiceReport {
            customers,
            cooks,
            admitted: queue.admitted(),
            pending: queue.pending(),
            high_water: queue.high_water(),
        })
    }
}
