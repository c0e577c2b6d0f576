use crate::{
    error::Result,
    id::OrderIds,
    order::{Order, OrderId},
    pace::{Activity, PaceSource},
    queue::{Admission, DispatchQueue},
};
use core::time::Duration;
use std::sync::Arc;
use tokio::time::sleep;

/// Per-customer behavior shared by every member of the pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerConfig {
    /// Meals a customer must be served before going home. Abandoned orders do
    /// not count.
    pub meal_quota: usize,
    /// How long a customer waits for the waiter to accept an order.
    pub admission_budget: Duration,
    /// Upper bound on orders placed. `None` keeps a customer ordering until
    /// the quota is met, however many orders that takes.
    pub max_attempts: Option<usize>,
}

impl Default for CustomerConfig {
    fn default() -> Self {
        Self {
            meal_quota: 5,
            admission_budget: Duration::from_secs(7),
            max_attempts: None,
        }
    }
}

/// What a customer did between arriving and going home.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerReport {
    pub name: Arc<str>,
    pub served: usize,
    pub abandoned: usize,
    /// Every order placed, in the order it was placed.
    pub order_ids: Vec<OrderId>,
}

/// Customer task: places orders one after another until `meal_quota` meals
/// have been served.
///
/// Each round creates a fresh [`Order`], then races admission against
/// `admission_budget`. Once admitted the customer waits for the cook with no
/// further timeout, then eats. If the budget runs out first the order is
/// abandoned and the customer sulks for [`Activity::Frustration`]. Either way
/// it rests for [`Activity::Resting`] before the next round.
///
/// # Errors
///
/// - [`DispatchError::QueueClosed`] if the queue was closed while this
///   customer was still ordering.
/// - [`DispatchError::ReplyLost`] if an admitted order was dropped without
///   being cooked.
///
/// [`DispatchError::QueueClosed`]: crate::DispatchError::QueueClosed
/// [`DispatchError::ReplyLost`]: crate::DispatchError::ReplyLost
pub async fn customer_loop(
    name: Arc<str>,
    queue: Arc<DispatchQueue>,
    ids: Arc<OrderIds>,
    pace: Arc<dyn PaceSource>,
    config: CustomerConfig,
) -> Result<CustomerReport> {
    tracing::info!("{name} starting dining experience");

    let mut report = CustomerReport {
        name: Arc::clone(&name),
        served: 0,
        abandoned: 0,
        order_ids: Vec::with_capacity(config.meal_quota),
    };

    while report.served < config.meal_quota {
        if config
            .max_attempts
            .is_some_and(|max| report.order_ids.len() >= max)
        {
            tracing::info!("{name} giving up after {} orders", report.order_ids.len());
            break;
        }

        let (order, reply) = Order::new(ids.next_id(), Arc::clone(&name));
        let order_id = order.id();
        report.order_ids.push(order_id);
        tracing::info!("{name} placed order {order_id}");

        match queue.try_admit(order, config.admission_budget).await? {
            Admission::Admitted => {
                let meal = reply.wait().await?;
                tracing::info!(
                    "{name} eating cooked order {} prepared by {}",
                    meal.id(),
                    meal.prepared_by()
                );
                sleep(pace.duration(Activity::Eating)).await;
                report.served += 1;
            }
            Admission::TimedOut(_) => {
                tracing::info!("{name} waiting too long, abandoning order {order_id}");
                sleep(pace.duration(Activity::Frustration)).await;
                report.abandoned += 1;
            }
        }

        sleep(pace.duration(Activity::Resting)).await;
    }

    tracing::info!("{name} going home after eating {} meals", report.served);
    Ok(report)
}
