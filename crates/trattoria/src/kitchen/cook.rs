use crate::{
    order::Delivery,
    pace::{Activity, PaceSource},
    queue::DispatchQueue,
};
use std::sync::Arc;
use tokio::time::sleep;

/// What a cook did between opening and closing time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookReport {
    pub name: Arc<str>,
    /// Orders delivered to a waiting customer.
    pub prepared: usize,
    /// Orders cooked for a customer that had already stopped waiting.
    pub unclaimed: usize,
}

/// Cook task: takes orders off the [`DispatchQueue`] one at a time until the
/// queue is closed and drained.
///
/// Each order is held for [`Activity::Cooking`], stamped with the cook's name
/// and sent back over the order's reply path. A cook never works on two
/// orders at once and is never cancelled; it stops only when
/// [`DispatchQueue::take`] reports end-of-stream.
///
/// Delivering to a customer that has gone away never blocks. The meal is
/// dropped and counted in [`CookReport::unclaimed`].
pub async fn cook_loop(
    name: Arc<str>,
    queue: Arc<DispatchQueue>,
    pace: Arc<dyn PaceSource>,
) -> CookReport {
    tracing::info!("{name} starting work");

    let mut report = CookReport {
        name: Arc::clone(&name),
        prepared: 0,
        unclaimed: 0,
    };

    while let Some(order) = queue.take().await {
        let order_id = order.id();
        tracing::info!("{name} cooking order {order_id} for {}", order.customer());

        sleep(pace.duration(Activity::Cooking)).await;

        tracing::info!("{name} finished order {order_id} for {}", order.customer());
        match order.complete(Arc::clone(&name)) {
            Delivery::Delivered => report.prepared += 1,
            Delivery::Unclaimed => {
                tracing::debug!("{name} found nobody waiting for order {order_id}");
                report.unclaimed += 1;
            }
        }
    }

    tracing::info!("{name} shutting down");
    report
}
