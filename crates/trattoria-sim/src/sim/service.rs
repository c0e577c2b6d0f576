use super::config::SimConfig;
use std::sync::Arc;
use trattoria::{Coordinator, ServiceReport};

/// Runs one full service for `config` and returns its report.
///
/// Any [`trattoria::DispatchError`] is carried inside the returned
/// `anyhow::Error`, so `main` exits non-zero on it.
pub async fn serve(config: SimConfig) -> anyhow::Result<ServiceReport> {
    let report = Coordinator::new(config.kitchen, Arc::new(config.pace))?
        .run()
        .await?;

    tracing::info!(
        "Served {} meals, {} orders abandoned, at most {} orders waiting at once",
        report.meals_served(),
        report.orders_abandoned(),
        report.high_water
    );
    Ok(report)
}
