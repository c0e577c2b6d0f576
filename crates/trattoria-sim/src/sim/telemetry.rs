//! Logging setup for the simulation.
//!
//! Every state transition in the library is a `tracing` event. Here they are
//! rendered as one timestamped line each on stdout, filtered by `RUST_LOG`
//! (default `info`). Lines from different tasks interleave in emission order.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_ids(true)
                .with_target(false)
                .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339()),
        )
        .try_init()?;

    Ok(())
}
