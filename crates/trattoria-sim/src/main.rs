#![doc = include_str!("../README.md")]

mod sim;

use clap::Parser;
use sim::config::{CliArgs, SimConfig};
use sim::service::serve;
use sim::telemetry::init_telemetry;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = SimConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    serve(config).await?;
    Ok(())
}

fn log_startup_info(config: &SimConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting simulation with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Starting simulation with {} cooks and {} customers",
            config.kitchen.cooks.len(),
            config.kitchen.customers.len()
        );
    }
}
