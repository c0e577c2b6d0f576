use anyhow::bail;
use clap::Parser;
use core::time::Duration;
use trattoria::{
    CustomerConfig, DEFAULT_COOKS, DEFAULT_CUSTOMERS, DEFAULT_QUEUE_CAPACITY, KitchenConfig,
    RandomPace,
};

/// Runtime configuration for the `trattoria-sim` binary.
///
/// Every setting defaults to the reference restaurant: three cooks, ten
/// customers, a waiter holding three orders, five meals per customer and a
/// seven second admission budget. Values can be overridden from CLI arguments
/// or environment variables (a `.env` file is honored).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "trattoria-sim",
    version,
    about = "Simulates customers and cooks sharing a bounded order queue"
)]
pub struct CliArgs {
    /// Names of the cooks, comma separated. One worker task per name.
    ///
    /// Environment variable: `COOKS`
    #[arg(long, env = "COOKS", value_delimiter = ',', default_values = DEFAULT_COOKS)]
    pub cooks: Vec<String>,

    /// Names of the customers, comma separated. One producer task per name.
    ///
    /// Environment variable: `CUSTOMERS`
    #[arg(long, env = "CUSTOMERS", value_delimiter = ',', default_values = DEFAULT_CUSTOMERS)]
    pub customers: Vec<String>,

    /// Maximum number of orders waiting for a cook.
    ///
    /// Environment variable: `QUEUE_CAPACITY`
    #[arg(long, env = "QUEUE_CAPACITY", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// Meals each customer eats before going home. Abandoned orders do not
    /// count.
    ///
    /// Environment variable: `MEAL_QUOTA`
    #[arg(long, env = "MEAL_QUOTA", default_value_t = 5)]
    pub meal_quota: usize,

    /// How long a customer waits for the waiter to accept an order.
    ///
    /// Environment variable: `ADMISSION_BUDGET_MS`
    #[arg(long, env = "ADMISSION_BUDGET_MS", default_value_t = 7_000)]
    pub admission_budget_ms: u64,

    /// Stop a customer after this many orders even if still hungry. Unset
    /// means keep ordering until the quota is met.
    ///
    /// Environment variable: `MAX_ATTEMPTS`
    #[arg(long, env = "MAX_ATTEMPTS")]
    pub max_attempts: Option<usize>,

    /// Base time unit for every randomized activity. Cooking takes 10-20
    /// units, eating and resting 2-4, sulking after an abandoned order 5-10.
    ///
    /// Environment variable: `PACE_UNIT_MS`
    #[arg(long, env = "PACE_UNIT_MS", default_value_t = 500)]
    pub pace_unit_ms: u64,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub kitchen: KitchenConfig,
    pub pace: RandomPace,
}

impl TryFrom<CliArgs> for SimConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let cooks = trimmed(args.cooks);
        let customers = trimmed(args.customers);

        if cooks.is_empty() {
            bail!("COOKS must name at least one cook");
        }

        if customers.is_empty() {
            bail!("CUSTOMERS must name at least one customer");
        }

        if args.queue_capacity == 0 {
            bail!("QUEUE_CAPACITY must be greater than 0");
        }

        if args.meal_quota == 0 {
            bail!("MEAL_QUOTA must be greater than 0");
        }

        if args.max_attempts == Some(0) {
            bail!("MAX_ATTEMPTS must be greater than 0 when set");
        }

        if args.pace_unit_ms == 0 {
            bail!("PACE_UNIT_MS must be greater than 0");
        }

        Ok(Self {
            kitchen: KitchenConfig {
                cooks,
                customers,
                queue_capacity: args.queue_capacity,
                customer: CustomerConfig {
                    meal_quota: args.meal_quota,
                    admission_budget: Duration::from_millis(args.admission_budget_ms),
                    max_attempts: args.max_attempts,
                },
            },
            pace: RandomPace::with_unit(Duration::from_millis(args.pace_unit_ms)),
        })
    }
}

fn trimmed(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<SimConfig> {
        let argv = std::iter::once("trattoria-sim").chain(args.iter().copied());
        SimConfig::try_from(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn defaults_match_reference_restaurant() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.kitchen, KitchenConfig::default());
        assert_eq!(config.pace.unit(), RandomPace::DEFAULT_UNIT);
    }

    #[test]
    fn pools_are_comma_separated() {
        let config = parse(&["--cooks", "Gusteau, Skinner", "--customers", "Ego"]).unwrap();
        assert_eq!(config.kitchen.cooks, ["Gusteau", "Skinner"]);
        assert_eq!(config.kitchen.customers, ["Ego"]);
    }

    #[test]
    fn rejects_empty_pools_and_zero_sizes() {
        assert!(parse(&["--cooks", " , "]).is_err());
        assert!(parse(&["--queue-capacity", "0"]).is_err());
        assert!(parse(&["--meal-quota", "0"]).is_err());
        assert!(parse(&["--max-attempts", "0"]).is_err());
        assert!(parse(&["--pace-unit-ms", "0"]).is_err());
    }
}
