//! # trattoria
//!
//! A bounded work-dispatch arrangement between a pool of customers and a
//! pool of cooks, modelled as a restaurant.
//!
//! - Customers place [`Order`]s with the [`DispatchQueue`] (the waiter),
//!   giving up on an order if it is not accepted within a deadline.
//! - Cooks take orders off the queue in arrival order, prepare them and hand
//!   each one back over the order's private reply path.
//! - The [`Coordinator`] waits for every customer to finish, closes the
//!   queue, then waits for the cooks to drain it.
//!
//! How long each simulated activity takes is decided by a [`PaceSource`], so
//! the same machinery runs with the randomized reference timing
//! ([`RandomPace`]) or with fixed durations for deterministic tests
//! ([`FixedPace`]).
//!
//! ```no_run
//! use std::sync::Arc;
//! use trattoria::{Coordinator, KitchenConfig, RandomPace};
//!
//! # async fn run() -> trattoria::Result<()> {
//! let report = Coordinator::new(KitchenConfig::default(), Arc::new(RandomPace::default()))?
//!     .run()
//!     .await?;
//! assert_eq!(report.meals_served(), 50);
//! # Ok(())
//! # }
//! ```

mod error;
mod id;
mod kitchen;
mod order;
mod pace;
mod queue;

pub use crate::error::*;
pub use crate::id::*;
pub use crate::kitchen::*;
pub use crate::order::*;
pub use crate::pace::*;
pub use crate::queue::*;
