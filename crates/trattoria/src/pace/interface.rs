use core::time::Duration;

/// The simulated activities whose length is decided by a [`PaceSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Activity {
    /// A cook preparing one order.
    Cooking,
    /// A customer eating a delivered order.
    Eating,
    /// A customer's pause after abandoning an order.
    Frustration,
    /// A customer's pause before placing the next order.
    Resting,
}

impl Activity {
    pub const ALL: [Self; 4] = [Self::Cooking, Self::Eating, Self::Frustration, Self::Resting];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Cooking => 0,
            Self::Eating => 1,
            Self::Frustration => 2,
            Self::Resting => 3,
        }
    }
}

/// A trait for strategies that decide how long each simulated activity takes.
///
/// Cooks and customers never pick durations themselves; they ask the pace
/// source they were built with. Plug in [`RandomPace`] for the reference
/// behavior or [`FixedPace`] to make every interleaving reproducible.
///
/// # Example
/// ```
/// use core::time::Duration;
/// use trattoria::{Activity, PaceSource};
///
/// struct Instant;
/// impl PaceSource for Instant {
///     fn duration(&self, _activity: Activity) -> Duration {
///         Duration::ZERO
///     }
/// }
///
/// assert_eq!(Instant.duration(Activity::Cooking), Duration::ZERO);
/// ```
///
/// [`RandomPace`]: crate::RandomPace
/// [`FixedPace`]: crate::FixedPace
pub trait PaceSource: Send + Sync {
    fn duration(&self, activity: Activity) -> Duration;
}
