use crate::{Activity, PaceSource};
use core::time::Duration;

/// A [`PaceSource`] that always returns the same duration per activity.
///
/// Used in tests together with Tokio's paused clock so that the order in
/// which cooks and customers wake up is fully determined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedPace {
    durations: [Duration; 4],
}

impl FixedPace {
    /// Every activity takes `duration`.
    pub const fn uniform(duration: Duration) -> Self {
        Self {
            durations: [duration; 4],
        }
    }

    /// Every activity completes immediately.
    pub const fn instant() -> Self {
        Self::uniform(Duration::ZERO)
    }

    #[must_use]
    pub const fn with(mut self, activity: Activity, duration: Duration) -> Self {
        self.durations[activity.index()] = duration;
        self
    }
}

impl PaceSource for FixedPace {
    fn duration(&self, activity: Activity) -> Duration {
        self.durations[activity.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_single_activity() {
        let pace = FixedPace::instant().with(Activity::Cooking, Duration::from_millis(50));
        assert_eq!(pace.duration(Activity::Cooking), Duration::from_millis(50));
        assert_eq!(pace.duration(Activity::Eating), Duration::ZERO);
        assert_eq!(pace.duration(Activity::Resting), Duration::ZERO);
    }
}
