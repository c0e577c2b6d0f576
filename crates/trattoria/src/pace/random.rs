use crate::{Activity, PaceSource};
use core::time::Duration;
use rand::{Rng, rng};

/// A [`PaceSource`] that draws every duration from the thread-local RNG.
///
/// Each activity is assigned a multiplier `k`. Its duration is drawn
/// uniformly from `[k * unit, 2 * k * unit)`. With the default half-second
/// unit this gives:
///
/// | activity      | k  | range            |
/// |---------------|----|------------------|
/// | `Cooking`     | 10 | 5000 – 9999 ms   |
/// | `Eating`      | 2  | 1000 – 1999 ms   |
/// | `Frustration` | 5  | 2500 – 4999 ms   |
/// | `Resting`     | 2  | 1000 – 1999 ms   |
///
/// Shrinking the unit speeds the whole simulation up without changing the
/// relative timing of the actors.
#[derive(Clone, Debug)]
pub struct RandomPace {
    unit: Duration,
    multipliers: [u32; 4],
}

impl Default for RandomPace {
    fn default() -> Self {
        Self::with_unit(Self::DEFAULT_UNIT)
    }
}

impl RandomPace {
    pub const DEFAULT_UNIT: Duration = Duration::from_millis(500);

    pub const fn with_unit(unit: Duration) -> Self {
        Self {
            unit,
            multipliers: [10, 2, 5, 2],
        }
    }

    /// Overrides the multiplier used for `activity`.
    #[must_use]
    pub const fn with_multiplier(mut self, activity: Activity, k: u32) -> Self {
        self.multipliers[activity.index()] = k;
        self
    }

    pub const fn unit(&self) -> Duration {
        self.unit
    }

    /// The inclusive lower and exclusive upper bound for `activity`.
    pub fn bounds(&self, activity: Activity) -> (Duration, Duration) {
        let base = self.unit * self.multipliers[activity.index()];
        (base, base * 2)
    }
}

impl PaceSource for RandomPace {
    fn duration(&self, activity: Activity) -> Duration {
        let (base, _) = self.bounds(activity);
        let span = base.as_micros() as u64;
        if span == 0 {
            return base;
        }
        base + Duration::from_micros(rng().random_range(0..span))
    }
}
