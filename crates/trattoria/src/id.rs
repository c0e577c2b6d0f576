use crate::order::OrderId;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Arc<OrderIds>> = OnceLock::new();

/// A lock-free, monotonically increasing source of [`OrderId`]s.
///
/// Any number of customers may call [`OrderIds::next_id`] concurrently; each
/// call observes a distinct value and values are never reused for the
/// lifetime of the counter. The first id handed out is `1`, so `0` can be
/// read as "nothing issued yet".
#[derive(Debug)]
pub struct OrderIds {
    last: AtomicU64,
}

impl Default for OrderIds {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderIds {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// The process-wide counter used by the coordinator unless another one is
    /// injected.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new())))
    }

    /// Issues the next id.
    pub fn next_id(&self) -> OrderId {
        OrderId::new(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// The most recently issued id, or `0` if none was issued.
    pub fn last_id(&self) -> OrderId {
        OrderId::new(self.last.load(Ordering::Relaxed))
    }
}
