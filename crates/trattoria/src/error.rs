//! Error types for the dispatch system.
//!
//! Abandoning an order is a modelled outcome and never shows up here. Every
//! variant below is a broken contract between the coordinator, the queue and
//! the pools; the simulation binary aborts when it sees one.

use crate::order::OrderId;
use thiserror::Error;

/// A result type defaulting to [`DispatchError`].
pub type Result<T, E = DispatchError> = core::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// An admission was attempted after the queue had been closed.
    #[error("order {order_id} submitted to a closed dispatch queue")]
    QueueClosed { order_id: OrderId },

    /// `close()` was called on a queue that is already drain-only.
    #[error("dispatch queue closed twice")]
    AlreadyClosed,

    /// The reply path was dropped before a cook delivered the order.
    #[error("reply for order {order_id} was lost before delivery")]
    ReplyLost { order_id: OrderId },

    /// The coordinator was built from an unusable configuration.
    #[error("invalid kitchen configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A cook or customer task panicked or was aborted.
    #[error("task failed: {context}")]
    TaskFailed { context: String },
}

impl From<tokio::task::JoinError> for DispatchError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed {
            context: err.to_string(),
        }
    }
}
