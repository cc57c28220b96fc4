//! Error types for the queue and the dispatcher configuration.
//!
//! The queue's primary interface reports failure with a plain `bool`, which is
//! all an interrupt handler can act on. The `try_*` variants return these
//! errors for callers that want something to log or propagate with `?`.

use thiserror::Error;

/// Errors reported by [`EventQueue`](crate::EventQueue) operations.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// Every slot is occupied; the event was dropped.
    #[error("event queue full ({capacity} slots); event dropped")]
    Full {
        /// Capacity of the queue that refused the event.
        capacity: usize,
    },
    /// Nothing is pending.
    #[error("event queue empty")]
    Empty,
}

impl QueueError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            QueueError::Full { .. } => "queue_full",
            QueueError::Empty => "queue_empty",
        }
    }
}

/// Errors raised while building a [`Dispatcher`](crate::Queue::Dispatcher).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A dispatcher must be allowed to deliver at least one event per pass.
    #[error("batch limit must be at least 1")]
    ZeroBatchLimit,
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::ZeroBatchLimit => "config_zero_batch_limit",
        }
    }
}
