//! Error types returned at the queue boundary.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, QueueError>;

/// Errors reported by queue operations.
///
/// `EmptyQueue` and `OverflowQueue` are the two conditions the core itself
/// produces; both leave the queue untouched and are expected under normal load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// No entry is available anywhere in the queue right now
    #[error("empty queue")]
    EmptyQueue,

    /// The payload cannot be accommodated within the configured bounds
    #[error("full queue, maximum size limit reached")]
    OverflowQueue,

    /// Every producer handle has been dropped and the queue is drained
    #[error("all producers have disconnected")]
    Disconnected,

    /// Builder parameters that cannot form a queue
    #[error("invalid queue configuration: {0}")]
    InvalidConfig(String),
}

impl QueueError {
    /// True for conditions a caller is expected to retry on.
    pub fn is_transient(&self) -> bool {
        matches!(self, QueueError::EmptyQueue | QueueError::OverflowQueue)
    }
}
