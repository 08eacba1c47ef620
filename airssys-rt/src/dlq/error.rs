//! Dead-letter queue errors.

/// Error operating on the dead-letter queue.
#[derive(Debug, thiserror::Error)]
pub enum DlqError {
    /// `retry`/`remove` was called with an index past the current snapshot.
    #[error("no dead letter at index {0}")]
    IndexOutOfBounds(usize),

    /// The caller-supplied retry closure reported failure; the entry stays
    /// queued with its attempt counter bumped.
    #[error("retry failed: {0}")]
    RetryFailed(String),
}
