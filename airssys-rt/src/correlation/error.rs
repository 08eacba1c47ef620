//! Correlation manager error types.

// Layer 2: Third-party crate imports
use thiserror::Error;

/// Errors produced while registering or resolving correlated asks.
#[derive(Debug, Error)]
pub enum CorrelationError {
    /// No reply arrived before the ask's timeout elapsed.
    #[error("ask {correlation_id} timed out after {timeout_ms}ms")]
    Timeout {
        /// The correlation id that timed out.
        correlation_id: String,
        /// Configured timeout, in milliseconds.
        timeout_ms: u64,
    },

    /// A reply referenced a correlation id with no pending ask.
    #[error("no pending ask for correlation id {0}")]
    UnknownCorrelationId(String),

    /// The pending ask's reply channel was dropped before a reply arrived.
    #[error("reply channel closed for correlation id {0}")]
    ReplyChannelClosed(String),

    /// The ask was explicitly cancelled or failed by the caller rather than
    /// timing out or receiving a reply (e.g. `fail`/`cancel`).
    #[error("ask {correlation_id} failed: {reason}")]
    Failed {
        /// The correlation id that was failed.
        correlation_id: String,
        /// Why the ask was failed.
        reason: String,
    },

    /// Every pending ask was rejected at once, e.g. during system shutdown.
    #[error("ask {correlation_id} stopped: {reason}")]
    Stopped {
        /// The correlation id that was stopped.
        correlation_id: String,
        /// Why the pending asks were cleared.
        reason: String,
    },
}
