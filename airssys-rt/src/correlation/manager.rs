//! Correlation manager implementation.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::oneshot;
use tokio::time::timeout;

// Layer 3: Internal module imports
use super::CorrelationError;
use crate::message::DynamicMessage;

/// A pending ask, tracked by correlation id until its reply arrives, it is
/// explicitly failed/cancelled, or it times out.
pub struct PendingAsk {
    reply_tx: oneshot::Sender<Result<DynamicMessage, CorrelationError>>,
}

/// Tracks in-flight ask requests and resolves them when a matching reply
/// arrives, or fails them once their timeout elapses, they are explicitly
/// cancelled, or the whole manager is cleared (§4.3).
///
/// # Example
/// ```rust
/// use airssys_rt::correlation::CorrelationManager;
/// use airssys_rt::message::DynamicMessage;
/// use serde_json::json;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let manager = CorrelationManager::new();
/// let correlation_id = manager.next_correlation_id();
/// let rx = manager.register(correlation_id.clone());
///
/// let reply = DynamicMessage::new("pong", json!({})).with_correlation_id(correlation_id.clone());
/// manager.resolve(&correlation_id, reply).unwrap();
///
/// let resolved = tokio::time::timeout(Duration::from_millis(50), rx).await.unwrap().unwrap().unwrap();
/// assert_eq!(resolved.message_type, "pong");
/// # }
/// ```
#[derive(Clone)]
pub struct CorrelationManager {
    pending: Arc<DashMap<String, PendingAsk>>,
    counter: Arc<AtomicU64>,
}

impl CorrelationManager {
    /// Create an empty correlation manager.
    pub fn new() -> Self {
        Self {
            pending: Arc::new(DashMap::new()),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Generate the next correlation id, formatted `corr-<timestamp>-<counter>`.
    pub fn next_correlation_id(&self) -> String {
        let counter = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("corr-{}-{counter}", Utc::now().timestamp_millis())
    }

    /// Register a new pending ask, returning a receiver for its eventual
    /// reply. The returned handle must be dropped (or explicitly cancelled
    /// via [`CorrelationManager::cancel`]) if the caller gives up waiting,
    /// to avoid leaking an entry.
    pub fn register(
        &self,
        correlation_id: String,
    ) -> oneshot::Receiver<Result<DynamicMessage, CorrelationError>> {
        let (tx, rx) = oneshot::channel();
        self.pending.insert(correlation_id, PendingAsk { reply_tx: tx });
        rx
    }

    /// Resolve a pending ask with its reply. Returns an error if no ask is
    /// pending under this correlation id (already timed out, unknown, or
    /// already resolved).
    pub fn resolve(
        &self,
        correlation_id: &str,
        reply: DynamicMessage,
    ) -> Result<(), CorrelationError> {
        let (_, pending) = self
            .pending
            .remove(correlation_id)
            .ok_or_else(|| CorrelationError::UnknownCorrelationId(correlation_id.to_string()))?;

        pending
            .reply_tx
            .send(Ok(reply))
            .map_err(|_| CorrelationError::ReplyChannelClosed(correlation_id.to_string()))
    }

    /// Fail a pending ask with a specific reason, rejecting its waiter
    /// instead of leaving it to time out. Returns an error if no ask is
    /// pending under this correlation id.
    pub fn fail(&self, correlation_id: &str, reason: impl Into<String>) -> Result<(), CorrelationError> {
        let (_, pending) = self
            .pending
            .remove(correlation_id)
            .ok_or_else(|| CorrelationError::UnknownCorrelationId(correlation_id.to_string()))?;

        let err = CorrelationError::Failed {
            correlation_id: correlation_id.to_string(),
            reason: reason.into(),
        };
        pending
            .reply_tx
            .send(Err(err))
            .map_err(|_| CorrelationError::ReplyChannelClosed(correlation_id.to_string()))
    }

    /// Cancel a pending ask, e.g. because its caller stopped waiting. Unlike
    /// [`CorrelationManager::fail`], a missing entry is not an error: callers
    /// use this for best-effort cleanup (timeout paths, shutdown).
    pub fn cancel(&self, correlation_id: &str) {
        if let Some((id, pending)) = self.pending.remove(correlation_id) {
            let _ = pending.reply_tx.send(Err(CorrelationError::Failed {
                correlation_id: id,
                reason: "cancelled".to_string(),
            }));
        }
    }

    /// Reject every pending ask with `reason`, e.g. during system shutdown
    /// (§4.3 `clearAll`). Waiters see [`CorrelationError::Stopped`] rather
    /// than a bare timeout or closed channel.
    pub fn clear_all(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let ids: Vec<String> = self.pending.iter().map(|entry| entry.key().clone()).collect();
        for id in ids {
            if let Some((_, pending)) = self.pending.remove(&id) {
                let _ = pending.reply_tx.send(Err(CorrelationError::Stopped {
                    correlation_id: id,
                    reason: reason.clone(),
                }));
            }
        }
    }

    /// Register an ask and await its reply with a timeout, cleaning up the
    /// pending entry either way. This is the primary entry point used by the
    /// plan interpreter's `Ask` dispatch.
    pub async fn ask(
        &self,
        correlation_id: String,
        timeout_duration: Duration,
    ) -> Result<DynamicMessage, CorrelationError> {
        let rx = self.register(correlation_id.clone());

        match timeout(timeout_duration, rx).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(_)) => Err(CorrelationError::ReplyChannelClosed(correlation_id)),
            Err(_) => {
                self.cancel(&correlation_id);
                Err(CorrelationError::Timeout {
                    correlation_id,
                    timeout_ms: timeout_duration.as_millis() as u64,
                })
            }
        }
    }

    /// Number of asks currently awaiting a reply.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for CorrelationManager {
    fn default() -> Self {
        Self::new()
    }
}
