//! The dead-letter queue: capped, FIFO-evicting, TTL-expiring storage for
//! messages that could not be delivered or processed (§4.9).
//!
//! Implemented as a plain owned structure rather than an actor — it has no
//! behavior of its own to drive, only storage and bookkeeping, and the
//! runtime has no periodic scheduler to hang an actor's tick off anyway.
//! Callers drive `cleanup_expired` on their own tick, same as
//! [`VirtualActorDirectory::cleanup_idle`](crate::virtual_actor::VirtualActorDirectory::cleanup_idle).

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::future::Future;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Duration as ChronoDuration, Utc}; 
use parking_lot::Mutex;
use serde::Serialize;

// Layer 3: Internal module imports
use super::entry::DeadLetterEntry;
use super::error::DlqError;
use crate::util::ActorAddress;

/// Default capacity before FIFO eviction kicks in.
pub const DEFAULT_DLQ_CAPACITY: usize = 1000;

/// Default per-entry time-to-live before `cleanup_expired` drops it.
pub fn default_dlq_ttl() -> ChronoDuration {
    ChronoDuration::hours(24)
}

/// Snapshot counters returned by [`DeadLetterQueue::stats`].
#[derive(Debug, Clone, Serialize)]
pub struct DlqStats {
    pub size: usize,
    pub capacity: usize,
    pub oldest_timestamp: Option<DateTime<Utc>>,
}

/// Capped, FIFO-evicting dead-letter store.
pub struct DeadLetterQueue {
    entries: Mutex<VecDeque<DeadLetterEntry>>,
    capacity: usize,
    ttl: ChronoDuration,
}

impl DeadLetterQueue {
    pub fn new(capacity: usize, ttl: ChronoDuration) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity.min(64))),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Append `entry`, evicting the oldest entry first if at capacity.
    pub fn add(&self, entry: DeadLetterEntry) {
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn get_all(&self) -> Vec<DeadLetterEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn get_by_actor(&self, target: &ActorAddress) -> Vec<DeadLetterEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| &entry.target_address == target)
            .cloned()
            .collect()
    }

    pub fn get_by_message_type(&self, message_type: &str) -> Vec<DeadLetterEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.message_type == message_type)
            .cloned()
            .collect()
    }

    /// Remove the entry at `index` in the current snapshot order (oldest
    /// first). The index is only valid for the instant it was observed.
    pub fn remove(&self, index: usize) -> Result<DeadLetterEntry, DlqError> {
        let mut entries = self.entries.lock();
        entries
            .remove(index)
            .ok_or(DlqError::IndexOutOfBounds(index))
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn size(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn stats(&self) -> DlqStats {
        let entries = self.entries.lock();
        DlqStats {
            size: entries.len(),
            capacity: self.capacity,
            oldest_timestamp: entries.front().map(|e| e.timestamp),
        }
    }

    /// Retry the entry at `index` via `retry_fn`. On success the entry is
    /// removed; on failure its `attempts`/`timestamp` are bumped and it
    /// stays queued.
    pub async fn retry<F, Fut, E>(&self, index: usize, retry_fn: F) -> Result<(), DlqError>
    where
        F: FnOnce(DeadLetterEntry) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: std::fmt::Display,
    {
        let entry = {
            let entries = self.entries.lock();
            entries
                .get(index)
                .cloned()
                .ok_or(DlqError::IndexOutOfBounds(index))?
        };

        match retry_fn(entry).await {
            Ok(()) => {
                let mut entries = self.entries.lock();
                entries.remove(index);
                Ok(())
            }
            Err(err) => {
                let mut entries = self.entries.lock();
                if let Some(entry) = entries.get_mut(index) {
                    entry.record_attempt();
                }
                Err(DlqError::RetryFailed(err.to_string()))
            }
        }
    }

    /// Drop every entry whose TTL has elapsed.
    pub fn cleanup_expired(&self) {
        let now = Utc::now();
        let mut entries = self.entries.lock();
        entries.retain(|entry| !entry.is_expired(now, self.ttl));
    }
}

impl Default for DeadLetterQueue {
    fn default() -> Self {
        Self::new(DEFAULT_DLQ_CAPACITY, default_dlq_ttl())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_entry(message_type: &str, target: ActorAddress) -> DeadLetterEntry {
        DeadLetterEntry::new(message_type, json!({}), target, "mailbox full")
    }

    #[test]
    fn test_add_and_size() {
        let dlq = DeadLetterQueue::new(10, ChronoDuration::hours(1));
        dlq.add(sample_entry("ping", ActorAddress::named("worker")));
        assert_eq!(dlq.size(), 1);
    }

    #[test]
    fn test_fifo_eviction_on_overflow() {
        let dlq = DeadLetterQueue::new(2, ChronoDuration::hours(1));
        dlq.add(sample_entry("a", ActorAddress::named("worker")));
        dlq.add(sample_entry("b", ActorAddress::named("worker")));
        dlq.add(sample_entry("c", ActorAddress::named("worker")));

        let all = dlq.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].message_type, "b");
        assert_eq!(all[1].message_type, "c");
    }

    #[test]
    fn test_get_by_actor_and_message_type() {
        let dlq = DeadLetterQueue::new(10, ChronoDuration::hours(1));
        let worker = ActorAddress::named("worker");
        let other = ActorAddress::named("other");
        dlq.add(sample_entry("ping", worker.clone()));
        dlq.add(sample_entry("pong", other));

        assert_eq!(dlq.get_by_actor(&worker).len(), 1);
        assert_eq!(dlq.get_by_message_type("pong").len(), 1);
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let dlq = DeadLetterQueue::new(10, ChronoDuration::hours(1));
        assert!(matches!(dlq.remove(0), Err(DlqError::IndexOutOfBounds(0))));
    }

    #[test]
    fn test_clear() {
        let dlq = DeadLetterQueue::new(10, ChronoDuration::hours(1));
        dlq.add(sample_entry("ping", ActorAddress::named("worker")));
        dlq.clear();
        assert_eq!(dlq.size(), 0);
    }

    #[tokio::test]
    async fn test_retry_success_removes_entry() {
        let dlq = DeadLetterQueue::new(10, ChronoDuration::hours(1));
        dlq.add(sample_entry("ping", ActorAddress::named("worker")));

        let result = dlq
            .retry(0, |_entry| async { Ok::<(), std::convert::Infallible>(()) })
            .await;

        assert!(result.is_ok());
        assert_eq!(dlq.size(), 0);
    }

    #[tokio::test]
    async fn test_retry_failure_bumps_attempts_and_keeps_entry() {
        let dlq = DeadLetterQueue::new(10, ChronoDuration::hours(1));
        dlq.add(sample_entry("ping", ActorAddress::named("worker")));

        let result = dlq.retry(0, |_entry| async { Err::<(), _>("still down") }).await;

        assert!(matches!(result, Err(DlqError::RetryFailed(_))));
        assert_eq!(dlq.get_all()[0].attempts, 2);
    }

    #[test]
    fn test_cleanup_expired_drops_stale_entries() {
        let dlq = DeadLetterQueue::new(10, ChronoDuration::zero());
        dlq.add(sample_entry("ping", ActorAddress::named("worker")));
        dlq.cleanup_expired();
        assert_eq!(dlq.size(), 0);
    }

    #[test]
    fn test_stats_reports_oldest_timestamp() {
        let dlq = DeadLetterQueue::new(10, ChronoDuration::hours(1));
        dlq.add(sample_entry("ping", ActorAddress::named("worker")));
        let stats = dlq.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.capacity, 10);
        assert!(stats.oldest_timestamp.is_some());
    }
}
