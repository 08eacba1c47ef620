//! A single dead-lettered message.

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; 
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Layer 3: Internal module imports
use crate::util::ActorAddress;

/// A message that could not be delivered or processed, retained for
/// inspection and manual or scheduled retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadLetterEntry {
    pub message_type: String,
    pub payload: Value,
    pub target_address: ActorAddress,
    pub reason: String,
    pub attempts: u32,
    pub timestamp: DateTime<Utc>,
    pub cause: Option<String>,
}

impl DeadLetterEntry {
    pub fn new(
        message_type: impl Into<String>,
        payload: Value,
        target_address: ActorAddress,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            message_type: message_type.into(),
            payload,
            target_address,
            reason: reason.into(),
            attempts: 1,
            timestamp: Utc::now(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Record another delivery attempt, bumping `attempts` and `timestamp`.
    pub(super) fn record_attempt(&mut self) {
        self.attempts += 1;
        self.timestamp = Utc::now();
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        now.signed_duration_since(self.timestamp) > ttl
    }
}
