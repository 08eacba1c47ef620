//! Dynamically-typed wire message matching the runtime's JSON message shape.
//!
//! Internal system actors (event broker, directory, virtual actor directory)
//! and behavior-based actors exchange [`DynamicMessage`] rather than a
//! compile-time-fixed payload type, since their callers are not known at
//! compile time. Strongly-typed actors built directly on [`Actor`](crate::actor::Actor)
//! keep using their own `Message` implementations.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; 
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Layer 3: Internal module imports
use super::traits::{Message, MessagePriority};

/// Current wire version for [`DynamicMessage`] payloads.
pub const MESSAGE_WIRE_VERSION: u32 = 1;

/// A self-describing message: type tag, JSON payload, timestamp, version and
/// an optional correlation id for request/reply matching.
///
/// # Example
/// ```rust
/// use airssys_rt::message::DynamicMessage;
/// use serde_json::json;
///
/// let msg = DynamicMessage::new("user.created", json!({ "id": 42 }));
/// assert_eq!(msg.message_type, "user.created");
/// assert!(msg.correlation_id.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicMessage {
    /// Logical message type, e.g. `"user.created"` or `"orders.place"`.
    pub message_type: String,

    /// Arbitrary JSON-serializable payload.
    pub payload: Value,

    /// Creation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Wire format version, for forward compatibility.
    pub version: u32,

    /// Correlation id used to match an ask reply to its request.
    /// Formatted as `corr-<timestamp>-<counter>` by the correlation manager.
    pub correlation_id: Option<String>,

    /// Routing priority (not part of the wire payload's identity, but
    /// consulted by mailboxes for ordering).
    #[serde(default)]
    pub priority: MessagePriority,
}

impl DynamicMessage {
    /// Build a new message with no correlation id.
    pub fn new(message_type: impl Into<String>, payload: Value) -> Self {
        Self {
            message_type: message_type.into(),
            payload,
            timestamp: Utc::now(),
            version: MESSAGE_WIRE_VERSION,
            correlation_id: None,
            priority: MessagePriority::Normal,
        }
    }

    /// Attach a correlation id, typically produced by the correlation manager.
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Set an explicit priority.
    pub fn with_priority(mut self, priority: MessagePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Deserialize the payload into a concrete type.
    pub fn decode_payload<T: for<'de> Deserialize<'de>>(&self) -> Result<T, DecodeError> {
        serde_json::from_value(self.payload.clone()).map_err(DecodeError::from)
    }
}

/// Error returned when a [`DynamicMessage`] payload cannot be decoded into
/// the type the caller expected.
#[derive(Debug, thiserror::Error)]
#[error("failed to decode message payload: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

impl fmt::Display for MessagePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessagePriority::Low => "low",
            MessagePriority::Normal => "normal",
            MessagePriority::High => "high",
            MessagePriority::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

impl Message for DynamicMessage {
    const MESSAGE_TYPE: &'static str = "dynamic";

    fn priority(&self) -> MessagePriority {
        self.priority
    }
}
