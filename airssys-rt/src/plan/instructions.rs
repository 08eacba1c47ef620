//! Individual plan step types.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Layer 3: Internal module imports
use crate::util::ActorAddress;

/// A domain event to publish on the event broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Topic the event is published under, e.g. `"orders.placed"`.
    pub topic: String,
    /// Event payload.
    pub payload: Value,
}

/// Delivery guarantee requested for a [`SendInstruction`] (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SendMode {
    /// Try once; an undeliverable message goes straight to the dead-letter queue.
    FireAndForget,
    /// Retry up to 3 attempts (with backoff) on transient failures before
    /// giving up to the dead-letter queue.
    Retry3,
    /// Retry with backoff until the target accepts delivery or the retry
    /// budget for guaranteed sends is exhausted, then dead-letter.
    Guaranteed,
}

impl Default for SendMode {
    fn default() -> Self {
        SendMode::FireAndForget
    }
}

/// A send to another actor, with a requested delivery guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendInstruction {
    /// Destination address.
    pub target: ActorAddress,
    /// Message type tag.
    pub message_type: String,
    /// Message payload.
    pub payload: Value,
    /// Delivery guarantee (§3). Defaults to [`SendMode::FireAndForget`] when
    /// absent from the wire payload.
    #[serde(default)]
    pub mode: SendMode,
}

/// A request/reply send that expects a correlated response within a timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskInstruction {
    /// Destination address.
    pub target: ActorAddress,
    /// Message type tag.
    pub message_type: String,
    /// Message payload.
    pub payload: Value,
    /// Maximum time to wait for a reply before the correlation manager
    /// resolves this ask with a timeout error.
    #[serde(with = "crate::util::duration_serde")]
    pub timeout: Duration,
}

/// One step inside a [`super::MessagePlan::Sequence`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlanStep {
    /// See [`DomainEvent`].
    Emit(DomainEvent),
    /// See [`SendInstruction`].
    Send(SendInstruction),
    /// See [`AskInstruction`].
    Ask(AskInstruction),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_instruction_roundtrip() {
        let instr = SendInstruction {
            target: ActorAddress::named("worker"),
            message_type: "ping".to_string(),
            payload: json!({ "n": 1 }),
            mode: SendMode::Retry3,
        };
        let json_str = serde_json::to_string(&instr).unwrap();
        let back: SendInstruction = serde_json::from_str(&json_str).unwrap();
        assert_eq!(back.message_type, "ping");
        assert_eq!(back.mode, SendMode::Retry3);
    }

    #[test]
    fn test_send_instruction_mode_defaults_to_fire_and_forget() {
        let wire = json!({
            "target": ActorAddress::named("worker"),
            "message_type": "ping",
            "payload": { "n": 1 },
        });
        let instr: SendInstruction = serde_json::from_value(wire).unwrap();
        assert_eq!(instr.mode, SendMode::FireAndForget);
    }

    #[test]
    fn test_ask_instruction_timeout() {
        let instr = AskInstruction {
            target: ActorAddress::named("worker"),
            message_type: "query".to_string(),
            payload: json!(null),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(instr.timeout, Duration::from_secs(5));
    }
}
