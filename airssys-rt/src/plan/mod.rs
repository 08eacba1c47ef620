//! Message plan interpreter.
//!
//! A [`Behavior`](crate::behavior::Behavior) does not act on the outside
//! world directly; it returns a [`MessagePlan`] describing what should
//! happen, and the runtime interprets that plan. This keeps handler logic
//! pure and testable without mocking a broker or actor system.

pub mod instructions;
pub mod interpreter;

pub use instructions::{AskInstruction, DomainEvent, PlanStep, SendInstruction, SendMode};
pub use interpreter::{interpret_plan, PlanDispatcher, PlanError, PlanOutcome};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

/// A declarative description of the side effects a behavior wants performed
/// in response to a message.
///
/// # Example
/// ```rust
/// use airssys_rt::plan::{MessagePlan, SendInstruction};
/// use airssys_rt::util::ActorAddress;
/// use serde_json::json;
///
/// let plan = MessagePlan::Send(SendInstruction {
///     target: ActorAddress::named("worker"),
///     message_type: "ping".to_string(),
///     payload: json!({}),
///     mode: Default::default(),
/// });
/// assert!(!plan.is_nothing());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessagePlan {
    /// No side effects; the behavior fully handled the message internally.
    Nothing,

    /// Emit a domain event (published on the event broker).
    Emit(DomainEvent),

    /// Fire-and-forget send to another actor.
    Send(SendInstruction),

    /// Request/reply send that expects a correlated response.
    Ask(AskInstruction),

    /// An ordered sequence of steps, interpreted atomically: if any step
    /// fails to be accepted by its target (e.g. mailbox full, unknown
    /// address), none of the later steps are attempted.
    Sequence(Vec<PlanStep>),
}

impl MessagePlan {
    /// True if this plan performs no side effects.
    pub fn is_nothing(&self) -> bool {
        matches!(self, MessagePlan::Nothing)
    }

    /// Number of steps this plan expands to, for metrics/logging.
    pub fn step_count(&self) -> usize {
        match self {
            MessagePlan::Nothing => 0,
            MessagePlan::Emit(_) | MessagePlan::Send(_) | MessagePlan::Ask(_) => 1,
            MessagePlan::Sequence(steps) => steps.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ActorAddress;
    use serde_json::json;

    #[test]
    fn test_nothing_plan() {
        let plan = MessagePlan::Nothing;
        assert!(plan.is_nothing());
        assert_eq!(plan.step_count(), 0);
    }

    #[test]
    fn test_send_plan_step_count() {
        let plan = MessagePlan::Send(SendInstruction {
            target: ActorAddress::named("worker"),
            message_type: "ping".to_string(),
            payload: json!({}),
            mode: SendMode::default(),
        });
        assert_eq!(plan.step_count(), 1);
        assert!(!plan.is_nothing());
    }

    #[test]
    fn test_sequence_plan_step_count() {
        let plan = MessagePlan::Sequence(vec![
            PlanStep::Send(SendInstruction {
                target: ActorAddress::named("a"),
                message_type: "x".to_string(),
                payload: json!(null),
                mode: SendMode::default(),
            }),
            PlanStep::Emit(DomainEvent {
                topic: "orders.placed".to_string(),
                payload: json!({ "id": 1 }),
            }),
        ]);
        assert_eq!(plan.step_count(), 2);
    }
}
