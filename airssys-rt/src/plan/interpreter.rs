//! Interprets a [`super::MessagePlan`] by dispatching its steps through a
//! [`PlanDispatcher`] — typically the system's [`ActorContext`](crate::actor::ActorContext).

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use thiserror::Error;

// Layer 3: Internal module imports
use super::{AskInstruction, DomainEvent, MessagePlan, PlanStep, SendInstruction};

/// Abstraction over "the thing that can actually perform plan steps" —
/// sending messages, asking with a timeout, and emitting domain events.
/// Implemented by [`ActorContext`](crate::actor::ActorContext) so the
/// interpreter stays decoupled from the concrete broker/system types.
#[async_trait]
pub trait PlanDispatcher: Send + Sync {
    /// Error produced by dispatch operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Dispatch a fire-and-forget send.
    async fn dispatch_send(&self, instruction: &SendInstruction) -> Result<(), Self::Error>;

    /// Dispatch a request/reply ask, returning once the correlation manager
    /// either receives a reply or times out.
    async fn dispatch_ask(&self, instruction: &AskInstruction) -> Result<(), Self::Error>;

    /// Publish a domain event on the event broker.
    async fn dispatch_emit(&self, event: &DomainEvent) -> Result<(), Self::Error>;
}

/// Error interpreting a plan: either a dispatcher failure or an atomicity
/// violation (a later step in a sequence failed after earlier ones were
/// already dispatched — surfaced so callers can route to the dead-letter
/// queue or retry interceptor).
#[derive(Debug, Error)]
pub enum PlanError<E: std::error::Error + Send + Sync + 'static> {
    /// A dispatch step failed.
    #[error("plan step {step_index} failed: {source}")]
    StepFailed {
        /// Index of the failing step within the plan (0 for non-sequence plans).
        step_index: usize,
        /// Underlying dispatcher error.
        #[source]
        source: E,
    },
}

/// Result of successfully interpreting a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOutcome {
    /// Number of steps that were successfully dispatched.
    pub steps_dispatched: usize,
}

impl fmt::Display for PlanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} step(s) dispatched", self.steps_dispatched)
    }
}

/// Interpret a plan against a dispatcher.
///
/// Sequence steps are dispatched atomically: dispatch stops at the first
/// failing step and the error identifies which step failed. Nothing is
/// rolled back (the runtime has no transactional messaging), but callers
/// learn exactly how far execution got.
pub async fn interpret_plan<D: PlanDispatcher>(
    dispatcher: &D,
    plan: &MessagePlan,
) -> Result<PlanOutcome, PlanError<D::Error>> {
    match plan {
        MessagePlan::Nothing => Ok(PlanOutcome { steps_dispatched: 0 }),
        MessagePlan::Emit(event) => {
            dispatcher
                .dispatch_emit(event)
                .await
                .map_err(|source| PlanError::StepFailed {
                    step_index: 0,
                    source,
                })?;
            Ok(PlanOutcome { steps_dispatched: 1 })
        }
        MessagePlan::Send(instruction) => {
            dispatcher
                .dispatch_send(instruction)
                .await
                .map_err(|source| PlanError::StepFailed {
                    step_index: 0,
                    source,
                })?;
            Ok(PlanOutcome { steps_dispatched: 1 })
        }
        MessagePlan::Ask(instruction) => {
            dispatcher
                .dispatch_ask(instruction)
                .await
                .map_err(|source| PlanError::StepFailed {
                    step_index: 0,
                    source,
                })?;
            Ok(PlanOutcome { steps_dispatched: 1 })
        }
        MessagePlan::Sequence(steps) => {
            for (index, step) in steps.iter().enumerate() {
                let result = match step {
                    PlanStep::Emit(event) => dispatcher.dispatch_emit(event).await,
                    PlanStep::Send(instruction) => dispatcher.dispatch_send(instruction).await,
                    PlanStep::Ask(instruction) => dispatcher.dispatch_ask(instruction).await,
                };
                result.map_err(|source| PlanError::StepFailed {
                    step_index: index,
                    source,
                })?;
            }
            Ok(PlanOutcome {
                steps_dispatched: steps.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ActorAddress;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug, Error)]
    #[error("dispatch failed")]
    struct TestError;

    struct RecordingDispatcher {
        calls: Arc<Mutex<Vec<String>>>,
        fail_on: Option<usize>,
    }

    #[async_trait]
    impl PlanDispatcher for RecordingDispatcher {
        type Error = TestError;

        async fn dispatch_send(&self, instruction: &SendInstruction) -> Result<(), Self::Error> {
            let mut calls = self.calls.lock();
            let idx = calls.len();
            calls.push(format!("send:{}", instruction.message_type));
            if self.fail_on == Some(idx) {
                return Err(TestError);
            }
            Ok(())
        }

        async fn dispatch_ask(&self, instruction: &AskInstruction) -> Result<(), Self::Error> {
            let mut calls = self.calls.lock();
            let idx = calls.len();
            calls.push(format!("ask:{}", instruction.message_type));
            if self.fail_on == Some(idx) {
                return Err(TestError);
            }
            Ok(())
        }

        async fn dispatch_emit(&self, event: &DomainEvent) -> Result<(), Self::Error> {
            let mut calls = self.calls.lock();
            let idx = calls.len();
            calls.push(format!("emit:{}", event.topic));
            if self.fail_on == Some(idx) {
                return Err(TestError);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_interpret_nothing() {
        let dispatcher = RecordingDispatcher {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        };
        let outcome = interpret_plan(&dispatcher, &MessagePlan::Nothing).await.unwrap();
        assert_eq!(outcome.steps_dispatched, 0);
    }

    #[tokio::test]
    async fn test_interpret_send() {
        let dispatcher = RecordingDispatcher {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        };
        let plan = MessagePlan::Send(SendInstruction {
            target: ActorAddress::named("worker"),
            message_type: "ping".to_string(),
            payload: json!({}),
            mode: Default::default(),
        });
        let outcome = interpret_plan(&dispatcher, &plan).await.unwrap();
        assert_eq!(outcome.steps_dispatched, 1);
        assert_eq!(dispatcher.calls.lock().as_slice(), ["send:ping"]);
    }

    #[tokio::test]
    async fn test_interpret_sequence_atomic_stop_on_failure() {
        let dispatcher = RecordingDispatcher {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: Some(1),
        };
        let plan = MessagePlan::Sequence(vec![
            PlanStep::Send(SendInstruction {
                target: ActorAddress::named("a"),
                message_type: "first".to_string(),
                payload: json!(null),
                mode: Default::default(),
            }),
            PlanStep::Send(SendInstruction {
                target: ActorAddress::named("b"),
                message_type: "second".to_string(),
                payload: json!(null),
                mode: Default::default(),
            }),
            PlanStep::Send(SendInstruction {
                target: ActorAddress::named("c"),
                message_type: "third".to_string(),
                payload: json!(null),
                mode: Default::default(),
            }),
        ]);

        let err = interpret_plan(&dispatcher, &plan).await.unwrap_err();
        match err {
            PlanError::StepFailed { step_index, .. } => assert_eq!(step_index, 1),
        }
        // Only the first two steps were attempted; the third never dispatched.
        assert_eq!(dispatcher.calls.lock().as_slice(), ["send:first", "send:second"]);
    }

    #[tokio::test]
    async fn test_interpret_ask_and_emit() {
        let dispatcher = RecordingDispatcher {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        };
        let plan = MessagePlan::Ask(AskInstruction {
            target: ActorAddress::named("db"),
            message_type: "query".to_string(),
            payload: json!(null),
            timeout: Duration::from_secs(1),
        });
        interpret_plan(&dispatcher, &plan).await.unwrap();

        let plan = MessagePlan::Emit(DomainEvent {
            topic: "orders.placed".to_string(),
            payload: json!(null),
        });
        interpret_plan(&dispatcher, &plan).await.unwrap();

        assert_eq!(
            dispatcher.calls.lock().as_slice(),
            ["ask:query", "emit:orders.placed"]
        );
    }
}
