//! The `Interceptor` trait and its phase decisions.

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use thiserror::Error;

// Layer 3: Internal module imports
use crate::message::DynamicMessage;

/// Decision returned by an interceptor phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptorDecision {
    /// Proceed with the (possibly rewritten) message.
    Continue(DynamicMessage),
    /// Stop the chain and drop the message (e.g. failed validation).
    Reject(String),
}

/// Error produced by an interceptor during a phase. Distinct from a
/// [`InterceptorDecision::Reject`]: this represents the interceptor itself
/// failing (e.g. a panic-free bug, an I/O error in a logging interceptor),
/// as opposed to the interceptor correctly judging the message invalid.
#[derive(Debug, Error)]
#[error("interceptor {interceptor} failed during {phase}: {reason}")]
pub struct InterceptorPhaseError {
    /// Name of the interceptor that failed.
    pub interceptor: &'static str,
    /// Phase in which the failure occurred.
    pub phase: &'static str,
    /// Human-readable failure reason.
    pub reason: String,
}

/// A cross-cutting hook invoked around message send/receive.
///
/// All phases default to a pass-through `Continue`, so implementations only
/// override the phases they care about.
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Interceptor name, used for logging and the priority-ordered chain.
    fn name(&self) -> &'static str;

    /// Priority; lower values run first. Default: 100.
    fn priority(&self) -> i32 {
        100
    }

    /// Called before a message is handed to the broker for sending.
    async fn before_send(
        &self,
        message: DynamicMessage,
    ) -> Result<InterceptorDecision, InterceptorPhaseError> {
        Ok(InterceptorDecision::Continue(message))
    }

    /// Called before a message is delivered to the target actor's handler.
    async fn before_receive(
        &self,
        message: DynamicMessage,
    ) -> Result<InterceptorDecision, InterceptorPhaseError> {
        Ok(InterceptorDecision::Continue(message))
    }

    /// Called after a message has been successfully processed.
    async fn after_process(
        &self,
        message: &DynamicMessage,
    ) -> Result<(), InterceptorPhaseError> {
        let _ = message;
        Ok(())
    }

    /// Called when processing a message raised an error. Returning `true`
    /// tells the chain the error was handled (e.g. scheduled for retry) and
    /// should not propagate further.
    async fn on_error(
        &self,
        message: &DynamicMessage,
        error: &str,
    ) -> Result<bool, InterceptorPhaseError> {
        let _ = (message, error);
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NoOpInterceptor;

    #[async_trait]
    impl Interceptor for NoOpInterceptor {
        fn name(&self) -> &'static str {
            "noop"
        }
    }

    #[tokio::test]
    async fn test_default_before_send_passes_through() {
        let interceptor = NoOpInterceptor;
        let msg = DynamicMessage::new("ping", json!({}));
        let decision = interceptor.before_send(msg.clone()).await.unwrap();
        assert_eq!(decision, InterceptorDecision::Continue(msg));
    }

    #[tokio::test]
    async fn test_default_on_error_unhandled() {
        let interceptor = NoOpInterceptor;
        let msg = DynamicMessage::new("ping", json!({}));
        let handled = interceptor.on_error(&msg, "boom").await.unwrap();
        assert!(!handled);
    }

    #[test]
    fn test_default_priority() {
        let interceptor = NoOpInterceptor;
        assert_eq!(interceptor.priority(), 100);
    }
}
