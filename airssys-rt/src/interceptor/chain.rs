//! Priority-ordered composition of interceptors.

// Layer 2: Third-party crate imports
use tracing::warn;

// Layer 3: Internal module imports
use super::traits::{Interceptor, InterceptorDecision, InterceptorPhaseError};
use crate::message::DynamicMessage;

/// A priority-ordered chain of interceptors, run at each of the four phases.
///
/// Interceptors are boxed trait objects because the chain is assembled at
/// runtime from whatever combination of built-in and user-defined
/// interceptors the caller registers; this is the one place in the crate
/// that favors `dyn` dispatch over generics.
pub struct InterceptorChain {
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl InterceptorChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    /// Add an interceptor, re-sorting the chain by priority (ascending).
    pub fn add(&mut self, interceptor: Box<dyn Interceptor>) {
        self.interceptors.push(interceptor);
        self.interceptors.sort_by_key(|i| i.priority());
    }

    /// Number of interceptors in the chain.
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether the chain has no interceptors.
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run `before_send` across the chain, short-circuiting on the first
    /// `Reject`.
    pub async fn run_before_send(
        &self,
        mut message: DynamicMessage,
    ) -> Result<InterceptorDecision, InterceptorPhaseError> {
        for interceptor in &self.interceptors {
            match interceptor.before_send(message).await? {
                InterceptorDecision::Continue(next) => message = next,
                rejected @ InterceptorDecision::Reject(_) => return Ok(rejected),
            }
        }
        Ok(InterceptorDecision::Continue(message))
    }

    /// Run `before_receive` across the chain, short-circuiting on the first
    /// `Reject`.
    pub async fn run_before_receive(
        &self,
        mut message: DynamicMessage,
    ) -> Result<InterceptorDecision, InterceptorPhaseError> {
        for interceptor in &self.interceptors {
            match interceptor.before_receive(message).await? {
                InterceptorDecision::Continue(next) => message = next,
                rejected @ InterceptorDecision::Reject(_) => return Ok(rejected),
            }
        }
        Ok(InterceptorDecision::Continue(message))
    }

    /// Run `after_process` across the whole chain. A single interceptor
    /// failing is logged and does not stop the rest from running.
    pub async fn run_after_process(&self, message: &DynamicMessage) {
        for interceptor in &self.interceptors {
            if let Err(err) = interceptor.after_process(message).await {
                warn!(interceptor = interceptor.name(), %err, "after_process hook failed");
            }
        }
    }

    /// Run `on_error` across the chain until one interceptor reports the
    /// error handled (e.g. scheduled for retry), or the chain is exhausted.
    pub async fn run_on_error(&self, message: &DynamicMessage, error: &str) -> bool {
        for interceptor in &self.interceptors {
            match interceptor.on_error(message, error).await {
                Ok(true) => return true,
                Ok(false) => continue,
                Err(err) => warn!(interceptor = interceptor.name(), %err, "on_error hook failed"),
            }
        }
        false
    }
}

impl Default for InterceptorChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct TagInterceptor {
        priority: i32,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Interceptor for TagInterceptor {
        fn name(&self) -> &'static str {
            "tag"
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        async fn before_send(
            &self,
            message: DynamicMessage,
        ) -> Result<InterceptorDecision, InterceptorPhaseError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(InterceptorDecision::Continue(message))
        }
    }

    struct RejectingInterceptor;

    #[async_trait]
    impl Interceptor for RejectingInterceptor {
        fn name(&self) -> &'static str {
            "rejecting"
        }

        async fn before_send(
            &self,
            _message: DynamicMessage,
        ) -> Result<InterceptorDecision, InterceptorPhaseError> {
            Ok(InterceptorDecision::Reject("nope".to_string()))
        }
    }

    #[tokio::test]
    async fn test_chain_runs_in_priority_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut chain = InterceptorChain::new();
        chain.add(Box::new(TagInterceptor {
            priority: 50,
            calls: calls.clone(),
        }));
        chain.add(Box::new(TagInterceptor {
            priority: 10,
            calls: calls.clone(),
        }));

        let msg = DynamicMessage::new("ping", json!({}));
        let decision = chain.run_before_send(msg).await.unwrap();
        assert!(matches!(decision, InterceptorDecision::Continue(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_chain_stops_on_reject() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut chain = InterceptorChain::new();
        chain.add(Box::new(RejectingInterceptor));
        chain.add(Box::new(TagInterceptor {
            priority: 200,
            calls: calls.clone(),
        }));

        let msg = DynamicMessage::new("ping", json!({}));
        let decision = chain.run_before_send(msg).await.unwrap();
        assert!(matches!(decision, InterceptorDecision::Reject(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_chain_passes_through() {
        let chain = InterceptorChain::new();
        assert!(chain.is_empty());
        let msg = DynamicMessage::new("ping", json!({}));
        let decision = chain.run_before_send(msg.clone()).await.unwrap();
        assert_eq!(decision, InterceptorDecision::Continue(msg));
    }
}
