//! Retry interceptor: exponential backoff with jitter and a circuit breaker.
//!
//! The backoff formula mirrors [`supervisor::RestartBackoff`](crate::supervisor::RestartBackoff):
//! `base_delay * 2^min(attempt, 10)`, capped at `max_delay`, with jitter
//! applied on top to avoid thundering-herd retries across actors.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::Rng;
use tracing::{debug, warn};

// Layer 3: Internal module imports
use super::traits::{Interceptor, InterceptorDecision, InterceptorPhaseError};
use crate::message::DynamicMessage;

/// Circuit breaker state, following the standard closed/open/half-open
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Requests flow normally.
    Closed,
    /// Requests are short-circuited without attempting delivery.
    Open,
    /// A single trial request is allowed through to probe recovery.
    HalfOpen,
}

/// Configuration for [`RetryInterceptor`].
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts before giving up.
    pub max_attempts: u32,
    /// Base delay for the exponential backoff formula.
    pub base_delay: Duration,
    /// Upper bound on any single computed delay.
    pub max_delay: Duration,
    /// Consecutive failures required to trip the circuit breaker open.
    pub failure_threshold: u32,
    /// How long the breaker stays open before allowing a half-open trial.
    pub open_duration: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(60),
            failure_threshold: 5,
            open_duration: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Compute the delay for the given attempt number (0-based), with jitter
    /// applied as a random factor in `[0.5, 1.5)` of the base exponential
    /// value.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp = attempt.min(10);
        let scaled = self.base_delay.as_millis().saturating_mul(1u128 << exp);
        let capped = scaled.min(self.max_delay.as_millis());
        let jitter = rand::thread_rng().gen_range(0.5..1.5);
        let jittered = (capped as f64 * jitter) as u64;
        Duration::from_millis(jittered.min(self.max_delay.as_millis() as u64))
    }
}

/// An interceptor that retries failed message delivery with exponential
/// backoff, and trips a circuit breaker after repeated failures so a
/// persistently unreachable target stops being hammered.
///
/// The original correlation id is preserved across all retry attempts: a
/// retried `Ask` keeps its caller's correlation id rather than minting a new
/// one, so the eventual reply still resolves the original pending request.
pub struct RetryInterceptor {
    config: RetryConfig,
    state: Mutex<CircuitState>,
    consecutive_failures: AtomicU32,
    opened_at_millis: AtomicU64,
}

impl RetryInterceptor {
    /// Build a retry interceptor from the given configuration.
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CircuitState::Closed),
            consecutive_failures: AtomicU32::new(0),
            opened_at_millis: AtomicU64::new(0),
        }
    }

    /// Current circuit breaker state, re-evaluating whether an open circuit
    /// has aged into its half-open trial window.
    pub fn state(&self) -> CircuitState {
        let mut state = self.state.lock();
        if *state == CircuitState::Open {
            let opened_at = self.opened_at_millis.load(Ordering::Relaxed);
            let now = Utc::now().timestamp_millis() as u64;
            if now.saturating_sub(opened_at) >= self.config.open_duration.as_millis() as u64 {
                *state = CircuitState::HalfOpen;
            }
        }
        *state
    }

    fn record_failure(&self) {
        let failures = self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;
        if failures >= self.config.failure_threshold {
            let mut state = self.state.lock();
            if *state != CircuitState::Open {
                *state = CircuitState::Open;
                self.opened_at_millis
                    .store(Utc::now().timestamp_millis() as u64, Ordering::Relaxed);
                warn!(failures, "circuit breaker tripped open");
            }
        }
    }

    fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::SeqCst);
        *self.state.lock() = CircuitState::Closed;
    }

    /// Maximum configured attempts.
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    /// Timestamp the breaker last opened, if it has ever opened.
    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        let millis = self.opened_at_millis.load(Ordering::Relaxed);
        if millis == 0 {
            None
        } else {
            DateTime::from_timestamp_millis(millis as i64)
        }
    }
}

#[async_trait]
impl Interceptor for RetryInterceptor {
    fn name(&self) -> &'static str {
        "retry"
    }

    fn priority(&self) -> i32 {
        10
    }

    async fn before_send(
        &self,
        message: DynamicMessage,
    ) -> Result<InterceptorDecision, InterceptorPhaseError> {
        if self.state() == CircuitState::Open {
            return Ok(InterceptorDecision::Reject(
                "circuit breaker open".to_string(),
            ));
        }
        Ok(InterceptorDecision::Continue(message))
    }

    async fn on_error(
        &self,
        message: &DynamicMessage,
        error: &str,
    ) -> Result<bool, InterceptorPhaseError> {
        self.record_failure();
        let retry_permitted = self.state() != CircuitState::Open;
        debug!(
            message_type = %message.message_type,
            correlation_id = ?message.correlation_id,
            %error,
            retry_permitted,
            "retry interceptor observed failure"
        );
        Ok(retry_permitted)
    }

    async fn after_process(&self, _message: &DynamicMessage) -> Result<(), InterceptorPhaseError> {
        self.record_success();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_delay_grows_and_caps() {
        let config = RetryConfig {
            max_attempts: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(1),
            failure_threshold: 3,
            open_duration: Duration::from_secs(1),
        };
        let small = config.delay_for_attempt(0);
        let large = config.delay_for_attempt(20);
        assert!(small <= Duration::from_millis(150));
        assert!(large <= config.max_delay);
    }

    #[tokio::test]
    async fn test_circuit_trips_after_threshold() {
        let config = RetryConfig {
            failure_threshold: 2,
            ..RetryConfig::default()
        };
        let interceptor = RetryInterceptor::new(config);
        let msg = DynamicMessage::new("ping", json!({}));

        assert_eq!(interceptor.state(), CircuitState::Closed);
        interceptor.on_error(&msg, "boom").await.unwrap();
        assert_eq!(interceptor.state(), CircuitState::Closed);
        interceptor.on_error(&msg, "boom").await.unwrap();
        assert_eq!(interceptor.state(), CircuitState::Open);
    }

    #[tokio::test]
    async fn test_open_circuit_rejects_before_send() {
        let config = RetryConfig {
            failure_threshold: 1,
            ..RetryConfig::default()
        };
        let interceptor = RetryInterceptor::new(config);
        let msg = DynamicMessage::new("ping", json!({}));
        interceptor.on_error(&msg, "boom").await.unwrap();

        let decision = interceptor.before_send(msg).await.unwrap();
        assert!(matches!(decision, InterceptorDecision::Reject(_)));
    }

    #[tokio::test]
    async fn test_success_resets_failures() {
        let config = RetryConfig {
            failure_threshold: 3,
            ..RetryConfig::default()
        };
        let interceptor = RetryInterceptor::new(config);
        let msg = DynamicMessage::new("ping", json!({}));
        interceptor.on_error(&msg, "boom").await.unwrap();
        interceptor.after_process(&msg).await.unwrap();
        assert_eq!(interceptor.consecutive_failures.load(Ordering::SeqCst), 0);
    }
}
