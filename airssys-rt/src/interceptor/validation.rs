//! Validation interceptor: rejects malformed messages before they are sent.

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::traits::{Interceptor, InterceptorDecision, InterceptorPhaseError};
use crate::message::DynamicMessage;

/// Rejects messages whose payload is not valid JSON-serializable data, or
/// whose `message_type` is empty. Runs first in the default chain so later
/// interceptors never see a malformed message.
pub struct ValidationInterceptor {
    max_payload_bytes: Option<usize>,
}

impl ValidationInterceptor {
    /// Validate structure only, with no payload size limit.
    pub fn new() -> Self {
        Self {
            max_payload_bytes: None,
        }
    }

    /// Validate structure and enforce a maximum serialized payload size.
    pub fn with_max_payload_bytes(max_payload_bytes: usize) -> Self {
        Self {
            max_payload_bytes: Some(max_payload_bytes),
        }
    }

    fn validate(&self, message: &DynamicMessage) -> Result<(), String> {
        if message.message_type.is_empty() {
            return Err("message_type must not be empty".to_string());
        }

        if let Some(limit) = self.max_payload_bytes {
            let encoded = serde_json::to_vec(&message.payload)
                .map_err(|err| format!("payload not serializable: {err}"))?;
            if encoded.len() > limit {
                return Err(format!(
                    "payload size {} exceeds limit {limit}",
                    encoded.len()
                ));
            }
        }

        Ok(())
    }
}

impl Default for ValidationInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Interceptor for ValidationInterceptor {
    fn name(&self) -> &'static str {
        "validation"
    }

    fn priority(&self) -> i32 {
        0
    }

    async fn before_send(
        &self,
        message: DynamicMessage,
    ) -> Result<InterceptorDecision, InterceptorPhaseError> {
        match self.validate(&message) {
            Ok(()) => Ok(InterceptorDecision::Continue(message)),
            Err(reason) => Ok(InterceptorDecision::Reject(reason)),
        }
    }

    async fn before_receive(
        &self,
        message: DynamicMessage,
    ) -> Result<InterceptorDecision, InterceptorPhaseError> {
        match self.validate(&message) {
            Ok(()) => Ok(InterceptorDecision::Continue(message)),
            Err(reason) => Ok(InterceptorDecision::Reject(reason)),
        }
    }
}
