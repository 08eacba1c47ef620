//! The event broker [`Behavior`]: direct-topic and wildcard pub/sub,
//! addressable as `system.event-broker` (§4.5).

// Layer 1: Standard library imports
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// Layer 3: Internal module imports
use super::pattern::pattern_matches;
use crate::behavior::{Behavior, BehaviorContext};
use crate::message::{DecodeError, DynamicMessage};
use crate::plan::{DomainEvent, MessagePlan, PlanStep, SendInstruction, SendMode};
use crate::util::ActorAddress;

/// Error decoding an event broker message.
#[derive(Debug, thiserror::Error)]
pub enum EventBrokerError {
    /// `message_type` did not match any of SUBSCRIBE/UNSUBSCRIBE/PUBLISH/GET_BROKER_STATS.
    #[error("unknown event broker message type: {0}")]
    UnknownMessageType(String),

    /// The payload did not decode into the shape the message type expects.
    #[error("invalid payload for {message_type}: {source}")]
    InvalidPayload {
        message_type: String,
        #[source]
        source: DecodeError,
    },
}

/// Snapshot of broker counters, returned by `GET_BROKER_STATS`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrokerStats {
    pub direct_topic_count: usize,
    pub wildcard_count: usize,
    pub total_subscribers: usize,
    pub events_published: u64,
}

#[derive(Deserialize)]
struct SubscribeRequest {
    topic: String,
    subscriber: ActorAddress,
}

#[derive(Deserialize)]
struct UnsubscribeRequest {
    topic: String,
    subscriber: ActorAddress,
}

#[derive(Deserialize)]
struct PublishRequest {
    topic: String,
    event: Value,
    #[serde(default)]
    publisher_id: Option<String>,
}

#[derive(Deserialize)]
struct StatsRequest {
    requestor: ActorAddress,
}

/// In-process event broker state and message handling.
///
/// `direct_topics` holds exact-match subscriptions; `wildcards` holds
/// pattern subscriptions (anything containing `*`). A publish fans out to
/// the union of both.
pub struct EventBroker {
    direct_topics: DashMap<String, HashSet<ActorAddress>>,
    wildcards: DashMap<String, HashSet<ActorAddress>>,
    events_published: AtomicU64,
}

impl EventBroker {
    pub fn new() -> Self {
        Self {
            direct_topics: DashMap::new(),
            wildcards: DashMap::new(),
            events_published: AtomicU64::new(0),
        }
    }

    fn is_pattern(topic_or_pattern: &str) -> bool {
        topic_or_pattern.contains('*')
    }

    fn subscribe(&self, topic: String, subscriber: ActorAddress) -> bool {
        let table = if Self::is_pattern(&topic) {
            &self.wildcards
        } else {
            &self.direct_topics
        };
        table.entry(topic).or_default().insert(subscriber)
    }

    fn unsubscribe(&self, topic: &str, subscriber: &ActorAddress) {
        let table = if Self::is_pattern(topic) {
            &self.wildcards
        } else {
            &self.direct_topics
        };
        if let Some(mut set) = table.get_mut(topic) {
            set.remove(subscriber);
            if set.is_empty() {
                drop(set);
                table.remove(topic);
            }
        }
    }

    fn matching_subscribers(&self, topic: &str) -> Vec<ActorAddress> {
        let mut subscribers = Vec::new();
        if let Some(set) = self.direct_topics.get(topic) {
            subscribers.extend(set.iter().cloned());
        }
        for entry in self.wildcards.iter() {
            if pattern_matches(entry.key(), topic) {
                subscribers.extend(entry.value().iter().cloned());
            }
        }
        subscribers
    }

    pub fn stats(&self) -> BrokerStats {
        BrokerStats {
            direct_topic_count: self.direct_topics.len(),
            wildcard_count: self.wildcards.len(),
            total_subscribers: self
                .direct_topics
                .iter()
                .map(|e| e.value().len())
                .sum::<usize>()
                + self.wildcards.iter().map(|e| e.value().len()).sum::<usize>(),
            events_published: self.events_published.load(Ordering::Relaxed),
        }
    }
}

impl Default for EventBroker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Behavior for EventBroker {
    type Error = EventBrokerError;

    async fn handle(
        &mut self,
        message: DynamicMessage,
        ctx: &BehaviorContext,
    ) -> Result<MessagePlan, Self::Error> {
        match message.message_type.as_str() {
            "SUBSCRIBE" => {
                let req: SubscribeRequest =
                    message
                        .decode_payload()
                        .map_err(|source| EventBrokerError::InvalidPayload {
                            message_type: "SUBSCRIBE".to_string(),
                            source,
                        })?;
                self.subscribe(req.topic.clone(), req.subscriber.clone());
                Ok(MessagePlan::Emit(DomainEvent {
                    topic: "SUBSCRIPTION_ADDED".to_string(),
                    payload: json!({ "topic": req.topic, "subscriber": req.subscriber }),
                }))
            }
            "UNSUBSCRIBE" => {
                let req: UnsubscribeRequest =
                    message
                        .decode_payload()
                        .map_err(|source| EventBrokerError::InvalidPayload {
                            message_type: "UNSUBSCRIBE".to_string(),
                            source,
                        })?;
                self.unsubscribe(&req.topic, &req.subscriber);
                Ok(MessagePlan::Nothing)
            }
            "PUBLISH" => {
                let req: PublishRequest =
                    message
                        .decode_payload()
                        .map_err(|source| EventBrokerError::InvalidPayload {
                            message_type: "PUBLISH".to_string(),
                            source,
                        })?;
                let subscribers = self.matching_subscribers(&req.topic);
                self.events_published.fetch_add(1, Ordering::Relaxed);

                let mut steps: Vec<PlanStep> = subscribers
                    .into_iter()
                    .map(|subscriber| {
                        PlanStep::Send(SendInstruction {
                            target: subscriber,
                            message_type: "TOPIC_EVENT".to_string(),
                            payload: json!({ "topic": req.topic, "event": req.event }),
                            mode: SendMode::FireAndForget,
                        })
                    })
                    .collect();
                steps.push(PlanStep::Emit(DomainEvent {
                    topic: "EVENT_PUBLISHED".to_string(),
                    payload: json!({ "topic": req.topic, "publisherId": req.publisher_id }),
                }));
                Ok(MessagePlan::Sequence(steps))
            }
            "GET_BROKER_STATS" => {
                let req: StatsRequest =
                    message
                        .decode_payload()
                        .map_err(|source| EventBrokerError::InvalidPayload {
                            message_type: "GET_BROKER_STATS".to_string(),
                            source,
                        })?;
                let _ = ctx; // broker has no self-reply identity to attach here
                Ok(MessagePlan::Send(SendInstruction {
                    target: req.requestor,
                    message_type: "BROKER_STATS".to_string(),
                    payload: serde_json::to_value(self.stats()).unwrap_or(Value::Null),
                    mode: SendMode::Retry3,
                }))
            }
            other => Err(EventBrokerError::UnknownMessageType(other.to_string())),
        }
    }
}
