//! Wiring between the actor system and the dynamically-typed message stack
//! (plan interpreter, correlation manager, interceptor chain).
//!
//! These APIs are available whenever a system is built over
//! [`DynamicMessage`](crate::message::DynamicMessage), which is how the
//! runtime's built-in actors (event broker, directory, virtual actor
//! directory) and any user-defined behaviors driven by message plans
//! communicate.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use serde_json::{json, Value};

// Layer 3: Internal module imports
use super::{ActorSystem, SystemError};
use crate::behavior::BehaviorActor;
use crate::broker::MessageBroker;
use crate::directory::Directory;
use crate::dlq::DeadLetterEntry;
use crate::interceptor::{InterceptorDecision, RetryConfig};
use crate::message::{DynamicMessage, MessageEnvelope};
use crate::plan::{AskInstruction, DomainEvent, PlanDispatcher, SendInstruction, SendMode};
use crate::pubsub::EventBroker;
use crate::util::ActorAddress;

/// Maximum attempts for [`SendMode::Retry3`], including the first try.
const RETRY3_MAX_ATTEMPTS: u32 = 3;

/// Maximum attempts for [`SendMode::Guaranteed`], including the first try.
/// There is no original-source precedent for this exact number; it is
/// chosen to give a guaranteed send meaningfully more persistence than
/// `Retry3` while still giving up once the circuit breaker or a
/// non-transient error makes further attempts pointless.
const GUARANTEED_MAX_ATTEMPTS: u32 = 10;

/// Well-known address of the event broker actor (§6 external interfaces).
pub const EVENT_BROKER_ADDRESS_NAME: &str = "system.event-broker";

/// Well-known address of the directory actor (§6 external interfaces).
pub const DISCOVERY_ADDRESS_NAME: &str = "system.discovery";

/// Bit-exact system-event topic names published on the event broker (§6).
/// [`ActorSystem::spawn_builtin_actors`] installs an event hook that fires
/// these automatically at the corresponding lifecycle point (actor
/// spawn/stop, restart, escalation, delivery rejection, dead-lettering); a
/// caller can also publish one directly via [`ActorSystem::publish_system_event`].
pub mod system_events {
    pub const ACTOR_SPAWNED: &str = "actorSpawned";
    pub const ACTOR_STOPPING: &str = "actorStopping";
    pub const ACTOR_STOPPED: &str = "actorStopped";
    pub const MESSAGE_DELIVERED: &str = "messageDelivered";
    pub const MESSAGE_REJECTED: &str = "messageRejected";
    pub const DEAD_LETTERED: &str = "deadLettered";
    pub const SUPERVISOR_RESTART: &str = "supervisorRestart";
    pub const SUPERVISOR_ESCALATE: &str = "supervisorEscalate";
    pub const STOPPING: &str = "stopping";
    pub const STOPPED: &str = "stopped";
}

impl<B> ActorSystem<DynamicMessage, B>
where
    B: MessageBroker<DynamicMessage> + Clone + Send + Sync + 'static,
{
    /// Send a dynamic message to `target` with [`SendMode::FireAndForget`]:
    /// a single attempt, dead-lettered on failure.
    pub async fn send_dynamic(
        &self,
        target: ActorAddress,
        message: DynamicMessage,
    ) -> Result<(), SystemError> {
        self.send_with_mode(target, message, SendMode::FireAndForget)
            .await
    }

    /// Send a dynamic message to `target`, honoring `mode`'s retry budget
    /// (§4.2): `FireAndForget` tries once; `Retry3`/`Guaranteed` retry a
    /// transient failure with the same backoff the retry interceptor uses,
    /// stopping early if the interceptor chain's circuit breaker reports the
    /// failure as unrecoverable. Every attempt still runs through the
    /// interceptor chain's `before_send` phase. A message that exhausts its
    /// attempts lands in the dead-letter queue (§4.9) exactly once.
    pub async fn send_with_mode(
        &self,
        target: ActorAddress,
        message: DynamicMessage,
        mode: SendMode,
    ) -> Result<(), SystemError> {
        let max_attempts = match mode {
            SendMode::FireAndForget => 1,
            SendMode::Retry3 => RETRY3_MAX_ATTEMPTS,
            SendMode::Guaranteed => GUARANTEED_MAX_ATTEMPTS,
        };

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.try_send_once(target.clone(), message.clone()).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    let retryable =
                        mode != SendMode::FireAndForget && err.is_transient() && attempt < max_attempts;
                    if !retryable {
                        self.dead_letter(&target, &message, attempt, &err.to_string());
                        return Err(err);
                    }

                    let should_retry = self
                        .interceptors()
                        .run_on_error(&message, &err.to_string())
                        .await;
                    if !should_retry {
                        self.dead_letter(&target, &message, attempt, &err.to_string());
                        return Err(err);
                    }

                    let delay = RetryConfig::default().delay_for_attempt(attempt);
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// A single delivery attempt: runs the interceptor chain's `before_send`
    /// phase, then hands the (possibly rewritten) message to the mailbox.
    async fn try_send_once(
        &self,
        target: ActorAddress,
        message: DynamicMessage,
    ) -> Result<(), SystemError> {
        let decision = self
            .interceptors()
            .run_before_send(message)
            .await
            .map_err(|err| SystemError::RejectedByInterceptor(err.to_string()))?;

        let message = match decision {
            InterceptorDecision::Continue(message) => message,
            InterceptorDecision::Reject(reason) => {
                return Err(SystemError::RejectedByInterceptor(reason))
            }
        };

        let envelope = MessageEnvelope::new(message).with_reply_to(target.clone());
        self.deliver_envelope(&target, envelope)
    }

    /// Record a message that could not be delivered, publishing
    /// [`system_events::DEAD_LETTERED`] alongside it.
    pub(crate) fn dead_letter(
        &self,
        target: &ActorAddress,
        message: &DynamicMessage,
        attempts: u32,
        reason: &str,
    ) {
        let mut entry = DeadLetterEntry::new(
            message.message_type.clone(),
            message.payload.clone(),
            target.clone(),
            reason.to_string(),
        );
        entry.attempts = attempts.max(1);
        self.dead_letter_queue().add(entry);

        // A single best-effort attempt, bypassing `send_with_mode` so a
        // permanently unreachable event broker cannot recurse back into
        // `dead_letter`.
        let system = self.clone();
        let target = target.clone();
        let message_type = message.message_type.clone();
        let reason = reason.to_string();
        tokio::spawn(async move {
            let event_broker = system.event_broker_address();
            let publish = DynamicMessage::new(
                "PUBLISH",
                json!({
                    "topic": system_events::DEAD_LETTERED,
                    "event": { "target": target, "messageType": message_type, "reason": reason },
                }),
            );
            let _ = system.try_send_once(event_broker, publish).await;
        });
    }

    /// Send a correlated ask to `target` and await its reply, or the
    /// configured timeout.
    pub async fn ask_dynamic(
        &self,
        target: ActorAddress,
        message_type: impl Into<String>,
        payload: Value,
        timeout: Duration,
    ) -> Result<DynamicMessage, SystemError> {
        let correlation_id = self.correlation().next_correlation_id();
        let message =
            DynamicMessage::new(message_type, payload).with_correlation_id(correlation_id.clone());

        self.send_dynamic(target, message).await?;

        self.correlation()
            .ask(correlation_id, timeout)
            .await
            .map_err(SystemError::from)
    }

    /// Resolve a pending ask with a behavior's reply. Called once a handler
    /// produces a response whose `correlation_id` matches an outstanding
    /// ask (§4.4); unknown or already-resolved correlation ids surface as a
    /// [`SystemError::CorrelationError`].
    pub fn reply(&self, response: DynamicMessage) -> Result<(), SystemError> {
        let correlation_id = response
            .correlation_id
            .clone()
            .ok_or_else(|| SystemError::RejectedByInterceptor("reply missing correlation_id".to_string()))?;
        self.correlation()
            .resolve(&correlation_id, response)
            .map_err(SystemError::from)
    }

    /// The event broker actor's well-known address.
    pub fn event_broker_address(&self) -> ActorAddress {
        ActorAddress::named(EVENT_BROKER_ADDRESS_NAME)
    }

    /// The directory actor's well-known address.
    pub fn discovery_address(&self) -> ActorAddress {
        ActorAddress::named(DISCOVERY_ADDRESS_NAME)
    }

    /// Spawn the system's built-in actors (event broker and directory) at
    /// their well-known addresses, so [`event_broker_address`] and
    /// [`discovery_address`] resolve to live actors. Idempotent in effect
    /// but not in cost: calling it twice spawns duplicate actors under
    /// names the system already has registered, which fails with
    /// [`SystemError::SpawnFailed`]-equivalent address collision behavior
    /// at the broker layer, so callers should invoke this exactly once per
    /// system, right after construction.
    ///
    /// [`event_broker_address`]: Self::event_broker_address
    /// [`discovery_address`]: Self::discovery_address
    pub async fn spawn_builtin_actors(&self) -> Result<(), SystemError> {
        // Forward every lifecycle event the generic system emits onto the
        // event broker, so §6's system_events are observable on the wire
        // without callers having to publish them by hand.
        let system = self.clone();
        self.set_event_hook(move |topic: &str, payload: Value| {
            let system = system.clone();
            let topic = topic.to_string();
            tokio::spawn(async move {
                let _ = system.publish_system_event(&topic, payload).await;
            });
        });

        let broker_behavior = BehaviorActor::new(EventBroker::new(), self.clone());
        self.spawn()
            .with_name(EVENT_BROKER_ADDRESS_NAME)
            .spawn(broker_behavior)
            .await?;

        let directory_behavior = BehaviorActor::new(Directory::new(), self.clone());
        self.spawn()
            .with_name(DISCOVERY_ADDRESS_NAME)
            .spawn(directory_behavior)
            .await?;

        Ok(())
    }

    /// Publish one of the well-known [`system_events`] topics on the event
    /// broker. `event` is whatever shape the subscriber for that topic
    /// expects (§6); this is a thin wrapper over a `"PUBLISH"`
    /// [`DynamicMessage`] sent to [`event_broker_address`](Self::event_broker_address).
    ///
    /// [`spawn_builtin_actors`](Self::spawn_builtin_actors) calls this
    /// automatically at every lifecycle point via the event hook it
    /// installs; call it directly to publish a custom or application-level
    /// event under one of the same well-known topics.
    pub async fn publish_system_event(
        &self,
        topic: &str,
        event: Value,
    ) -> Result<(), SystemError> {
        let message = DynamicMessage::new(
            "PUBLISH",
            json!({ "topic": topic, "event": event }),
        );
        self.send_dynamic(self.event_broker_address(), message).await
    }
}

#[async_trait]
impl<B> PlanDispatcher for ActorSystem<DynamicMessage, B>
where
    B: MessageBroker<DynamicMessage> + Clone + Send + Sync + 'static,
{
    type Error = SystemError;

    async fn dispatch_send(&self, instruction: &SendInstruction) -> Result<(), Self::Error> {
        let message = DynamicMessage::new(instruction.message_type.clone(), instruction.payload.clone());
        self.send_with_mode(instruction.target.clone(), message, instruction.mode)
            .await
    }

    async fn dispatch_ask(&self, instruction: &AskInstruction) -> Result<(), Self::Error> {
        self.ask_dynamic(
            instruction.target.clone(),
            instruction.message_type.clone(),
            instruction.payload.clone(),
            instruction.timeout,
        )
        .await
        .map(|_| ())
    }

    async fn dispatch_emit(&self, event: &DomainEvent) -> Result<(), Self::Error> {
        let message = DynamicMessage::new(event.topic.clone(), event.payload.clone());
        self.send_dynamic(self.event_broker_address(), message).await
    }
}
