//! Main actor system implementation with pub-sub architecture.

// Layer 1: Standard library
use std::collections::HashMap;
use std::sync::Arc;

// Layer 2: Third-party
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::json;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{channel, Receiver, Sender};
use tokio::task::{spawn, JoinHandle};
use tokio::time::{sleep, timeout};

// Layer 3: Internal
use super::dynamic::system_events;
use super::{builder::ActorSpawnBuilder, SystemConfig, SystemError};
use crate::actor::{Actor, ActorContext, ErrorAction};
use crate::broker::MessageBroker;
use crate::correlation::CorrelationManager;
use crate::dlq::DeadLetterQueue;
use crate::interceptor::{InterceptorChain, ValidationInterceptor};
use crate::message::{Message, MessageEnvelope};
use crate::supervisor::RestartBackoff;
use crate::util::{ActorAddress, ActorId};

/// Hook invoked with a well-known topic name and JSON payload at lifecycle
/// points the generic actor system reaches (spawn, delivery, restart,
/// shutdown). The concrete [`DynamicMessage`](crate::message::DynamicMessage)
/// stack wires this to [`ActorSystem::publish_system_event`](super::dynamic)
/// so the events land on the event broker (§6); a system built over a
/// non-`DynamicMessage` message type can still observe them by installing
/// its own hook via [`ActorSystem::set_event_hook`].
pub(crate) type SystemEventHook = dyn Fn(&str, serde_json::Value) + Send + Sync;

/// Hook invoked when an actor's failure escalates past its own restart
/// budget (§4.10). A [`SupervisorTree`](crate::supervisor::SupervisorTree)
/// installs one via [`ActorSystem::set_escalation_hook`] to forward the
/// failure into `escalate_error`, connecting the tree's error-handling
/// policy to the live system's restart loop.
pub(crate) type EscalationHook = dyn Fn(&ActorAddress, &str) + Send + Sync;

/// System state enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SystemState {
    /// System is running normally
    Running,
    /// Graceful shutdown in progress
    ShuttingDown,
    /// System has stopped
    Stopped,
}

/// Internal actor metadata.
#[allow(dead_code)] // Fields reserved for future actor management features
struct ActorMetadata<M: Message> {
    id: ActorId,
    address: ActorAddress,
    name: Option<String>,
    spawned_at: DateTime<Utc>,
    mailbox_sender: Sender<MessageEnvelope<M>>,
    task_handle: JoinHandle<()>,
}

/// Main actor system managing actor lifecycle.
///
/// The system is generic over the message type, mailbox sender, and broker
/// implementation, following a dependency injection pattern.
///
/// # Architecture: Pub-Sub Integration
///
/// ```text
/// Actor → ActorContext.send() → Broker.publish() → ActorSystem (subscriber)
///                                                        ↓
///                                                  Routes to actor
///                                                        ↓
///                                                  Mailbox → Actor
/// ```
///
/// # Type Parameters
///
/// * `M` - The message type used by all actors in this system
/// * `B` - The message broker implementation (injected via dependency injection)
///
/// # Examples
///
/// ```rust,ignore
/// use airssys_rt::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), SystemError> {
///     // Create broker and inject into system
///     let broker = InMemoryMessageBroker::new();
///     let system = ActorSystem::new(SystemConfig::default(), broker);
///     
///     // All actors use the injected broker
///     let addr = system.spawn()
///         .with_name("worker")
///         .spawn(my_actor)
///         .await?;
///     
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct ActorSystem<M: Message, B: MessageBroker<M>> {
    pub(crate) inner: Arc<ActorSystemInner<M, B>>,
}

pub(crate) struct ActorSystemInner<M: Message, B: MessageBroker<M>> {
    pub(crate) config: SystemConfig,
    pub(crate) broker: B,
    actors: RwLock<HashMap<ActorAddress, ActorMetadata<M>>>,
    pub(crate) state: RwLock<SystemState>,
    router_handle: RwLock<Option<JoinHandle<()>>>,
    /// Correlation bookkeeping for `ask` dispatch (L3).
    pub(crate) correlation: CorrelationManager,
    /// Priority-ordered cross-cutting hooks applied around send/receive (L4).
    pub(crate) interceptors: Arc<InterceptorChain>,
    /// Messages that could not be delivered or processed (§4.9, L10).
    pub(crate) dlq: DeadLetterQueue,
    /// Lifecycle event sink, wired by the `DynamicMessage` stack to publish
    /// on the event broker (§6).
    pub(crate) event_hook: RwLock<Option<Arc<SystemEventHook>>>,
    /// Escalation sink, wired to a [`SupervisorTree`](crate::supervisor::SupervisorTree)
    /// by a caller that wants restart-budget exhaustion reported up a
    /// supervision hierarchy (L11).
    pub(crate) escalation_hook: RwLock<Option<Arc<EscalationHook>>>,
}

impl<M: Message + serde::Serialize, B: MessageBroker<M> + Clone + Send + Sync + 'static>
    ActorSystem<M, B>
{
    /// Get the system configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.inner.config
    }

    /// Create a new actor system with dependency injection.
    ///
    /// # Arguments
    ///
    /// * `config` - System configuration
    /// * `broker` - Message broker implementation (injected)
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let broker = InMemoryMessageBroker::new();
    /// let system = ActorSystem::new(SystemConfig::default(), broker);
    /// ```
    pub fn new(config: SystemConfig, broker: B) -> Self {
        Self::with_interceptors(config, broker, Self::default_interceptor_chain())
    }

    /// The chain `new` composes by default: validation first, then retry
    /// with circuit-breaking, matching §4.1's "a pre-composed before/after/
    /// on-error pipeline" default. Callers wanting a bare chain (e.g. tests
    /// isolating one interceptor) use [`with_interceptors`](Self::with_interceptors)
    /// directly instead.
    pub fn default_interceptor_chain() -> InterceptorChain {
        let mut chain = InterceptorChain::new();
        chain.add(Box::new(ValidationInterceptor::new()));
        chain.add(Box::new(crate::interceptor::RetryInterceptor::new(
            crate::interceptor::RetryConfig::default(),
        )));
        chain
    }

    /// Create a new actor system with a pre-built interceptor chain (e.g. a
    /// chain carrying a [`ValidationInterceptor`](crate::interceptor::ValidationInterceptor)
    /// and a [`RetryInterceptor`](crate::interceptor::RetryInterceptor)).
    pub fn with_interceptors(config: SystemConfig, broker: B, interceptors: InterceptorChain) -> Self {
        let inner = Arc::new(ActorSystemInner {
            config,
            broker,
            actors: RwLock::new(HashMap::new()),
            state: RwLock::new(SystemState::Running),
            router_handle: RwLock::new(None),
            correlation: CorrelationManager::new(),
            interceptors: Arc::new(interceptors),
            dlq: DeadLetterQueue::default(),
            event_hook: RwLock::new(None),
            escalation_hook: RwLock::new(None),
        });

        // Start router task
        let inner_clone = Arc::clone(&inner);
        let router_handle = spawn(async move {
            Self::router_task(inner_clone).await;
        });

        *inner.router_handle.write() = Some(router_handle);

        Self { inner }
    }

    /// The correlation manager tracking this system's pending `ask` requests.
    pub fn correlation(&self) -> &CorrelationManager {
        &self.inner.correlation
    }

    /// The interceptor chain applied around every send/receive.
    pub fn interceptors(&self) -> &Arc<InterceptorChain> {
        &self.inner.interceptors
    }

    /// The dead-letter queue collecting messages that could not be
    /// delivered or processed (§4.9, L10).
    pub fn dead_letter_queue(&self) -> &DeadLetterQueue {
        &self.inner.dlq
    }

    /// Install a sink for well-known lifecycle events (§6 `system_events`).
    /// A system built over [`DynamicMessage`](crate::message::DynamicMessage)
    /// gets one installed automatically by
    /// [`spawn_builtin_actors`](super::dynamic::ActorSystem::spawn_builtin_actors),
    /// which republishes every call on the event broker; install your own to
    /// observe lifecycle events on a system built over a different message
    /// type, or to intercept them in tests.
    pub fn set_event_hook<F>(&self, hook: F)
    where
        F: Fn(&str, serde_json::Value) + Send + Sync + 'static,
    {
        *self.inner.event_hook.write() = Some(Arc::new(hook));
    }

    /// Install a sink invoked when an actor's restart budget is exhausted
    /// and its failure escalates (§4.10, L11). A
    /// [`SupervisorTree`](crate::supervisor::SupervisorTree) uses this to
    /// route the failure into its own `escalate_error`.
    pub fn set_escalation_hook<F>(&self, hook: F)
    where
        F: Fn(&ActorAddress, &str) + Send + Sync + 'static,
    {
        *self.inner.escalation_hook.write() = Some(Arc::new(hook));
    }

    fn emit_event(inner: &Arc<ActorSystemInner<M, B>>, topic: &str, payload: serde_json::Value) {
        if let Some(hook) = inner.event_hook.read().as_ref() {
            hook(topic, payload);
        }
    }

    /// Resolve a logical address to the address it was registered under, or
    /// `None` if no actor is currently spawned at that address.
    pub fn lookup(&self, address: &ActorAddress) -> Option<ActorAddress> {
        self.inner
            .actors
            .read()
            .get(address)
            .map(|metadata| metadata.address.clone())
    }

    /// Deliver an envelope directly to `target`'s mailbox, bypassing the
    /// broker's pub/sub path. Used by the dynamic-message send/ask helpers,
    /// which need synchronous routing against the system's own registry
    /// rather than the broker's topic-subscription model.
    pub(crate) fn deliver_envelope(
        &self,
        target: &ActorAddress,
        envelope: MessageEnvelope<M>,
    ) -> Result<(), SystemError> {
        let actors = self.inner.actors.read();
        let metadata = actors
            .get(target)
            .ok_or_else(|| SystemError::ActorNotFound(target.id().clone()))?;
        match metadata.mailbox_sender.try_send(envelope) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SystemError::MailboxFull(target.id().clone())),
            Err(TrySendError::Closed(_)) => Err(SystemError::ActorNotFound(target.id().clone())),
        }
    }

    /// Router task: subscribes to broker and routes messages to actors.
    async fn router_task(inner: Arc<ActorSystemInner<M, B>>) {
        // Subscribe to broker
        let mut stream = match inner.broker.subscribe().await {
            Ok(s) => s,
            Err(_) => return,
        };

        // Route messages to actors
        while let Some(envelope) = stream.recv().await {
            // Check if system is shutting down
            if *inner.state.read() != SystemState::Running {
                break;
            }

            // Route to target actor
            if let Some(target) = &envelope.reply_to {
                let actors = inner.actors.read();
                if let Some(metadata) = actors.get(target) {
                    // Reject-send on overflow (§3 default mailbox overflow policy);
                    // dropped messages become dead letters once L10 is wired in.
                    let _ = metadata.mailbox_sender.try_send(envelope);
                }
                // If actor not found, message is dropped (dead letter in future)
            }
        }
    }

    /// Get the number of active actors.
    pub fn actor_count(&self) -> usize {
        self.inner.actors.read().len()
    }

    /// Check if system is shutting down.
    pub fn is_shutting_down(&self) -> bool {
        *self.inner.state.read() != SystemState::Running
    }

    /// Gracefully shutdown the system.
    ///
    /// Waits for all actors to finish processing before returning.
    pub async fn shutdown(&self) -> Result<(), SystemError> {
        // Set shutting down state
        {
            let mut state = self.inner.state.write();
            if *state != SystemState::Running {
                return Err(SystemError::ShuttingDown);
            }
            *state = SystemState::ShuttingDown;
        }

        // Reject every in-flight ask rather than let it leak or time out
        // (§4.3 `clearAll`).
        self.inner.correlation.clear_all("system shutdown");

        // Stop router task
        if let Some(handle) = self.inner.router_handle.write().take() {
            handle.abort();
        }

        // Wait for all actors to finish (with timeout)
        let timeout_duration = self.inner.config.shutdown_timeout;
        let result = timeout(timeout_duration, self.wait_for_actors()).await;

        match result {
            Ok(()) => {
                *self.inner.state.write() = SystemState::Stopped;
                Ok(())
            }
            Err(_) => Err(SystemError::ShutdownTimeout(timeout_duration)),
        }
    }

    /// Wait for all actors to finish.
    async fn wait_for_actors(&self) {
        loop {
            let actor_count = self.inner.actors.read().len();

            if actor_count == 0 {
                break;
            }

            // Wait a bit
            sleep(std::time::Duration::from_millis(10)).await;
        }
    }

    /// Force immediate shutdown without waiting.
    pub async fn force_shutdown(&self) {
        *self.inner.state.write() = SystemState::Stopped;
        self.inner.correlation.clear_all("system force shutdown");

        // Stop router
        if let Some(handle) = self.inner.router_handle.write().take() {
            handle.abort();
        }

        // Abort all actor tasks
        let mut actors = self.inner.actors.write();
        for metadata in actors.values() {
            metadata.task_handle.abort();
        }
        actors.clear();
    }

    /// Internal: Spawn actor with full configuration.
    ///
    /// Called by ActorSpawnBuilder.
    pub(crate) async fn spawn_actor_internal<A>(
        &self,
        actor: A,
        name: Option<String>,
        mailbox_capacity: usize,
        supervisor: Option<ActorAddress>,
    ) -> Result<ActorAddress, SystemError>
    where
        A: Actor<Message = M> + Send + 'static,
    {
        // Check if shutting down
        if self.is_shutting_down() {
            return Err(SystemError::ShuttingDown);
        }

        // Check actor limit
        if self.inner.config.max_actors > 0 {
            let current = self.actor_count();
            if current >= self.inner.config.max_actors {
                return Err(SystemError::ActorLimitExceeded {
                    current,
                    max: self.inner.config.max_actors,
                });
            }
        }

        // Create actor ID and address
        let actor_id = ActorId::new();
        let address = if let Some(ref n) = name {
            ActorAddress::named(n)
        } else {
            ActorAddress::Anonymous {
                id: actor_id,
                node: None,
                ephemeral: false,
            }
        };

        // Bounded mailbox, reject-send on overflow (§3 default overflow policy).
        let (mailbox_sender, mailbox_receiver) = channel(mailbox_capacity.max(1));

        // Create actor context
        let context = ActorContext::new(address.clone(), self.inner.broker.clone());

        // Spawn actor task
        let task_handle =
            self.spawn_actor_task(actor, mailbox_receiver, context, address.clone(), supervisor);

        // Store metadata
        let metadata = ActorMetadata {
            id: actor_id,
            address: address.clone(),
            name,
            spawned_at: Utc::now(),
            mailbox_sender,
            task_handle,
        };

        self.inner.actors.write().insert(address.clone(), metadata);

        Self::emit_event(
            &self.inner,
            system_events::ACTOR_SPAWNED,
            json!({ "address": &address }),
        );

        Ok(address)
    }

    /// Spawn the actor task.
    ///
    /// `ErrorAction::Restart` re-runs `pre_start` in place, rate-limited and
    /// delayed by a [`RestartBackoff`] (§4.10 `restart-on-failure`); once the
    /// backoff's restart budget for its sliding window is exhausted the
    /// failure escalates instead, matching the supervisor tree's own
    /// restart-then-escalate behavior. `ErrorAction::Escalate` always reports
    /// to `supervisor` (if attached) via `tracing` and stops the actor. This
    /// generic, statically-typed actor system has no message type in common
    /// with an arbitrary supervisor address, so escalation is an observable
    /// event rather than a delivered message; a [`SupervisorTree`](crate::supervisor::SupervisorTree)
    /// watching these events decides the parent-level outcome.
    fn spawn_actor_task<A>(
        &self,
        mut actor: A,
        mut mailbox_receiver: Receiver<MessageEnvelope<M>>,
        mut context: ActorContext<M, B>,
        address: ActorAddress,
        supervisor: Option<ActorAddress>,
    ) -> JoinHandle<()>
    where
        A: Actor<Message = M> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        spawn(async move {
            let mut backoff = RestartBackoff::default();

            // Call pre_start lifecycle hook
            if let Err(error) = actor.pre_start(&mut context).await {
                let action = actor.on_error(error, &mut context).await;
                match action {
                    ErrorAction::Stop => return,
                    ErrorAction::Restart => {
                        if !Self::restart_in_place(&inner, &mut backoff, &address, &supervisor)
                            .await
                        {
                            return;
                        }
                    }
                    ErrorAction::Escalate => {
                        Self::escalate(&inner, &address, &supervisor, "pre_start failed");
                        return;
                    }
                    ErrorAction::Resume => {} // Continue with message processing
                }
            }

            // Actor message loop
            'outer: while let Some(envelope) = mailbox_receiver.recv().await {
                let message = envelope.payload;

                match actor.handle_message(message, &mut context).await {
                    Ok(()) => {
                        // Message handled successfully
                    }
                    Err(error) => {
                        let action = actor.on_error(error, &mut context).await;
                        match action {
                            ErrorAction::Stop => {
                                // Actor requested stop
                                break;
                            }
                            ErrorAction::Restart => {
                                if !Self::restart_in_place(
                                    &inner, &mut backoff, &address, &supervisor,
                                )
                                .await
                                {
                                    break 'outer;
                                }
                                if let Err(error) = actor.pre_start(&mut context).await {
                                    let action = actor.on_error(error, &mut context).await;
                                    match action {
                                        ErrorAction::Escalate => {
                                            Self::escalate(
                                                &inner,
                                                &address,
                                                &supervisor,
                                                "restart's pre_start failed",
                                            );
                                            break 'outer;
                                        }
                                        ErrorAction::Stop | ErrorAction::Restart => break 'outer,
                                        ErrorAction::Resume => {}
                                    }
                                }
                            }
                            ErrorAction::Escalate => {
                                Self::escalate(&inner, &address, &supervisor, "handle_message failed");
                                break;
                            }
                            ErrorAction::Resume => {
                                // Continue processing next message
                                continue;
                            }
                        }
                    }
                }
            }

            // Call post_stop lifecycle hook
            Self::emit_event(
                &inner,
                system_events::ACTOR_STOPPING,
                json!({ "address": &address }),
            );
            let _ = actor.post_stop(&mut context).await;
            Self::emit_event(
                &inner,
                system_events::ACTOR_STOPPED,
                json!({ "address": &address }),
            );
        })
    }

    /// Record a restart attempt and sleep its backoff delay.
    ///
    /// Returns `false` (and logs an escalation) once `backoff`'s restart
    /// budget is exhausted for its sliding window, per §4.10's
    /// `restart-on-failure`: "if attempts within window < max, schedule
    /// restart; else escalate."
    async fn restart_in_place(
        inner: &Arc<ActorSystemInner<M, B>>,
        backoff: &mut RestartBackoff,
        address: &ActorAddress,
        supervisor: &Option<ActorAddress>,
    ) -> bool {
        backoff.record_restart();
        if backoff.is_limit_exceeded() {
            Self::escalate(inner, address, supervisor, "restart budget exhausted");
            return false;
        }
        let delay = backoff.calculate_delay();
        tracing::warn!(actor = %address, delay_ms = delay.as_millis(), "restarting actor");
        Self::emit_event(
            inner,
            system_events::SUPERVISOR_RESTART,
            json!({ "address": address, "delayMs": delay.as_millis() as u64 }),
        );
        sleep(delay).await;
        true
    }

    fn escalate(
        inner: &Arc<ActorSystemInner<M, B>>,
        address: &ActorAddress,
        supervisor: &Option<ActorAddress>,
        reason: &str,
    ) {
        match supervisor {
            Some(sup) => {
                tracing::error!(actor = %address, supervisor = %sup, reason, "escalating actor failure to supervisor")
            }
            None => {
                tracing::error!(actor = %address, reason, "unhandled actor failure (no supervisor attached)")
            }
        }
        Self::emit_event(
            inner,
            system_events::SUPERVISOR_ESCALATE,
            json!({ "address": address, "supervisor": supervisor, "reason": reason }),
        );
        if let Some(hook) = inner.escalation_hook.read().as_ref() {
            hook(address, reason);
        }
    }

    /// Create a builder for spawning actors.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let address = system.spawn()
    ///     .with_name("worker")
    ///     .with_mailbox_capacity(1000)
    ///     .spawn(my_actor)
    ///     .await?;
    /// ```
    pub fn spawn(&self) -> ActorSpawnBuilder<M, B> {
        ActorSpawnBuilder::new(self.clone())
    }
}

impl<M: Message, B: MessageBroker<M>> Clone for ActorSystem<M, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::broker::in_memory::InMemoryMessageBroker;
    use crate::message::MessagePriority;

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct TestMessage {
        data: String,
    }

    impl Message for TestMessage {
        const MESSAGE_TYPE: &'static str = "test";

        fn priority(&self) -> MessagePriority {
            MessagePriority::Normal
        }
    }

    struct TestActor;

    #[async_trait::async_trait]
    impl Actor for TestActor {
        type Message = TestMessage;
        type Error = std::io::Error;

        async fn handle_message<B: crate::broker::MessageBroker<Self::Message>>(
            &mut self,
            _message: Self::Message,
            _context: &mut ActorContext<Self::Message, B>,
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_actor_system_creation() {
        let broker = InMemoryMessageBroker::<TestMessage>::new();
        let system = ActorSystem::new(SystemConfig::default(), broker);
        assert_eq!(system.actor_count(), 0);
        assert!(!system.is_shutting_down());
    }

    #[tokio::test]
    async fn test_actor_spawn() {
        let broker = InMemoryMessageBroker::<TestMessage>::new();
        let system = ActorSystem::new(SystemConfig::default(), broker);

        let address = system
            .spawn_actor_internal(TestActor, Some("test".to_string()), 100, None)
            .await
            .unwrap();

        assert_eq!(system.actor_count(), 1);

        if let ActorAddress::Named { name, .. } = address {
            assert_eq!(name, "test");
        } else {
            panic!("Expected named address");
        }
    }

    #[tokio::test]
    async fn test_system_shutdown() {
        let broker = InMemoryMessageBroker::<TestMessage>::new();
        let system = ActorSystem::new(SystemConfig::default(), broker);

        // Test shutdown without actors (should succeed immediately)
        assert!(system.shutdown().await.is_ok());
        assert!(system.is_shutting_down());
    }

    #[tokio::test]
    async fn test_force_shutdown() {
        let broker = InMemoryMessageBroker::<TestMessage>::new();
        let system = ActorSystem::new(SystemConfig::default(), broker);

        let _addr = system
            .spawn_actor_internal(TestActor, None, 100, None)
            .await
            .unwrap();

        // Force shutdown should complete immediately
        system.force_shutdown().await;
        assert_eq!(system.actor_count(), 0);
    }

    struct FlakyActor {
        handled: Arc<std::sync::atomic::AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Actor for FlakyActor {
        type Message = TestMessage;
        type Error = std::io::Error;

        async fn handle_message<B: crate::broker::MessageBroker<Self::Message>>(
            &mut self,
            _message: Self::Message,
            _context: &mut ActorContext<Self::Message, B>,
        ) -> Result<(), Self::Error> {
            let count = self
                .handled
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if count == 0 {
                Err(std::io::Error::other("first message always fails"))
            } else {
                Ok(())
            }
        }

        async fn on_error<B: crate::broker::MessageBroker<Self::Message>>(
            &mut self,
            _error: Self::Error,
            _context: &mut ActorContext<Self::Message, B>,
        ) -> ErrorAction {
            ErrorAction::Restart
        }
    }

    #[tokio::test]
    async fn test_restart_on_failure_resumes_processing() {
        let broker = InMemoryMessageBroker::<TestMessage>::new();
        let system = ActorSystem::new(SystemConfig::default(), broker);

        let handled = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let actor = FlakyActor {
            handled: Arc::clone(&handled),
        };

        let address = system
            .spawn_actor_internal(actor, Some("flaky".to_string()), 10, None)
            .await
            .unwrap();

        system
            .deliver_envelope(
                &address,
                MessageEnvelope::new(TestMessage {
                    data: "one".to_string(),
                }),
            )
            .unwrap();
        system
            .deliver_envelope(
                &address,
                MessageEnvelope::new(TestMessage {
                    data: "two".to_string(),
                }),
            )
            .unwrap();

        // Give the restarted task time to clear its backoff delay and
        // process both messages.
        tokio::time::sleep(std::time::Duration::from_millis(400)).await;

        assert_eq!(handled.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    struct AlwaysFailActor;

    #[async_trait::async_trait]
    impl Actor for AlwaysFailActor {
        type Message = TestMessage;
        type Error = std::io::Error;

        async fn handle_message<B: crate::broker::MessageBroker<Self::Message>>(
            &mut self,
            _message: Self::Message,
            _context: &mut ActorContext<Self::Message, B>,
        ) -> Result<(), Self::Error> {
            Err(std::io::Error::other("always fails"))
        }

        async fn on_error<B: crate::broker::MessageBroker<Self::Message>>(
            &mut self,
            _error: Self::Error,
            _context: &mut ActorContext<Self::Message, B>,
        ) -> ErrorAction {
            ErrorAction::Restart
        }
    }

    struct NeverChild;

    #[derive(Debug)]
    struct NeverError;

    impl std::fmt::Display for NeverError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "never")
        }
    }

    impl std::error::Error for NeverError {}

    #[async_trait::async_trait]
    impl crate::supervisor::Child for NeverChild {
        type Error = NeverError;

        async fn start(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn stop(&mut self, _timeout: std::time::Duration) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_restart_budget_exhaustion_escalates_to_supervisor_tree() {
        use crate::monitoring::{InMemoryMonitor, MonitoringConfig};
        use crate::supervisor::{OneForOne, SupervisorTree};
        use std::sync::atomic::{AtomicBool, Ordering};

        let monitor = InMemoryMonitor::new(MonitoringConfig::default());
        let mut tree = SupervisorTree::<OneForOne, NeverChild, _>::new();
        let root = tree
            .create_supervisor(None, OneForOne, monitor)
            .expect("create root supervisor");

        let escalated = Arc::new(AtomicBool::new(false));
        let escalated_clone = Arc::clone(&escalated);
        tree.set_unhandled_failure_hook(move |_err, _id| {
            escalated_clone.store(true, Ordering::SeqCst);
        });
        let tree = Arc::new(tokio::sync::Mutex::new(tree));

        let broker = InMemoryMessageBroker::<TestMessage>::new();
        let system = ActorSystem::new(SystemConfig::default(), broker);
        system.set_escalation_hook(SupervisorTree::escalation_hook(Arc::clone(&tree), root));

        let address = system
            .spawn_actor_internal(AlwaysFailActor, Some("always-fail".to_string()), 10, None)
            .await
            .unwrap();

        // RestartBackoff's default budget is 5 restarts per 60s window; five
        // failing messages exhausts it and escalates on the fifth.
        for i in 0..5 {
            system
                .deliver_envelope(
                    &address,
                    MessageEnvelope::new(TestMessage {
                        data: format!("msg-{i}"),
                    }),
                )
                .unwrap();
        }

        tokio::time::sleep(std::time::Duration::from_secs(4)).await;

        assert!(escalated.load(Ordering::SeqCst));
    }
}
