//! # airssys-rt - Lightweight Erlang-Actor Model Runtime
//!
//! High-performance actor system with zero-cost abstractions, compile-time type safety,
//! and BEAM-inspired supervision for building fault-tolerant concurrent applications.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use airssys_rt::prelude::*;
//! use async_trait::async_trait;
//!
//! // 1. Define your message type
//! #[derive(Debug, Clone)]
//! enum CounterMsg {
//!     Increment,
//!     GetCount(tokio::sync::oneshot::Sender<u64>),
//! }
//!
//! impl Message for CounterMsg {
//!     const MESSAGE_TYPE: &'static str = "counter";
//! }
//!
//! // 2. Define your actor
//! struct CounterActor {
//!     count: u64,
//! }
//!
//! // 3. Implement the Actor trait
//! #[async_trait]
//! impl Actor for CounterActor {
//!     type Message = CounterMsg;
//!     type Error = std::io::Error;
//!     
//!     async fn handle_message<B: MessageBroker<Self::Message>>(
//!         &mut self,
//!         msg: Self::Message,
//!         ctx: &mut ActorContext<Self::Message, B>,
//!     ) -> Result<(), Self::Error> {
//!         match msg {
//!             CounterMsg::Increment => self.count += 1,
//!             CounterMsg::GetCount(reply) => {
//!                 let _ = reply.send(self.count);
//!             }
//!         }
//!         Ok(())
//!     }
//! }
//!
//! // 4. Spawn and use your actor
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = ActorSystem::new(SystemConfig::default());
//!     let actor = CounterActor { count: 0 };
//!     let address = system.spawn(actor).await?;
//!     
//!     // Send messages
//!     system.send(address, CounterMsg::Increment).await?;
//!     
//!     Ok(())
//! }
//! ```
//!
//! # Core Features
//!
//! ## Zero-Cost Abstractions
//! - **Generic constraints** instead of trait objects
//! - **Compile-time dispatch** via monomorphization
//! - **No heap allocations** for message passing (stack-based envelopes)
//!
//! ## Type Safety
//! - **Compile-time message type verification** via `Message` trait
//! - **Associated types** prevent runtime type errors
//! - **No `dyn` traits** in public APIs (except where explicitly needed)
//! - **Generic `MessageBroker<M>`** ensures type-safe routing
//!
//! ## BEAM-Inspired Supervision
//! - **Supervision trees** for fault tolerance and automatic recovery
//! - **Three strategies**: OneForOne, OneForAll, RestForOne
//! - **Restart policies**: Permanent, Transient, Temporary
//! - **Health monitoring**: Proactive failure detection
//!
//! ## Concurrency
//! - **Lock-free operations** where possible (DashMap registry, atomic counters)
//! - **Async/await** with Tokio runtime
//!
//! # Module Organization
//!
//! ## Core Actor System
//! - [`actor`] - Actor trait, lifecycle, and context for message handling
//! - [`message`] - Message trait, envelopes, and the dynamically-typed message used internally
//! - [`mailbox`] - Message queuing with backpressure control
//! - [`broker`] - Message routing and pub/sub infrastructure
//! - [`plan`] - Declarative message-plan DSL and interpreter
//! - [`behavior`] - Plan-returning behaviors and their actor adapter
//! - [`correlation`] - Outstanding-ask bookkeeping for request/reply dispatch
//! - [`interceptor`] - Before-send/after-receive hook chain (validation, retry)
//!
//! ## Built-in Runtime Actors
//! - [`pubsub`] - Topic-based event broker (`system.event-broker`)
//! - [`directory`] - Name and ephemeral-PID registry (`system.discovery`)
//! - [`virtual_actor`] - Location-transparent virtual actor placement
//! - [`dlq`] - Dead-letter queue for undeliverable or unprocessable messages
//!
//! ## Fault Tolerance
//! - [`supervisor`] - Supervision trees and restart strategies
//! - [`monitoring`] - Event tracking and metrics for observability
//!
//! ## Infrastructure
//! - [`system`] - ActorSystem configuration and management
//! - [`transport`] - Cross-node/cross-thread message envelope and codec
//! - [`util`] - Utilities (ActorAddress, ActorId, MessageId)
//!
//! # Architecture Principles
//!
//! ## Separation of Concerns
//! - **Actor**: Defines message handling logic only
//! - **Child**: Defines supervision lifecycle (explicit implementation required)
//! - **Message**: Defines message type and metadata
//! - **Mailbox**: Manages message queuing and backpressure
//! - **Broker**: Routes messages between actors (hidden from actors)
//!
//! ## Dependency Injection
//! - Generic `MessageBroker<M>` parameter in `ActorContext`
//! - Allows testing with mock brokers
//! - Enables different broker implementations
//!
//! # Examples
//!
//! See the `examples/` directory for comprehensive examples:
//! - `actor_basic.rs` - Basic actor creation and message passing
//! - `actor_lifecycle.rs` - Actor lifecycle hooks (pre_start, post_stop)
//! - `supervisor_basic.rs` - Supervision trees and restart strategies
//! - `supervisor_automatic_health.rs` - Health monitoring and proactive restarts
//! - `monitoring_basic.rs` - Event monitoring and metrics collection
//!
//! # See Also
//!
//! - [Erlang/OTP Documentation](https://www.erlang.org/doc/) - Inspiration for supervision
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model) - Theoretical foundation

pub mod actor;
pub mod behavior;
pub mod broker;
pub mod correlation;
pub mod directory;
pub mod dlq;
pub mod interceptor;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod plan;
pub mod pubsub;
pub mod supervisor;
pub mod system;
pub mod transport;
pub mod util;
pub mod virtual_actor;

// Re-export commonly used types
pub use actor::{Actor, ActorContext, ActorLifecycle, ActorState, ErrorAction};
pub use behavior::{Behavior, BehaviorActor};
pub use directory::{Directory, DirectoryEntry, DirectoryError};
pub use dlq::{DeadLetterEntry, DeadLetterQueue, DlqError, DlqStats};
pub use pubsub::{BrokerStats, EventBroker, EventBrokerError};
pub use virtual_actor::{
    ClusterView, NodeLoad, PhysicalActivator, PlacementStrategy, VirtualActorDirectory,
    VirtualActorEntry, VirtualActorError, VirtualId,
};
pub use broker::{ActorRegistry, BrokerError, InMemoryMessageBroker, MessageBroker, PoolStrategy};
pub use mailbox::{
    BackpressureStrategy, BoundedMailbox, BoundedMailboxSender, MailboxReceiver, MailboxSender,
};
pub use message::{Message, MessageEnvelope, MessagePriority};
pub use monitoring::{
    ActorEvent, ActorEventKind, BrokerEvent, BrokerEventKind, EventSeverity, InMemoryMonitor,
    MailboxEvent, MailboxEventKind, Monitor, MonitoringConfig, MonitoringError, MonitoringEvent,
    MonitoringSnapshot, NoopMonitor, SupervisionEvent, SupervisionEventKind, SystemEvent,
    SystemEventKind,
};
pub use supervisor::{
    Child, ChildHandle, ChildHealth, ChildId, ChildSpec, ChildState, FailureStrategy, OneForAll,
    OneForOne, RestForOne, RestartBackoff, RestartPolicy, ShutdownPolicy, SupervisionDecision,
    SupervisionStrategy, Supervisor, SupervisorError, SupervisorId, SupervisorNode, SupervisorTree,
};
pub use system::{ActorSystem, SystemConfig, SystemError};
pub use transport::{TransportEnvelope, TransportError, TransportFormat};
pub use util::{ActorAddress, ActorId, MessageId};
