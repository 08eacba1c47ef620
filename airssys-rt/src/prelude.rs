//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for building
//! actor systems with airssys-rt. Import this module to get started quickly:
//!
//! ```rust
//! use airssys_rt::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Core Actor System
//! - [`Actor`] - Core trait for actors
//! - [`ActorContext`] - Actor execution context
//! - [`ActorLifecycle`] - Actor lifecycle tracking
//! - [`ActorState`] - Lifecycle state enum
//! - [`ErrorAction`] - Supervision decision enum
//!
//! ## Messaging
//! - [`Message`] - Core trait for messages
//! - [`MessageEnvelope`] - Message wrapper with metadata
//! - [`MessagePriority`] - Priority levels (High, Normal, Low)
//! - [`DynamicMessage`] - Runtime-typed message used by built-in actors
//! - [`MessagePlan`] - Declarative side effects returned by a [`Behavior`]
//!
//! ## Built-in Actors
//! - [`Behavior`] / [`BehaviorActor`] - Plan-returning handlers and their adapter
//! - [`EventBroker`] - Topic pub/sub (`system.event-broker`)
//! - [`Directory`] - Name/PID registry (`system.discovery`)
//! - [`VirtualActorDirectory`] - Location-transparent virtual actor placement
//! - [`DeadLetterQueue`] - Capped, TTL-expiring undeliverable message store
//!
//! ## Mailbox
//! - [`BoundedMailbox`] - Capacity-limited mailbox
//! - [`UnboundedMailbox`] - Unlimited capacity mailbox
//! - [`BackpressureStrategy`] - Flow control strategies
//! - [`MailboxReceiver`] - Trait for receiving messages
//! - [`MailboxSender`] - Trait for sending messages
//!
//! ## Message Broker
//! - [`MessageBroker`] - Core routing trait
//! - [`InMemoryMessageBroker`] - Default broker implementation
//!
//! ## Supervision
//! - [`Child`] - Trait for supervised entities
//! - [`Supervisor`] - Supervisor trait
//! - [`SupervisorNode`] - Supervisor implementation
//! - [`OneForOne`] - Independent child strategy
//! - [`OneForAll`] - Restart all strategy
//! - [`RestForOne`] - Restart following strategy
//! - [`RestartPolicy`] - When to restart (Permanent, Transient, Temporary)
//! - [`ShutdownPolicy`] - How to stop (Graceful, Immediate, Infinity)
//! - [`ChildSpec`] - Child specification
//! - [`ChildHealth`] - Health status enum
//! - [`ChildState`] - Child lifecycle state
//!
//! ## Monitoring
//! - [`Monitor`] - Core monitoring trait
//! - [`InMemoryMonitor`] - Production monitor
//! - [`NoopMonitor`] - Zero-overhead no-op monitor
//! - [`MonitoringEvent`] - Trait for events
//! - [`EventSeverity`] - Event severity levels
//! - [`ActorEvent`] - Actor lifecycle events
//! - [`SupervisionEvent`] - Supervision events
//! - [`MailboxEvent`] - Mailbox events
//! - [`BrokerEvent`] - Broker events
//!
//! ## System
//! - [`SystemConfig`] - Actor system configuration
//!
//! ## Utilities
//! - [`ActorAddress`] - Actor address type
//! - [`ActorId`] - Actor identifier
//! - [`MessageId`] - Message identifier
//!
//! # Example
//!
//! ```rust,ignore
//! use airssys_rt::prelude::*;
//! use async_trait::async_trait;
//!
//! #[derive(Debug, Clone)]
//! struct MyMessage {
//!     data: String,
//! }
//!
//! impl Message for MyMessage {
//!     const MESSAGE_TYPE: &'static str = "my_message";
//! }
//!
//! struct MyActor {
//!     count: u64,
//! }
//!
//! #[async_trait]
//! impl Actor for MyActor {
//!     type Message = MyMessage;
//!     type Error = std::io::Error;
//!     
//!     async fn handle_message<B: MessageBroker<Self::Message>>(
//!         &mut self,
//!         msg: Self::Message,
//!         ctx: &mut ActorContext<Self::Message, B>,
//!     ) -> Result<(), Self::Error> {
//!         self.count += 1;
//!         println!("Received: {}", msg.data);
//!         Ok(())
//!     }
//! }
//! ```

// Core actor system
pub use crate::actor::{Actor, ActorContext, ActorLifecycle, ActorState, ErrorAction};

// Messaging
pub use crate::message::{DynamicMessage, Message, MessageEnvelope, MessagePriority};

// Message-plan DSL and dispatch
pub use crate::plan::{AskInstruction, DomainEvent, MessagePlan, PlanDispatcher, SendInstruction};

// Dynamic-message behaviors (event broker, directory, and user-defined)
pub use crate::behavior::{Behavior, BehaviorActor};

// Mailbox
pub use crate::mailbox::{
    BackpressureStrategy, BoundedMailbox, BoundedMailboxSender, MailboxReceiver, MailboxSender,
    UnboundedMailbox, UnboundedMailboxSender,
};

// Message broker
pub use crate::broker::{InMemoryMessageBroker, MessageBroker};

// Request/reply correlation
pub use crate::correlation::{CorrelationError, CorrelationManager};

// Pub/sub event broker and name/PID directory
pub use crate::pubsub::{BrokerStats, EventBroker, EventBrokerError};
pub use crate::directory::{Directory, DirectoryEntry, DirectoryError};

// Virtual actor placement
pub use crate::virtual_actor::{
    PlacementStrategy, VirtualActorDirectory, VirtualActorEntry, VirtualActorError, VirtualId,
};

// Dead-letter queue
pub use crate::dlq::{DeadLetterEntry, DeadLetterQueue, DlqError};

// Supervision
pub use crate::supervisor::{
    Child, ChildHealth, ChildId, ChildSpec, ChildState, FailureStrategy, OneForAll, OneForOne,
    RestForOne, RestartPolicy, ShutdownPolicy, Supervisor, SupervisorNode, SupervisorTree,
};

// Monitoring
pub use crate::monitoring::{
    ActorEvent, BrokerEvent, EventSeverity, InMemoryMonitor, MailboxEvent, Monitor,
    MonitoringEvent, NoopMonitor, SupervisionEvent,
};

// System
pub use crate::system::{ActorSystem, SystemConfig};

// Cross-node/cross-thread transport envelope
pub use crate::transport::{TransportEnvelope, TransportError, TransportFormat};

// Utilities
pub use crate::util::{ActorAddress, ActorId, MessageId};
