//! The [`Behavior`] trait: pure message handling that returns a
//! [`MessagePlan`](crate::plan::MessagePlan) instead of acting on the
//! outside world directly.

// Layer 1: Standard library imports
use std::error::Error;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::message::DynamicMessage;
use crate::plan::MessagePlan;
use crate::util::ActorAddress;

/// Read-only metadata handed to a [`Behavior`] alongside the message.
///
/// Unlike [`ActorContext`](crate::actor::ActorContext), this carries no
/// broker handle: a behavior describes side effects declaratively via the
/// plan it returns, rather than performing them.
#[derive(Debug, Clone)]
pub struct BehaviorContext {
    address: ActorAddress,
}

impl BehaviorContext {
    /// Build a context for the behavior's own address.
    pub fn new(address: ActorAddress) -> Self {
        Self { address }
    }

    /// This behavior's own address, for self-referential replies.
    pub fn address(&self) -> &ActorAddress {
        &self.address
    }
}

/// A pure message handler: given a message and context, decides what should
/// happen and returns it as a [`MessagePlan`] rather than performing side
/// effects itself. This keeps handler logic testable without a live actor
/// system, broker, or mailbox.
///
/// The runtime's built-in system actors (event broker, directory) and any
/// user-defined plan-driven actor implement this trait; [`BehaviorActor`]
/// adapts an implementation into something the actor system can spawn.
#[async_trait]
pub trait Behavior: Send + Sync + 'static {
    /// Error produced by this behavior's own handling logic. Plan dispatch
    /// failures (mailbox full, unknown target) are not represented here —
    /// they surface as a dropped step or dead letter, not a behavior error.
    type Error: Error + Send + Sync + 'static;

    /// Decide what to do in response to `message`.
    async fn handle(
        &mut self,
        message: DynamicMessage,
        ctx: &BehaviorContext,
    ) -> Result<MessagePlan, Self::Error>;
}
