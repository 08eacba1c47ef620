//! Adapts a [`Behavior`] into something [`ActorSystem`](crate::system::ActorSystem)
//! can spawn directly.

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::traits::{Behavior, BehaviorContext};
use crate::actor::{Actor, ActorContext};
use crate::broker::MessageBroker;
use crate::interceptor::InterceptorDecision;
use crate::message::DynamicMessage;
use crate::plan::interpret_plan;
use crate::system::ActorSystem;

/// Wraps a [`Behavior`] together with a handle back to the system it was
/// spawned into, so the plan it returns can actually be dispatched.
///
/// The system handle is independent of the broker type parameter used by
/// `handle_message`'s own `ActorContext` — a behavior never reaches into its
/// own mailbox's broker, it only ever talks to `self.system`.
pub struct BehaviorActor<T: Behavior, B: MessageBroker<DynamicMessage> + Clone + Send + Sync + 'static> {
    behavior: T,
    system: ActorSystem<DynamicMessage, B>,
}

impl<T, B> BehaviorActor<T, B>
where
    T: Behavior,
    B: MessageBroker<DynamicMessage> + Clone + Send + Sync + 'static,
{
    /// Wrap `behavior`, dispatching its plans against `system`.
    pub fn new(behavior: T, system: ActorSystem<DynamicMessage, B>) -> Self {
        Self { behavior, system }
    }
}

#[async_trait]
impl<T, B> Actor for BehaviorActor<T, B>
where
    T: Behavior,
    B: MessageBroker<DynamicMessage> + Clone + Send + Sync + 'static,
{
    type Message = DynamicMessage;
    type Error = T::Error;

    async fn handle_message<Bc: MessageBroker<Self::Message>>(
        &mut self,
        message: Self::Message,
        context: &mut ActorContext<Self::Message, Bc>,
    ) -> Result<(), Self::Error> {
        let ctx = BehaviorContext::new(context.address().clone());
        let interceptors = self.system.interceptors().clone();

        let message = match interceptors.run_before_receive(message.clone()).await {
            Ok(InterceptorDecision::Continue(message)) => message,
            Ok(InterceptorDecision::Reject(reason)) => {
                tracing::warn!(
                    address = %ctx.address(),
                    reason,
                    "message rejected before receive"
                );
                self.system.dead_letter(ctx.address(), &message, 1, &reason);
                return Ok(());
            }
            Err(err) => {
                tracing::warn!(
                    address = %ctx.address(),
                    error = %err,
                    "before_receive hook failed, continuing with original message"
                );
                message
            }
        };

        let plan = match self.behavior.handle(message.clone(), &ctx).await {
            Ok(plan) => {
                interceptors.run_after_process(&message).await;
                plan
            }
            Err(err) => {
                interceptors.run_on_error(&message, &err.to_string()).await;
                return Err(err);
            }
        };

        if let Err(err) = interpret_plan(&self.system, &plan).await {
            tracing::warn!(
                address = %ctx.address(),
                error = %err,
                "behavior plan dispatch failed"
            );
        }

        Ok(())
    }
}
