//! Actor context: per-instance metadata and messaging facade.

// Layer 1: Standard library imports
use std::marker::PhantomData;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};

// Layer 3: Internal module imports
use crate::broker::MessageBroker;
use crate::message::Message;
use crate::util::{ActorAddress, ActorId};

/// Per-instance context handed to a behavior's lifecycle and message hooks.
///
/// Generic over the broker type `B` so a behavior can `send`/`ask` other
/// actors through whatever broker the system was built with, without the
/// runtime paying for dynamic dispatch.
pub struct ActorContext<M: Message, B: MessageBroker<M>> {
    address: ActorAddress,
    id: ActorId,
    created_at: DateTime<Utc>,
    broker: B,
    _marker: PhantomData<M>,
}

impl<M: Message, B: MessageBroker<M>> ActorContext<M, B> {
    /// Create a new actor context bound to a broker instance.
    pub fn new(address: ActorAddress, broker: B) -> Self {
        Self {
            id: address.id().clone(),
            address,
            created_at: Utc::now(),
            broker,
            _marker: PhantomData,
        }
    }

    /// The actor's address.
    pub fn address(&self) -> &ActorAddress {
        &self.address
    }

    /// The actor's id.
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// When this context (and its actor instance) was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The broker this actor uses to send/ask other actors.
    pub fn broker(&self) -> &B {
        &self.broker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::InMemoryMessageBroker;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestMessage;

    impl Message for TestMessage {
        const MESSAGE_TYPE: &'static str = "test";
    }

    #[test]
    fn test_context_exposes_address_and_id() {
        let address = ActorAddress::anonymous();
        let broker = InMemoryMessageBroker::<TestMessage>::new();
        let context = ActorContext::new(address.clone(), broker);

        assert_eq!(context.address(), &address);
        assert_eq!(context.id(), address.id());
    }
}
