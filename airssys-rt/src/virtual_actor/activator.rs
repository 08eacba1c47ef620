//! Spawns and tears down the physical actor backing a virtual identity.

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::id::VirtualId;
use crate::util::{ActorAddress, NodeId};

/// Host-supplied hook that actually spawns/stops the physical actor for a
/// virtual identity. The directory only tracks placement; it never knows
/// how to construct a behavior for a given `actor_type` itself.
#[async_trait]
pub trait PhysicalActivator: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Spawn a fresh physical actor for `id` on `node` and return its
    /// address. Migration never transfers state: a new activation always
    /// starts from the behavior's default initial context.
    async fn activate(&self, id: &VirtualId, node: &NodeId) -> Result<ActorAddress, Self::Error>;

    /// Stop the physical actor at `address`, e.g. on eviction, idle cleanup,
    /// or migration away from a removed node.
    async fn deactivate(&self, address: &ActorAddress) -> Result<(), Self::Error>;
}
