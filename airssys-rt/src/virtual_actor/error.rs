//! Errors for virtual actor activation and placement.

// Layer 3: Internal module imports
use super::id::VirtualId;

/// Error activating, deactivating, or placing a virtual actor.
#[derive(Debug, thiserror::Error)]
pub enum VirtualActorError {
    /// No node in the cluster view is available to host an activation.
    #[error("no cluster node available to activate {0}")]
    NoNodeAvailable(VirtualId),

    /// The supplied [`PhysicalActivator`](super::activator::PhysicalActivator)
    /// failed to spawn a physical actor for this identity.
    #[error("failed to activate {id}: {reason}")]
    ActivationFailed { id: VirtualId, reason: String },

    /// The activator failed to tear down a physical actor being evicted,
    /// migrated, or cleaned up.
    #[error("failed to deactivate {id}: {reason}")]
    DeactivationFailed { id: VirtualId, reason: String },
}
