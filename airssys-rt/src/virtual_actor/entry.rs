//! Placement cache entry for an active virtual actor.

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; 
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::id::VirtualId;
use crate::util::{ActorAddress, NodeId};

/// One entry in the virtual actor placement cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualActorEntry {
    pub virtual_id: VirtualId,
    pub physical_ref: ActorAddress,
    pub node: NodeId,
    pub last_accessed: DateTime<Utc>,
    pub activation_count: u64,
    pub is_active: bool,
}

impl VirtualActorEntry {
    pub fn new(virtual_id: VirtualId, physical_ref: ActorAddress, node: NodeId) -> Self {
        Self {
            virtual_id,
            physical_ref,
            node,
            last_accessed: Utc::now(),
            activation_count: 1,
            is_active: true,
        }
    }

    pub fn touch(&mut self) {
        self.last_accessed = Utc::now();
        self.activation_count += 1;
    }

    pub fn idle_for(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.last_accessed)
    }
}
