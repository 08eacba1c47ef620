//! Directory registry entry.

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc}; 
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::util::ActorAddress;

/// One name-to-address binding held by the directory.
///
/// Re-registering the same name with the same address only bumps
/// `last_seen` (§I5); `registered_at` is fixed at first registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub address: ActorAddress,
    pub registered_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub ephemeral: bool,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, address: ActorAddress, ephemeral: bool) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            address,
            registered_at: now,
            last_seen: now,
            ephemeral,
        }
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}
