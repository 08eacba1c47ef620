//! Virtual actor identity.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

/// Identifies a virtual actor independent of which physical actor, if any,
/// currently backs it: `(type, key, partition?)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VirtualId {
    pub actor_type: String,
    pub key: String,
    pub partition: Option<String>,
}

impl VirtualId {
    pub fn new(actor_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            actor_type: actor_type.into(),
            key: key.into(),
            partition: None,
        }
    }

    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = Some(partition.into());
        self
    }

    /// The `type|key` string the consistent-hash strategy hashes.
    pub fn hash_key(&self) -> String {
        match &self.partition {
            Some(partition) => format!("{}|{}|{}", self.actor_type, self.key, partition),
            None => format!("{}|{}", self.actor_type, self.key),
        }
    }
}

impl fmt::Display for VirtualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.partition {
            Some(partition) => write!(f, "{}/{}#{partition}", self.actor_type, self.key),
            None => write!(f, "{}/{}", self.actor_type, self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_key_without_partition() {
        let id = VirtualId::new("cart", "user-1");
        assert_eq!(id.hash_key(), "cart|user-1");
    }

    #[test]
    fn test_hash_key_with_partition() {
        let id = VirtualId::new("cart", "user-1").with_partition("eu");
        assert_eq!(id.hash_key(), "cart|user-1|eu");
    }

    #[test]
    fn test_display() {
        let id = VirtualId::new("cart", "user-1");
        assert_eq!(format!("{id}"), "cart/user-1");
    }
}
