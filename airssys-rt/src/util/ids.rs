// Layer 1: Standard library imports
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
// (none)

static ACTOR_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn random_suffix() -> u32 {
    rand::random::<u32>()
}

/// Opaque, stable identifier for an actor instance within a system.
///
/// Built from a monotonically increasing counter plus a random suffix,
/// formatted as `actor-<counter>-<suffix>`. The counter guarantees ordering
/// and uniqueness within a single process; the suffix makes the string
/// resistant to guessing across restarts.
///
/// # Example
/// ```rust
/// use airssys_rt::util::ActorId;
///
/// let id1 = ActorId::new();
/// let id2 = ActorId::new();
/// assert_ne!(id1, id2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(String);

impl ActorId {
    /// Generate a new unique ActorId.
    pub fn new() -> Self {
        let counter = ACTOR_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        let suffix = random_suffix();
        Self(format!("actor-{counter}-{suffix:08x}"))
    }

    /// Build an ActorId from an existing opaque string (e.g. received over
    /// the wire from another node). Not validated beyond non-emptiness.
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for messages in the system
///
/// # Example
/// ```rust
/// use airssys_rt::util::MessageId;
///
/// let id = MessageId::new();
/// println!("Message ID: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generate a new random MessageId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create MessageId from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a node (process/host) participating in the runtime.
///
/// Used to annotate addresses so that virtual actor placement and
/// supervision can tell local from remote instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Build a NodeId from a human-readable label (hostname, pod name, ...).
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Borrow the underlying string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Actor address for message routing.
///
/// Carries a logical path (named or anonymous), an optional node identity
/// for cluster placement, and an `ephemeral` marker for short-lived PIDs
/// registered transiently with the directory (e.g. ask-reply targets).
///
/// Equality and hashing are defined over the fully qualified path only
/// (`name`+`node` for `Named`, `id`+`node` for `Anonymous`): two addresses
/// built independently for the same well-known name must compare equal so
/// that lookups by name (directory registration, event broker dispatch)
/// work regardless of which call site minted the `ActorId`.
///
/// # Example
/// ```rust
/// use airssys_rt::util::ActorAddress;
///
/// let supervisor = ActorAddress::named("main_supervisor");
/// assert_eq!(supervisor.name(), Some("main_supervisor"));
///
/// let worker = ActorAddress::anonymous();
/// assert_eq!(worker.name(), None);
///
/// // Same name, independently constructed: equal by path, not by id.
/// assert_eq!(ActorAddress::named("registry"), ActorAddress::named("registry"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActorAddress {
    /// Named actor with string identifier
    Named {
        id: ActorId,
        name: String,
        node: Option<NodeId>,
        ephemeral: bool,
    },
    /// Anonymous actor with only ID
    Anonymous {
        id: ActorId,
        node: Option<NodeId>,
        ephemeral: bool,
    },
}

impl ActorAddress {
    /// Create a new named actor address, local to this node.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            id: ActorId::new(),
            name: name.into(),
            node: None,
            ephemeral: false,
        }
    }

    /// Create a new anonymous actor address, local to this node.
    pub fn anonymous() -> Self {
        Self::Anonymous {
            id: ActorId::new(),
            node: None,
            ephemeral: false,
        }
    }

    /// Create a short-lived named address, e.g. for ask-reply targets.
    pub fn ephemeral(name: impl Into<String>) -> Self {
        Self::Named {
            id: ActorId::new(),
            name: name.into(),
            node: None,
            ephemeral: true,
        }
    }

    /// Attach a node identity to this address (for cluster placement).
    pub fn with_node(self, node: NodeId) -> Self {
        match self {
            Self::Named {
                id,
                name,
                ephemeral,
                ..
            } => Self::Named {
                id,
                name,
                node: Some(node),
                ephemeral,
            },
            Self::Anonymous { id, ephemeral, .. } => Self::Anonymous {
                id,
                node: Some(node),
                ephemeral,
            },
        }
    }

    /// Get the actor ID
    pub fn id(&self) -> &ActorId {
        match self {
            Self::Named { id, .. } => id,
            Self::Anonymous { id, .. } => id,
        }
    }

    /// Get the actor name if available
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(name),
            Self::Anonymous { .. } => None,
        }
    }

    /// Get the node identity if this address was placed on a specific node.
    pub fn node(&self) -> Option<&NodeId> {
        match self {
            Self::Named { node, .. } => node.as_ref(),
            Self::Anonymous { node, .. } => node.as_ref(),
        }
    }

    /// Whether this address is registered as a transient/ephemeral PID.
    pub fn is_ephemeral(&self) -> bool {
        match self {
            Self::Named { ephemeral, .. } => *ephemeral,
            Self::Anonymous { ephemeral, .. } => *ephemeral,
        }
    }
}

impl PartialEq for ActorAddress {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Named { name, node, .. },
                Self::Named {
                    name: other_name,
                    node: other_node,
                    ..
                },
            ) => name == other_name && node == other_node,
            (
                Self::Anonymous { id, node, .. },
                Self::Anonymous {
                    id: other_id,
                    node: other_node,
                    ..
                },
            ) => id == other_id && node == other_node,
            _ => false,
        }
    }
}

impl Eq for ActorAddress {}

impl std::hash::Hash for ActorAddress {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Named { name, node, .. } => {
                0u8.hash(state);
                name.hash(state);
                node.hash(state);
            }
            Self::Anonymous { id, node, .. } => {
                1u8.hash(state);
                id.hash(state);
                node.hash(state);
            }
        }
    }
}

impl Display for ActorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { id, name, node, .. } => match node {
                Some(node) => write!(f, "{name}@{node}/{id}"),
                None => write!(f, "{name}@{id}"),
            },
            Self::Anonymous { id, node, .. } => match node {
                Some(node) => write!(f, "anonymous@{node}/{id}"),
                None => write!(f, "anonymous@{id}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_id_creation() {
        let id1 = ActorId::new();
        let id2 = ActorId::new();

        assert_ne!(id1, id2);
    }

    #[test]
    fn test_actor_id_format() {
        let id = ActorId::new();
        assert!(id.as_str().starts_with("actor-"));
    }

    #[test]
    fn test_actor_id_monotonic_counter() {
        let id1 = ActorId::new();
        let id2 = ActorId::new();

        let counter_of = |id: &ActorId| -> u64 {
            id.as_str()
                .split('-')
                .nth(1)
                .and_then(|s| s.parse().ok())
                .unwrap_or(0)
        };

        assert!(counter_of(&id2) > counter_of(&id1));
    }

    #[test]
    fn test_actor_id_default() {
        let id = ActorId::default();
        assert!(!id.as_str().is_empty());
    }

    #[test]
    fn test_actor_id_display() {
        let id = ActorId::new();
        let display = format!("{id}");

        assert!(!display.is_empty());
        assert!(display.contains('-'));
    }

    #[test]
    fn test_message_id_creation() {
        let id1 = MessageId::new();
        let id2 = MessageId::new();

        assert_ne!(id1, id2);
    }

    #[test]
    fn test_message_id_default() {
        let id = MessageId::default();
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_named_actor_address() {
        let addr = ActorAddress::named("test_actor");

        assert_eq!(addr.name(), Some("test_actor"));
        assert!(!addr.is_ephemeral());
    }

    #[test]
    fn test_anonymous_actor_address() {
        let addr = ActorAddress::anonymous();

        assert_eq!(addr.name(), None);
        assert!(!addr.is_ephemeral());
    }

    #[test]
    fn test_ephemeral_actor_address() {
        let addr = ActorAddress::ephemeral("ask-reply-1");

        assert!(addr.is_ephemeral());
        assert_eq!(addr.name(), Some("ask-reply-1"));
    }

    #[test]
    fn test_actor_address_with_node() {
        let addr = ActorAddress::named("worker").with_node(NodeId::new("node-1"));

        assert_eq!(addr.node().map(NodeId::as_str), Some("node-1"));
    }

    #[test]
    fn test_actor_address_display_named() {
        let addr = ActorAddress::named("my_actor");
        let display = format!("{addr}");

        assert!(display.contains("my_actor@"));
    }

    #[test]
    fn test_actor_address_display_anonymous() {
        let addr = ActorAddress::anonymous();
        let display = format!("{addr}");

        assert!(display.contains("anonymous@"));
    }

    #[test]
    fn test_actor_address_equality() {
        let addr1 = ActorAddress::named("actor");
        let addr2 = ActorAddress::named("actor");

        // Equality is by path (name + node), not by the randomly minted id,
        // so independently constructed addresses for the same name resolve
        // to the same registry entry.
        assert_eq!(addr1, addr2);
        assert_ne!(addr1.id(), addr2.id());
    }

    #[test]
    fn test_actor_address_inequality_by_node() {
        let local = ActorAddress::named("actor");
        let remote = ActorAddress::named("actor").with_node(NodeId::new("node-1"));

        assert_ne!(local, remote);
    }

    #[test]
    fn test_anonymous_addresses_distinct_by_id() {
        let addr1 = ActorAddress::anonymous();
        let addr2 = ActorAddress::anonymous();

        assert_ne!(addr1, addr2);
    }

    #[test]
    fn test_named_and_anonymous_never_equal() {
        let named = ActorAddress::named("actor");
        let anon = ActorAddress::anonymous();

        assert_ne!(named, anon);
    }
}
