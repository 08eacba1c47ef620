//! Node placement strategies for the virtual actor directory.

// Layer 1: Standard library imports
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

// Layer 3: Internal module imports
use super::id::VirtualId;
use crate::util::NodeId;

/// CPU/memory/actor-count snapshot for a single node, consulted by the
/// load-aware strategy and its migration thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLoad {
    pub cpu_percent: f32,
    pub mem_percent: f32,
    pub actor_count: usize,
}

impl NodeLoad {
    /// Load-aware migration thresholds (§4.7.3): cpu>70%, mem>70%, or
    /// actor-count>1000.
    pub fn exceeds_migration_threshold(&self) -> bool {
        self.cpu_percent > 70.0 || self.mem_percent > 70.0 || self.actor_count > 1000
    }
}

/// A read-only view of cluster membership and health, supplied by the host
/// application. The directory never discovers nodes on its own.
pub trait ClusterView: Send + Sync {
    fn available_nodes(&self) -> Vec<NodeId>;
    fn is_healthy(&self, node: &NodeId) -> bool;
    fn load(&self, node: &NodeId) -> NodeLoad;
}

/// Node selection policy for activating a virtual actor (§4.7.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// Cycles through available nodes in order.
    RoundRobin,
    /// `hash(type|key) mod N`; migrates only when the assigned node is
    /// unhealthy.
    ConsistentHash,
    /// Prefers the least-loaded healthy node; migrates when the current
    /// node crosses a load threshold.
    LoadAware,
}

impl PlacementStrategy {
    /// Pick a node to (re)activate `id` on, given the current cluster view
    /// and, if this is a re-placement, the node the entry is already on.
    pub fn select_node(
        &self,
        id: &VirtualId,
        cluster: &dyn ClusterView,
        round_robin_cursor: &AtomicUsize,
    ) -> Option<NodeId> {
        let nodes = cluster.available_nodes();
        if nodes.is_empty() {
            return None;
        }

        match self {
            PlacementStrategy::RoundRobin => {
                let index = round_robin_cursor.fetch_add(1, Ordering::Relaxed) % nodes.len();
                Some(nodes[index].clone())
            }
            PlacementStrategy::ConsistentHash => {
                let mut hasher = DefaultHasher::new();
                id.hash_key().hash(&mut hasher);
                let index = (hasher.finish() as usize) % nodes.len();
                Some(nodes[index].clone())
            }
            PlacementStrategy::LoadAware => nodes
                .iter()
                .filter(|node| cluster.is_healthy(node))
                .min_by(|a, b| {
                    let load_a = cluster.load(a);
                    let load_b = cluster.load(b);
                    load_a
                        .cpu_percent
                        .partial_cmp(&load_b.cpu_percent)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .cloned(),
        }
    }

    /// Whether an already-placed entry on `current_node` should be migrated
    /// elsewhere right now.
    pub fn should_migrate(&self, current_node: &NodeId, cluster: &dyn ClusterView) -> bool {
        match self {
            PlacementStrategy::RoundRobin => false,
            PlacementStrategy::ConsistentHash => !cluster.is_healthy(current_node),
            PlacementStrategy::LoadAware => {
                !cluster.is_healthy(current_node)
                    || cluster.load(current_node).exceeds_migration_threshold()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeCluster {
        nodes: Vec<NodeId>,
        healthy: HashMap<String, bool>,
        loads: HashMap<String, NodeLoad>,
    }

    impl ClusterView for FakeCluster {
        fn available_nodes(&self) -> Vec<NodeId> {
            self.nodes.clone()
        }

        fn is_healthy(&self, node: &NodeId) -> bool {
            *self.healthy.get(node.as_str()).unwrap_or(&true)
        }

        fn load(&self, node: &NodeId) -> NodeLoad {
            *self.loads.get(node.as_str()).unwrap_or(&NodeLoad {
                cpu_percent: 0.0,
                mem_percent: 0.0,
                actor_count: 0,
            })
        }
    }

    #[test]
    fn test_round_robin_cycles() {
        let cluster = FakeCluster {
            nodes: vec![NodeId::new("a"), NodeId::new("b")],
            healthy: HashMap::new(),
            loads: HashMap::new(),
        };
        let cursor = AtomicUsize::new(0);
        let id = VirtualId::new("cart", "user-1");

        let first = PlacementStrategy::RoundRobin.select_node(&id, &cluster, &cursor);
        let second = PlacementStrategy::RoundRobin.select_node(&id, &cluster, &cursor);
        assert_ne!(first, second);
    }

    #[test]
    fn test_consistent_hash_is_stable() {
        let cluster = FakeCluster {
            nodes: vec![NodeId::new("a"), NodeId::new("b"), NodeId::new("c")],
            healthy: HashMap::new(),
            loads: HashMap::new(),
        };
        let cursor = AtomicUsize::new(0);
        let id = VirtualId::new("cart", "user-1");

        let first = PlacementStrategy::ConsistentHash.select_node(&id, &cluster, &cursor);
        let second = PlacementStrategy::ConsistentHash.select_node(&id, &cluster, &cursor);
        assert_eq!(first, second);
    }

    #[test]
    fn test_consistent_hash_migrates_only_on_unhealthy() {
        let mut healthy = HashMap::new();
        healthy.insert("a".to_string(), true);
        let cluster = FakeCluster {
            nodes: vec![NodeId::new("a")],
            healthy,
            loads: HashMap::new(),
        };
        assert!(!PlacementStrategy::ConsistentHash.should_migrate(&NodeId::new("a"), &cluster));

        let mut unhealthy = HashMap::new();
        unhealthy.insert("a".to_string(), false);
        let cluster = FakeCluster {
            nodes: vec![NodeId::new("a")],
            healthy: unhealthy,
            loads: HashMap::new(),
        };
        assert!(PlacementStrategy::ConsistentHash.should_migrate(&NodeId::new("a"), &cluster));
    }

    #[test]
    fn test_load_aware_prefers_least_loaded() {
        let mut loads = HashMap::new();
        loads.insert(
            "a".to_string(),
            NodeLoad {
                cpu_percent: 80.0,
                mem_percent: 10.0,
                actor_count: 1,
            },
        );
        loads.insert(
            "b".to_string(),
            NodeLoad {
                cpu_percent: 10.0,
                mem_percent: 10.0,
                actor_count: 1,
            },
        );
        let cluster = FakeCluster {
            nodes: vec![NodeId::new("a"), NodeId::new("b")],
            healthy: HashMap::new(),
            loads,
        };
        let cursor = AtomicUsize::new(0);
        let id = VirtualId::new("cart", "user-1");

        let chosen = PlacementStrategy::LoadAware.select_node(&id, &cluster, &cursor);
        assert_eq!(chosen, Some(NodeId::new("b")));
    }

    #[test]
    fn test_load_aware_migrates_over_threshold() {
        let mut loads = HashMap::new();
        loads.insert(
            "a".to_string(),
            NodeLoad {
                cpu_percent: 95.0,
                mem_percent: 10.0,
                actor_count: 1,
            },
        );
        let cluster = FakeCluster {
            nodes: vec![NodeId::new("a")],
            healthy: HashMap::new(),
            loads,
        };
        assert!(PlacementStrategy::LoadAware.should_migrate(&NodeId::new("a"), &cluster));
    }

    #[test]
    fn test_empty_cluster_returns_none() {
        let cluster = FakeCluster {
            nodes: vec![],
            healthy: HashMap::new(),
            loads: HashMap::new(),
        };
        let cursor = AtomicUsize::new(0);
        let id = VirtualId::new("cart", "user-1");
        assert_eq!(
            PlacementStrategy::RoundRobin.select_node(&id, &cluster, &cursor),
            None
        );
    }
}
