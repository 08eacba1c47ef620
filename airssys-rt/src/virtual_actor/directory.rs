//! Virtual actor directory: placement cache, activation, and migration.

// Layer 1: Standard library imports
use std::num::NonZeroUsize;
use std::sync::atomic::AtomicUsize;

// Layer 2: Third-party crate imports
use chrono::{Duration as ChronoDuration, Utc}; 
use lru::LruCache;
use parking_lot::Mutex;

// Layer 3: Internal module imports
use super::activator::PhysicalActivator;
use super::entry::VirtualActorEntry;
use super::error::VirtualActorError;
use super::id::VirtualId;
use super::strategy::{ClusterView, PlacementStrategy};
use crate::util::{ActorAddress, NodeId};

/// Guarantees exactly one active physical actor system-wide per virtual
/// identity, backed by a fixed-capacity LRU placement cache (§4.7).
///
/// This is a plain service, not an actor: callers drive `get_or_activate`
/// directly and are expected to invoke `cleanup_idle` on their own periodic
/// tick (the runtime has no global scheduler of its own to hang this off).
pub struct VirtualActorDirectory<A: PhysicalActivator, C: ClusterView> {
    cache: Mutex<LruCache<VirtualId, VirtualActorEntry>>,
    activator: A,
    cluster: C,
    strategy: PlacementStrategy,
    round_robin_cursor: AtomicUsize,
    max_idle_time: ChronoDuration,
}

impl<A: PhysicalActivator, C: ClusterView> VirtualActorDirectory<A, C> {
    pub fn new(
        capacity: usize,
        activator: A,
        cluster: C,
        strategy: PlacementStrategy,
        max_idle_time: ChronoDuration,
    ) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            activator,
            cluster,
            strategy,
            round_robin_cursor: AtomicUsize::new(0),
            max_idle_time,
        }
    }

    /// Resolve `id` to its physical actor, activating it if this is a
    /// placement-cache miss, or migrating it if the placement strategy
    /// decides its current node should no longer host it.
    pub async fn get_or_activate(
        &self,
        id: VirtualId,
    ) -> Result<ActorAddress, VirtualActorError> {
        let hit = {
            let mut cache = self.cache.lock();
            cache.get_mut(&id).map(|entry| {
                let migrate = self.strategy.should_migrate(&entry.node, &self.cluster);
                if !migrate {
                    entry.touch();
                }
                (entry.physical_ref.clone(), migrate)
            })
        };

        match hit {
            Some((physical_ref, false)) => Ok(physical_ref),
            Some((stale_ref, true)) => {
                {
                    let mut cache = self.cache.lock();
                    cache.pop(&id);
                }
                if let Err(err) = self.activator.deactivate(&stale_ref).await {
                    tracing::warn!(
                        virtual_id = %id,
                        error = %err,
                        "failed to deactivate virtual actor before migration"
                    );
                }
                self.activate_and_insert(id).await
            }
            None => self.activate_and_insert(id).await,
        }
    }

    async fn activate_and_insert(&self, id: VirtualId) -> Result<ActorAddress, VirtualActorError> {
        let node = self
            .strategy
            .select_node(&id, &self.cluster, &self.round_robin_cursor)
            .ok_or_else(|| VirtualActorError::NoNodeAvailable(id.clone()))?;

        let address = self
            .activator
            .activate(&id, &node)
            .await
            .map_err(|err| VirtualActorError::ActivationFailed {
                id: id.clone(),
                reason: err.to_string(),
            })?;

        let entry = VirtualActorEntry::new(id.clone(), address.clone(), node);
        let evicted = {
            let mut cache = self.cache.lock();
            cache.push(id, entry)
        };

        if let Some((_, evicted_entry)) = evicted {
            if let Err(err) = self.activator.deactivate(&evicted_entry.physical_ref).await {
                tracing::warn!(
                    virtual_id = %evicted_entry.virtual_id,
                    error = %err,
                    "failed to deactivate virtual actor evicted from placement cache"
                );
            }
        }

        Ok(address)
    }

    /// Deactivate every entry idle longer than `max_idle_time`.
    pub async fn cleanup_idle(&self) {
        let now = Utc::now();
        let stale: Vec<VirtualActorEntry> = {
            let cache = self.cache.lock();
            cache
                .iter()
                .filter(|(_, entry)| entry.idle_for(now) > self.max_idle_time)
                .map(|(_, entry)| entry.clone())
                .collect()
        };

        if stale.is_empty() {
            return;
        }

        {
            let mut cache = self.cache.lock();
            for entry in &stale {
                cache.pop(&entry.virtual_id);
            }
        }

        for entry in stale {
            if let Err(err) = self.activator.deactivate(&entry.physical_ref).await {
                tracing::warn!(
                    virtual_id = %entry.virtual_id,
                    error = %err,
                    "failed to deactivate idle virtual actor"
                );
            }
        }
    }

    /// Migrate every entry placed on `node` to another available node, or
    /// drop it if none remains (§4.7.5). Migration never copies state: the
    /// new physical actor starts from its behavior's default context.
    pub async fn remove_node(&self, node: &NodeId) {
        let affected: Vec<VirtualActorEntry> = {
            let cache = self.cache.lock();
            cache
                .iter()
                .filter(|(_, entry)| &entry.node == node)
                .map(|(_, entry)| entry.clone())
                .collect()
        };

        if affected.is_empty() {
            return;
        }

        {
            let mut cache = self.cache.lock();
            for entry in &affected {
                cache.pop(&entry.virtual_id);
            }
        }

        for entry in affected {
            let target = self.strategy.select_node(
                &entry.virtual_id,
                &self.cluster,
                &self.round_robin_cursor,
            );
            let Some(target) = target else {
                continue;
            };

            match self.activator.activate(&entry.virtual_id, &target).await {
                Ok(address) => {
                    let new_entry =
                        VirtualActorEntry::new(entry.virtual_id.clone(), address, target);
                    let mut cache = self.cache.lock();
                    cache.push(entry.virtual_id, new_entry);
                }
                Err(err) => {
                    tracing::warn!(
                        virtual_id = %entry.virtual_id,
                        error = %err,
                        "failed to migrate virtual actor off removed node"
                    );
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    use crate::virtual_actor::strategy::NodeLoad;

    #[derive(Debug, thiserror::Error)]
    #[error("fake activator failure")]
    struct FakeActivatorError;

    struct FakeActivator {
        activations: AtomicU64,
        deactivations: AtomicU64,
    }

    impl FakeActivator {
        fn new() -> Self {
            Self {
                activations: AtomicU64::new(0),
                deactivations: AtomicU64::new(0),
            }
        }
    }

    #[async_trait]
    impl PhysicalActivator for FakeActivator {
        type Error = FakeActivatorError;

        async fn activate(
            &self,
            id: &VirtualId,
            node: &NodeId,
        ) -> Result<ActorAddress, Self::Error> {
            self.activations.fetch_add(1, Ordering::Relaxed);
            Ok(ActorAddress::named(format!("{id}@{node}")))
        }

        async fn deactivate(&self, _address: &ActorAddress) -> Result<(), Self::Error> {
            self.deactivations.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    struct FakeCluster {
        nodes: Vec<NodeId>,
        healthy: Arc<Mutex<HashMap<String, bool>>>,
    }

    impl FakeCluster {
        fn single_healthy_node() -> Self {
            Self {
                nodes: vec![NodeId::new("node-1")],
                healthy: Arc::new(Mutex::new(HashMap::new())),
            }
        }
    }

    impl ClusterView for FakeCluster {
        fn available_nodes(&self) -> Vec<NodeId> {
            self.nodes.clone()
        }

        fn is_healthy(&self, node: &NodeId) -> bool {
            *self
                .healthy
                .lock()
                .get(node.as_str())
                .unwrap_or(&true)
        }

        fn load(&self, _node: &NodeId) -> NodeLoad {
            NodeLoad {
                cpu_percent: 0.0,
                mem_percent: 0.0,
                actor_count: 0,
            }
        }
    }

    #[tokio::test]
    async fn test_activates_once_on_first_access() {
        let directory = VirtualActorDirectory::new(
            10,
            FakeActivator::new(),
            FakeCluster::single_healthy_node(),
            PlacementStrategy::RoundRobin,
            ChronoDuration::minutes(30),
        );

        let id = VirtualId::new("cart", "user-1");
        let first = directory.get_or_activate(id.clone()).await.unwrap();
        let second = directory.get_or_activate(id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(directory.activator.activations.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_lru_eviction_deactivates_oldest() {
        let directory = VirtualActorDirectory::new(
            1,
            FakeActivator::new(),
            FakeCluster::single_healthy_node(),
            PlacementStrategy::RoundRobin,
            ChronoDuration::minutes(30),
        );

        directory
            .get_or_activate(VirtualId::new("cart", "user-1"))
            .await
            .unwrap();
        directory
            .get_or_activate(VirtualId::new("cart", "user-2"))
            .await
            .unwrap();

        assert_eq!(directory.len(), 1);
        assert_eq!(
            directory.activator.deactivations.load(Ordering::Relaxed),
            1
        );
    }

    #[tokio::test]
    async fn test_cleanup_idle_deactivates_stale_entries() {
        let directory = VirtualActorDirectory::new(
            10,
            FakeActivator::new(),
            FakeCluster::single_healthy_node(),
            PlacementStrategy::RoundRobin,
            ChronoDuration::zero(),
        );

        directory
            .get_or_activate(VirtualId::new("cart", "user-1"))
            .await
            .unwrap();
        directory.cleanup_idle().await;

        assert!(directory.is_empty());
        assert_eq!(
            directory.activator.deactivations.load(Ordering::Relaxed),
            1
        );
    }

    #[tokio::test]
    async fn test_remove_node_drops_entries_with_no_remaining_node() {
        let directory = VirtualActorDirectory::new(
            10,
            FakeActivator::new(),
            FakeCluster::single_healthy_node(),
            PlacementStrategy::RoundRobin,
            ChronoDuration::minutes(30),
        );

        directory
            .get_or_activate(VirtualId::new("cart", "user-1"))
            .await
            .unwrap();
        directory.remove_node(&NodeId::new("node-1")).await;

        assert!(directory.is_empty());
    }

    #[tokio::test]
    async fn test_consistent_hash_migrates_on_unhealthy_node() {
        let cluster = FakeCluster::single_healthy_node();
        let healthy = cluster.healthy.clone();
        let directory = VirtualActorDirectory::new(
            10,
            FakeActivator::new(),
            cluster,
            PlacementStrategy::ConsistentHash,
            ChronoDuration::minutes(30),
        );

        let id = VirtualId::new("cart", "user-1");
        directory.get_or_activate(id.clone()).await.unwrap();
        healthy.lock().insert("node-1".to_string(), false);

        directory.get_or_activate(id).await.unwrap();
        assert_eq!(
            directory.activator.deactivations.load(Ordering::Relaxed),
            1
        );
    }
}
