//! Canonical cluster view: node table, hash ring, health tracker.

use super::health::{self, HealthTracker, ProbeHandle};
use super::ring::HashRing;
use super::types::Node;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::RwLock;

/// The single object the request coordinator consults for routing.
///
/// The node table is immutable for the process lifetime; the ring sits
/// behind a reader-writer lock so lookups stay concurrent; the health
/// tracker is installed when monitoring starts.
pub struct ClusterRegistry {
    nodes: HashMap<String, Node>,
    ring: RwLock<HashRing>,
    health: OnceLock<Arc<HealthTracker>>,
    self_id: String,
}

impl ClusterRegistry {
    pub fn new(self_id: impl Into<String>, node_addrs: &[String]) -> Self {
        let mut ring = HashRing::new();
        let mut nodes = HashMap::new();
        for addr in node_addrs {
            let node = Node::new(addr.clone());
            ring.add_node(&node.id);
            nodes.insert(node.id.clone(), node);
        }

        Self {
            nodes,
            ring: RwLock::new(ring),
            health: OnceLock::new(),
            self_id: self_id.into(),
        }
    }

    /// Ordered replica set for `key`: the ring's top-k ids resolved through
    /// the node table. Unknown ids cannot occur under static membership and
    /// are skipped rather than propagated.
    pub async fn responsible(&self, key: &str, replica_count: usize) -> Vec<Node> {
        let owner_ids = self.ring.read().await.top_k(key, replica_count);
        owner_ids
            .iter()
            .filter_map(|id| self.nodes.get(id).cloned())
            .collect()
    }

    /// Until the monitor has been started every node counts as healthy, so a
    /// freshly booted node serves traffic while the first probe round runs.
    pub fn is_healthy(&self, node_id: &str) -> bool {
        match self.health.get() {
            Some(tracker) => tracker.is_healthy(node_id),
            None => true,
        }
    }

    /// Install the health tracker without spawning the probe loop. Used by
    /// `start_health_monitor` and by tests that drive health marks directly.
    pub fn install_health_tracker(&self) -> Arc<HealthTracker> {
        self.health
            .get_or_init(|| Arc::new(HealthTracker::new()))
            .clone()
    }

    /// Start the background probe loop over the full node table.
    pub fn start_health_monitor(&self, interval: Duration) -> ProbeHandle {
        let tracker = self.install_health_tracker();
        let peers: Vec<Node> = self.nodes.values().cloned().collect();
        health::spawn_probe_loop(tracker, self.self_id.clone(), peers, interval)
    }

    pub fn self_id(&self) -> &str {
        &self.self_id
    }

    pub fn node_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.nodes.keys().cloned().collect();
        ids.sort();
        ids
    }
}
