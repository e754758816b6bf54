//! The per-request state machine: replica selection, role split, fan-out.

use super::error::CacheError;
use super::peer::PeerClient;
use super::protocol::{GetResponse, SetRequest};
use crate::cache::clock::Clock;
use crate::cache::store::{CacheStore, PutOutcome};
use crate::cluster::registry::ClusterRegistry;
use crate::cluster::types::Node;

use serde_json::Value;
use std::sync::Arc;

/// Transport-neutral write input.
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub key: String,
    pub value: Value,
    pub ttl_seconds: i64,
    /// Present on forwarded writes; a fresh client write is stamped by this
    /// coordinator.
    pub last_updated: Option<i64>,
}

/// Drives every client (and peer) request against the local store and the
/// rest of the replica set.
pub struct Coordinator {
    registry: Arc<ClusterRegistry>,
    store: Arc<CacheStore>,
    peers: PeerClient,
    clock: Arc<dyn Clock>,
    replica_count: usize,
}

impl Coordinator {
    pub fn new(
        registry: Arc<ClusterRegistry>,
        store: Arc<CacheStore>,
        clock: Arc<dyn Clock>,
        replica_count: usize,
    ) -> Self {
        Self {
            registry,
            store,
            peers: PeerClient::new(),
            clock,
            replica_count,
        }
    }

    /// Shared pre-flight: resolve the replica set and split it into the
    /// healthy subset and the local role.
    ///
    /// `self_is_replica` is computed over the unfiltered set, so a node
    /// whose own tracker has demoted it still serves its keys locally.
    async fn select_replicas(&self, key: &str) -> Result<(Vec<Node>, bool), CacheError> {
        if key.is_empty() {
            return Err(CacheError::InvalidRequest("key required".to_string()));
        }

        let replicas = self.registry.responsible(key, self.replica_count).await;
        let self_is_replica = replicas
            .iter()
            .any(|node| node.id == self.registry.self_id());
        let healthy: Vec<Node> = replicas
            .into_iter()
            .filter(|node| self.registry.is_healthy(&node.id))
            .collect();

        if healthy.is_empty() {
            return Err(CacheError::NoHealthyReplicas);
        }
        Ok((healthy, self_is_replica))
    }

    pub async fn write(&self, request: WriteRequest) -> Result<(), CacheError> {
        if request.ttl_seconds < 0 {
            return Err(CacheError::InvalidRequest(
                "ttl must not be negative".to_string(),
            ));
        }

        let (healthy, self_is_replica) = self.select_replicas(&request.key).await?;

        // A supplied timestamp is used as-is, whether it came from a client
        // or from a forwarding coordinator; only a missing one is stamped
        // here, so all replicas admit the same value.
        let last_updated = request
            .last_updated
            .unwrap_or_else(|| self.clock.now_ms());

        if self_is_replica {
            let outcome = self.store.put(
                &request.key,
                request.value.clone(),
                request.ttl_seconds,
                last_updated,
            );
            match outcome {
                // The resident value is newer; the sender holds stale state.
                // No fan-out.
                PutOutcome::RejectedStale => return Err(CacheError::Conflict),
                // Same-timestamp delivery: another path already carried this
                // write. Forwarding it again would echo between replicas
                // indefinitely, since every endpoint re-coordinates.
                PutOutcome::StoredDuplicate => {
                    tracing::debug!(key = %request.key, "duplicate write admitted without fan-out");
                    return Ok(());
                }
                PutOutcome::Stored => {}
            }
        }

        self.fan_out_set(&healthy, &request, last_updated).await;

        tracing::info!(
            key = %request.key,
            replicas = ?node_ids(&healthy),
            is_replica = self_is_replica,
            "set accepted"
        );
        Ok(())
    }

    pub async fn read(&self, key: &str) -> Result<GetResponse, CacheError> {
        let (healthy, _) = self.select_replicas(key).await?;

        // First healthy hit wins; there is no timestamp comparison across
        // replicas on the read path.
        for node in &healthy {
            if node.id == self.registry.self_id() {
                if let Some((value, last_updated)) = self.store.get(key) {
                    return Ok(GetResponse {
                        key: key.to_string(),
                        value,
                        last_updated,
                    });
                }
            } else {
                match self.peers.fetch(node, key).await {
                    Ok(Some(found)) => return Ok(found),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::debug!(node = %node.id, "peer read failed: {e:#}");
                    }
                }
            }
        }

        Err(CacheError::NotFound)
    }

    pub async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let (healthy, self_is_replica) = self.select_replicas(key).await?;

        if self_is_replica {
            // A replica-local delete stays local; only the pure-coordinator
            // path fans out.
            self.store.delete(key);
            tracing::info!(key, "deleted locally");
            return Ok(());
        }

        for node in &healthy {
            if node.id == self.registry.self_id() {
                continue;
            }
            if let Err(e) = self.peers.forward_delete(node, key).await {
                tracing::warn!(node = %node.id, key, "delete forward failed: {e:#}");
            }
        }

        tracing::info!(key, replicas = ?node_ids(&healthy), "delete fanned out");
        Ok(())
    }

    /// Push the write to every other healthy replica.
    ///
    /// Best-effort: a failed forward is logged and dropped. Replicas
    /// deduplicate retries via `last_updated`, so nothing here is
    /// transactional.
    async fn fan_out_set(&self, replicas: &[Node], request: &WriteRequest, last_updated: i64) {
        let forwarded = SetRequest {
            key: request.key.clone(),
            value: request.value.clone(),
            ttl: request.ttl_seconds,
            last_updated: Some(last_updated),
        };

        for node in replicas {
            if node.id == self.registry.self_id() {
                continue;
            }
            if let Err(e) = self.peers.forward_set(node, &forwarded).await {
                tracing::warn!(node = %node.id, key = %request.key, "set forward failed: {e:#}");
            }
        }
    }
}

fn node_ids(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|node| node.id.as_str()).collect()
}
