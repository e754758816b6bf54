//! Peer liveness tracking.
//!
//! A background loop probes every peer's `/heartbeat` endpoint on a fixed
//! interval and records the outcome in a shared map. There is no hysteresis:
//! one successful probe marks a node healthy, one failure marks it unhealthy.

use super::types::Node;

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default pause between probe rounds.
pub const PROBE_INTERVAL: Duration = Duration::from_secs(2);

/// Thread-safe node-id -> healthy view, written by the probe loop and read
/// by the request coordinator.
#[derive(Debug, Default)]
pub struct HealthTracker {
    status: DashMap<String, bool>,
}

impl HealthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self, node_id: &str, healthy: bool) {
        self.status.insert(node_id.to_string(), healthy);
    }

    /// Nodes the tracker has never probed count as unhealthy.
    pub fn is_healthy(&self, node_id: &str) -> bool {
        self.status.get(node_id).map(|entry| *entry).unwrap_or(false)
    }
}

/// Handle for the background probe loop. The loop runs for the process
/// lifetime unless `stop` is called; tests use `stop` to tear down cleanly.
pub struct ProbeHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ProbeHandle {
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Spawn the probe loop over a fixed peer set.
///
/// Each probe gets a deadline of half the interval so a black-holed peer
/// cannot stall the round past the next tick. `self_id` is marked healthy
/// without probing.
pub fn spawn_probe_loop(
    tracker: Arc<HealthTracker>,
    self_id: String,
    peers: Vec<Node>,
    interval: Duration,
) -> ProbeHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);
    let client = reqwest::Client::new();
    let probe_timeout = interval / 2;

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown_rx.changed() => {
                    tracing::debug!("health monitor stopping");
                    return;
                }
            }
            probe_round(&client, &tracker, &self_id, &peers, probe_timeout).await;
        }
    });

    ProbeHandle { shutdown, task }
}

async fn probe_round(
    client: &reqwest::Client,
    tracker: &HealthTracker,
    self_id: &str,
    peers: &[Node],
    timeout: Duration,
) {
    for node in peers {
        if node.id == self_id {
            tracker.mark(&node.id, true);
            continue;
        }

        let url = format!("http://{}/heartbeat", node.addr);
        let alive = match client.get(&url).timeout(timeout).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(_) => false,
        };

        if !alive {
            tracing::debug!(node = %node.id, "peer failed heartbeat probe");
        }
        tracker.mark(&node.id, alive);
    }
}
