use embercache::cache::clock::{Clock, SystemClock};
use embercache::cache::store::CacheStore;
use embercache::cluster::health::PROBE_INTERVAL;
use embercache::cluster::registry::ClusterRegistry;
use embercache::coordinator::coordinator::Coordinator;
use embercache::coordinator::handlers::router;

use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Static configuration from the environment; anything missing or
    // unparseable falls back to the default.
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let self_id = std::env::var("NODE_ID")
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| format!("localhost:{port}"));

    let node_addrs: Vec<String> = match std::env::var("NODES") {
        Ok(list) if !list.trim().is_empty() => list
            .split(',')
            .map(|addr| addr.trim().to_string())
            .filter(|addr| !addr.is_empty())
            .collect(),
        _ => vec![self_id.clone()],
    };

    let replica_count = std::env::var("REPLICA_COUNT")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|&count| count > 0)
        .unwrap_or(2);

    tracing::info!(
        "Cache node {} starting on :{}, cluster: {:?}, replica count {}",
        self_id,
        port,
        node_addrs,
        replica_count
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = Arc::new(CacheStore::new(clock.clone()));
    let registry = Arc::new(ClusterRegistry::new(self_id, &node_addrs));
    let _probe = registry.start_health_monitor(PROBE_INTERVAL);
    let coordinator = Arc::new(Coordinator::new(
        registry.clone(),
        store,
        clock,
        replica_count,
    ));

    let app = router(coordinator, registry);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
