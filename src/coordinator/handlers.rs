//! Cache API Handlers
//!
//! The axum transport adapter: decodes HTTP requests into the coordinator's
//! abstract inputs and maps its outcomes back to status codes. Handlers stay
//! thin; every routing decision lives in the coordinator.

use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use super::coordinator::{Coordinator, WriteRequest};
use super::error::CacheError;
use super::protocol::{
    NodesResponse, SetRequest, ENDPOINT_DELETE, ENDPOINT_GET, ENDPOINT_HEALTH, ENDPOINT_HEARTBEAT,
    ENDPOINT_NODES, ENDPOINT_SET,
};
use crate::cluster::registry::ClusterRegistry;

#[derive(Debug, Deserialize)]
pub struct KeyQuery {
    #[serde(default)]
    pub key: String,
}

/// Build the node's full HTTP surface.
pub fn router(coordinator: Arc<Coordinator>, registry: Arc<ClusterRegistry>) -> Router {
    Router::new()
        .route(ENDPOINT_SET, post(handle_set))
        .route(ENDPOINT_GET, get(handle_get))
        .route(ENDPOINT_DELETE, delete(handle_delete))
        .route(ENDPOINT_HEARTBEAT, get(handle_heartbeat))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .route(ENDPOINT_NODES, get(handle_nodes))
        .layer(Extension(coordinator))
        .layer(Extension(registry))
}

fn error_response(err: &CacheError) -> (StatusCode, String) {
    let status = match err {
        CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        CacheError::Conflict => StatusCode::CONFLICT,
        CacheError::NotFound => StatusCode::NOT_FOUND,
        CacheError::NoHealthyReplicas => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, err.to_string())
}

pub async fn handle_set(
    Extension(coordinator): Extension<Arc<Coordinator>>,
    Json(request): Json<SetRequest>,
) -> Response {
    let write = WriteRequest {
        key: request.key,
        value: request.value,
        ttl_seconds: request.ttl,
        last_updated: request.last_updated,
    };

    match coordinator.write(write).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::debug!("set rejected: {e}");
            error_response(&e).into_response()
        }
    }
}

pub async fn handle_get(
    Extension(coordinator): Extension<Arc<Coordinator>>,
    Query(params): Query<KeyQuery>,
) -> Response {
    match coordinator.read(&params.key).await {
        Ok(found) => (StatusCode::OK, Json(found)).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

pub async fn handle_delete(
    Extension(coordinator): Extension<Arc<Coordinator>>,
    Query(params): Query<KeyQuery>,
) -> Response {
    match coordinator.remove(&params.key).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

pub async fn handle_heartbeat() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ALIVE")
}

pub async fn handle_health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

pub async fn handle_nodes(
    Extension(registry): Extension<Arc<ClusterRegistry>>,
) -> Json<NodesResponse> {
    Json(NodesResponse {
        nodes: registry.node_ids(),
        self_id: registry.self_id().to_string(),
    })
}
