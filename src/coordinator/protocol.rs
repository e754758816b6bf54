//! Cache Wire Protocol
//!
//! Defines the HTTP endpoints and Data Transfer Objects shared by clients
//! and peers. Peer-to-peer traffic reuses the public `/set`, `/get` and
//! `/delete` endpoints with identical semantics, so there is a single DTO
//! set for both.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- API Endpoints ---

/// Public (and peer) write endpoint.
pub const ENDPOINT_SET: &str = "/set";
/// Public (and peer) read endpoint.
pub const ENDPOINT_GET: &str = "/get";
/// Public (and peer) delete endpoint.
pub const ENDPOINT_DELETE: &str = "/delete";
/// Liveness probe target for the health monitor.
pub const ENDPOINT_HEARTBEAT: &str = "/heartbeat";
/// Process-level health check (load balancers, orchestration).
pub const ENDPOINT_HEALTH: &str = "/health";
/// Cluster topology introspection.
pub const ENDPOINT_NODES: &str = "/nodes";

// --- Data Transfer Objects ---

/// Write request body.
///
/// `last_updated` is absent on fresh client writes and stamped by the first
/// coordinator; a forwarded write always carries it so every replica admits
/// the same timestamp. `ttl` is in seconds, `0` meaning no expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRequest {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
}

/// Successful read response.
///
/// `last_updated` travels with the value so a coordinator relaying a peer's
/// hit preserves the timestamp verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetResponse {
    pub key: String,
    pub value: Value,
    pub last_updated: i64,
}

/// Topology introspection response.
#[derive(Debug, Serialize, Deserialize)]
pub struct NodesResponse {
    pub nodes: Vec<String>,
    #[serde(rename = "self")]
    pub self_id: String,
}
