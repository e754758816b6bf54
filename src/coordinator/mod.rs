//! Request Coordination Module
//!
//! Implements the per-request state machine that makes the cluster look like
//! a single cache: every node can accept any request, decide which replicas
//! own the key, and route accordingly.
//!
//! ## Request Flow
//! 1. **Pre-flight**: validate the key, resolve the replica set through the
//!    cluster registry, and filter it through the health view. A node is a
//!    replica for the key if it appears in the unfiltered set, so a node its
//!    own tracker has demoted still serves its keys locally.
//! 2. **Writes**: the coordinator stamps the value with a wall-clock
//!    millisecond timestamp (unless the request already carries one, i.e. it
//!    was forwarded) and pushes it to every healthy replica. Fan-out is
//!    best-effort: replicas deduplicate via the timestamp, so a dropped
//!    forward heals on the next write rather than failing the client.
//! 3. **Reads**: replicas are tried in ring order; the first hit wins. There
//!    is no cross-replica reconciliation on reads, trading freshness for
//!    latency.
//! 4. **Deletes**: a pure coordinator fans the delete out; a replica deletes
//!    locally.
//!
//! ## Submodules
//! - **`coordinator`**: the state machine itself, transport-neutral.
//! - **`peer`**: HTTP client for forwarding operations to other nodes.
//! - **`protocol`**: endpoint constants and wire DTOs shared by clients and
//!   peers (peer traffic reuses the public endpoints).
//! - **`handlers`**: the axum transport adapter.
//! - **`error`**: client-facing failure kinds and their status mapping.

pub mod coordinator;
pub mod error;
pub mod handlers;
pub mod peer;
pub mod protocol;
