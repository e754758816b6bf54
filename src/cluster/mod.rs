//! Cluster Topology Module
//!
//! Implements the routing substrate the request coordinator consults: who the
//! members are, which of them own a key, and which of them are alive.
//!
//! ## Core Mechanisms
//! - **Consistent hashing**: each node contributes a fixed number of virtual
//!   points to a hash ring. Keys map to the nearest clockwise point, and the
//!   replica set for a key is the next N distinct nodes along the ring. All
//!   nodes compute identical placements independently (shared-nothing).
//! - **Health monitoring**: a background loop probes every peer's heartbeat
//!   endpoint on a fixed interval and records the outcome in a shared health
//!   map. The coordinator filters replica sets through this map before
//!   routing.
//! - **Static membership**: the node table is fixed at startup. There is no
//!   discovery and no rebalancing; a dead node simply stops receiving traffic
//!   until its probes succeed again.

pub mod health;
pub mod registry;
pub mod ring;
pub mod types;
