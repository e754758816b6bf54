//! Replicated In-Memory Cache Cluster Library
//!
//! This library crate defines the core modules that make up the cache node.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of three loosely coupled subsystems:
//!
//! - **`cache`**: The per-node storage layer. A concurrent key-value map with
//!   last-writer-wins conflict resolution and TTL expiry on read.
//! - **`cluster`**: The topology layer. Maps keys to responsible nodes via a
//!   consistent-hash ring and tracks peer liveness with periodic heartbeat
//!   probes.
//! - **`coordinator`**: The request layer. For every client request it
//!   selects replicas, distinguishes coordinator from replica roles, fans
//!   writes out to peers, and shapes the HTTP response.

pub mod cache;
pub mod cluster;
pub mod coordinator;
