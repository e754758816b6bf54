//! Local Cache Storage Module
//!
//! Implements the per-node entry store: a concurrent mapping from key to
//! `(value, expiration, last_updated)`.
//!
//! ## Core Concepts
//! - **Last-writer-wins**: a write is admitted only if its `last_updated`
//!   timestamp is at least as new as the resident entry's. Replicas receiving
//!   the same fan-out therefore converge to one value, and retries are no-ops.
//! - **Lazy expiry**: entries carry an optional expiration; an expired entry
//!   is removed the first time a reader touches it. There is no sweeper task.
//! - **Injectable clock**: all wall-clock reads go through the `Clock` trait
//!   so TTL and conflict outcomes are deterministic under test.

pub mod clock;
pub mod store;
