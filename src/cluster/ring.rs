//! Consistent-hash ring with virtual points.
//!
//! Each physical node is projected onto the ring `VIRTUAL_POINTS` times so
//! key ownership spreads evenly. Lookups walk clockwise from the key's hash,
//! collecting distinct node ids.

use sha1::{Digest, Sha1};

/// Virtual points contributed by each node. More points smooth the key
/// distribution at the cost of a longer point list.
pub const VIRTUAL_POINTS: usize = 100;

/// One position on the ring.
#[derive(Debug, Clone)]
struct RingPoint {
    hash: u32,
    node_id: String,
}

/// Deterministic mapping from key strings to an ordered list of distinct
/// node ids.
///
/// Mutation (`add_node`/`remove_node`) takes `&mut self`; owners wrap the
/// ring in a reader-writer lock so lookups stay concurrent.
#[derive(Debug)]
pub struct HashRing {
    virtual_points: usize,
    points: Vec<RingPoint>,
}

impl Default for HashRing {
    fn default() -> Self {
        Self::new()
    }
}

impl HashRing {
    pub fn new() -> Self {
        Self::with_virtual_points(VIRTUAL_POINTS)
    }

    pub fn with_virtual_points(virtual_points: usize) -> Self {
        Self {
            virtual_points,
            points: Vec::new(),
        }
    }

    /// Insert the node's virtual points, keeping the list sorted by hash.
    pub fn add_node(&mut self, node_id: &str) {
        for i in 0..self.virtual_points {
            let hash = hash_key(&format!("{node_id}#{i}"));
            self.points.push(RingPoint {
                hash,
                node_id: node_id.to_string(),
            });
        }
        // Stable sort: points hashing identically keep insertion order.
        self.points.sort_by_key(|point| point.hash);
    }

    /// Drop all virtual points owned by the node.
    pub fn remove_node(&mut self, node_id: &str) {
        self.points.retain(|point| point.node_id != node_id);
    }

    /// The node owning the nearest clockwise point, or `None` on an empty
    /// ring.
    pub fn primary(&self, key: &str) -> Option<&str> {
        if self.points.is_empty() {
            return None;
        }
        Some(&self.points[self.start_index(key)].node_id)
    }

    /// The first `k` distinct node ids clockwise from the key's position.
    ///
    /// Walks at most `2 * |points|` positions, so a cluster with fewer than
    /// `k` distinct nodes yields a shorter list rather than spinning.
    pub fn top_k(&self, key: &str, k: usize) -> Vec<String> {
        if self.points.is_empty() || k == 0 {
            return Vec::new();
        }

        let start = self.start_index(key);
        let mut owners: Vec<String> = Vec::with_capacity(k);

        for step in 0..self.points.len() * 2 {
            if owners.len() >= k {
                break;
            }
            let point = &self.points[(start + step) % self.points.len()];
            if !owners.iter().any(|id| id == &point.node_id) {
                owners.push(point.node_id.clone());
            }
        }

        owners
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest index whose point hash is >= the key hash, wrapping to 0
    /// past the end of the ring.
    fn start_index(&self, key: &str) -> usize {
        let hash = hash_key(key);
        let idx = self.points.partition_point(|point| point.hash < hash);
        if idx == self.points.len() {
            0
        } else {
            idx
        }
    }
}

/// Stable 32-bit projection of the SHA-1 digest: bytes 16..20, big-endian.
///
/// Every node in the cluster must hash with the same function or placements
/// diverge; this derivation matches the deployed wire-compatible nodes.
pub fn hash_key(key: &str) -> u32 {
    let digest = Sha1::digest(key.as_bytes());
    u32::from_be_bytes([digest[16], digest[17], digest[18], digest[19]])
}
