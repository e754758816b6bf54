use thiserror::Error;

/// Client-facing failures of the request coordinator.
///
/// Peer transport failures never appear here: write fan-out swallows them
/// and reads fall through to the next replica.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    /// Empty key, malformed payload, or negative TTL.
    #[error("{0}")]
    InvalidRequest(String),

    /// The local store rejected the write because the incoming timestamp is
    /// older than the resident entry's.
    #[error("conflict: incoming update is older than current value")]
    Conflict,

    /// No healthy replica held the key.
    #[error("not found")]
    NotFound,

    /// The key's replica set has zero healthy members.
    #[error("no healthy replicas")]
    NoHealthyReplicas,
}
