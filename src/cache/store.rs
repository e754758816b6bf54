use super::clock::Clock;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

/// A single resident entry.
///
/// `expiration` is a Unix timestamp in seconds; `0` means the entry never
/// expires. `last_updated` is the originating coordinator's wall-clock
/// timestamp in milliseconds and is the sole conflict-resolution key.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Value,
    pub expiration: i64,
    pub last_updated: i64,
}

/// Outcome of a write admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The write created the entry or carried a strictly newer timestamp.
    Stored,
    /// The incoming timestamp equals the resident one. The write is admitted
    /// (last arrival wins a tie) but it is the same logical write arriving
    /// again, typically replica fan-out echoing back or a client retry, and
    /// must not be propagated further.
    StoredDuplicate,
    /// The incoming `last_updated` was older than the resident entry's; the
    /// resident value was left untouched.
    RejectedStale,
}

/// Concurrent per-key store with last-writer-wins admission and TTL-on-read
/// eviction.
///
/// All operations go through the DashMap entry API, so the timestamp
/// compare-and-swap on `put` and the remove-on-expiry in `get` are atomic
/// with respect to other callers touching the same key.
pub struct CacheStore {
    entries: DashMap<String, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Store `value` under `key` unless a newer entry is already resident.
    ///
    /// Equal timestamps admit the write: replica fan-out carries the
    /// coordinator's timestamp, so every replica (and every retry) must
    /// accept it.
    pub fn put(&self, key: &str, value: Value, ttl_seconds: i64, last_updated: i64) -> PutOutcome {
        let expiration = if ttl_seconds > 0 {
            self.clock.now_unix_s() + ttl_seconds
        } else {
            0
        };
        let incoming = CacheEntry {
            value,
            expiration,
            last_updated,
        };

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut resident) => {
                let resident_ts = resident.get().last_updated;
                if last_updated > resident_ts {
                    resident.insert(incoming);
                    PutOutcome::Stored
                } else if last_updated == resident_ts {
                    resident.insert(incoming);
                    PutOutcome::StoredDuplicate
                } else {
                    PutOutcome::RejectedStale
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(incoming);
                PutOutcome::Stored
            }
        }
    }

    /// Look up `key`, returning the value and its `last_updated` timestamp.
    ///
    /// An expired entry is removed and reported absent in the same critical
    /// section, so two racing readers cannot both observe it.
    pub fn get(&self, key: &str) -> Option<(Value, i64)> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(resident) => {
                let entry = resident.get();
                if entry.expiration > 0 && self.clock.now_unix_s() > entry.expiration {
                    resident.remove();
                    None
                } else {
                    Some((entry.value.clone(), entry.last_updated))
                }
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Unconditional removal.
    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
