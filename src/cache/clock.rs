use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock time source.
///
/// Conflict resolution and TTL expiry both depend on wall-clock reads, so the
/// clock is a collaborator rather than a free function: production code uses
/// [`SystemClock`], tests pin time and advance it by hand.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now_unix_s(&self) -> i64;

    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// The process wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_s(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

/// Manually advanced clock for tests.
#[cfg(test)]
pub struct ManualClock {
    now_ms: std::sync::atomic::AtomicI64,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now_ms: std::sync::atomic::AtomicI64::new(start_ms),
        }
    }

    pub fn advance_ms(&self, delta: i64) {
        self.now_ms
            .fetch_add(delta, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn advance_secs(&self, delta: i64) {
        self.advance_ms(delta * 1000);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_unix_s(&self) -> i64 {
        self.now_ms() / 1000
    }

    fn now_ms(&self) -> i64 {
        self.now_ms.load(std::sync::atomic::Ordering::SeqCst)
    }
}
