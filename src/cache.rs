//! Time-boxed single-slot memo for the president lookup.
//!
//! Not keyed and not generalised: it holds exactly one answer and forgets
//! it once `ttl` has elapsed since it was written.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of wall-clock time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// The system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicU64,
}

impl ManualClock {
    pub fn at(millis: u64) -> Self {
        Self {
            millis: AtomicU64::new(millis),
        }
    }

    pub fn set(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    written_at: u64,
}

/// Single cached value with a fixed validity window.
#[derive(Debug, Clone)]
pub struct SessionCache {
    entry: Option<CacheEntry>,
    ttl_millis: u64,
}

impl SessionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: None,
            ttl_millis: ttl.as_millis() as u64,
        }
    }

    /// The cached value, if populated and younger than the TTL at `now`.
    pub fn get(&self, now: u64) -> Option<&str> {
        self.entry
            .as_ref()
            .filter(|e| now.saturating_sub(e.written_at) < self.ttl_millis)
            .map(|e| e.value.as_str())
    }

    /// Overwrite the slot and stamp it with `now`.
    pub fn set(&mut self, value: impl Into<String>, now: u64) {
        self.entry = Some(CacheEntry {
            value: value.into(),
            written_at: now,
        });
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(24 * 60 * 60))
    }
}
