//! Keyed TTL store for fetched resources.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::observability::metrics;

/// A cached value plus the instant it stops being served.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// A thread-safe, TTL-bounded store for resource values.
///
/// Cloning the handle shares the underlying map, so two coordinators built
/// from the same cache observe each other's writes for a shared key. The
/// TTL is fixed at construction and restarts on every write.
#[derive(Clone)]
pub struct ResourceCache<T> {
    inner: Arc<DashMap<String, CacheEntry<T>>>,
    ttl: Duration,
}

impl<T: Clone> ResourceCache<T> {
    /// Create a cache whose entries live for `ttl` after each write.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Store `value` under `key`, overwriting any prior entry and
    /// restarting its TTL.
    pub fn set(&self, key: &str, value: T) {
        self.inner.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
        metrics::record_cache_size(self.inner.len());
    }

    /// The live value under `key`, if any. An expired entry reads as
    /// absent without being removed.
    pub fn get(&self, key: &str) -> Option<T> {
        let hit = self
            .inner
            .get(key)
            .filter(|entry| entry.is_live())
            .map(|entry| entry.value.clone());
        metrics::record_cache_lookup(hit.is_some());
        hit
    }

    /// Whether a live entry exists under `key`.
    pub fn has(&self, key: &str) -> bool {
        self.inner.get(key).map(|entry| entry.is_live()).unwrap_or(false)
    }

    /// Drop the entry under `key` regardless of expiry.
    pub fn invalidate(&self, key: &str) {
        self.inner.remove(key);
        metrics::record_cache_size(self.inner.len());
    }

    /// Number of entries currently stored, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The TTL applied to every write.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
