//! Shared cache handle serializing access to the LRU core

use parking_lot::RwLock;

use crate::error::Result;
use crate::lru::LruCache;
use crate::stats::{CacheStats, StatsSnapshot};

/// Thread-safe LRU cache with a fixed capacity.
///
/// All operations funnel through one lock, so each call observes and leaves
/// a consistent engine state no matter how many connections share the handle.
/// Reads take the lock shared: a `get` never reorders entries, because
/// recency here tracks writes only. That is a deliberate deviation from
/// classic LRU semantics and it is observable in eviction order.
pub struct Cache {
    inner: RwLock<LruCache>,
    stats: CacheStats,
    limit: usize,
}

impl Cache {
    /// Create a cache holding at most `limit` entries.
    ///
    /// With `limit == 0` every write is accepted but nothing is retained.
    pub fn new(limit: usize) -> Self {
        Self {
            inner: RwLock::new(LruCache::new(limit)),
            stats: CacheStats::new(),
            limit,
        }
    }

    /// Insert or replace `key`, evicting the least-recently-written entry
    /// when the cache is full. Never fails.
    pub fn put(&self, key: String, value: String) {
        let evicted = self.inner.write().put(key, value);
        self.stats.record_insert();
        if evicted.is_some() {
            self.stats.record_eviction();
        }
    }

    /// Look up `key`, returning a copy of its value.
    ///
    /// Does not affect eviction order.
    pub fn get(&self, key: &str) -> Result<String> {
        let result = self.inner.read().get(key).map(str::to_string);
        match result {
            Ok(_) => self.stats.record_hit(),
            Err(_) => self.stats.record_miss(),
        }
        result
    }

    /// Remove `key` from the cache.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.inner.write().delete(key)
    }

    /// Current number of live entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.limit
    }

    /// Operation counters for this cache.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
