//! LRU cache engine combining the recency list with a key index
//!
//! Recency is write-only: `put` makes an entry most-recently-used, `get`
//! leaves the order untouched. Eviction only ever fires on `put`.

use ahash::RandomState;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::list::RecencyList;

/// Single-threaded LRU cache core with a fixed capacity.
///
/// Composes a [`RecencyList`] with a key → node-index map so that get, put
/// and delete are all O(1). The map and the list always describe the same
/// set of live keys. Shared access goes through [`crate::Cache`], which
/// serializes callers behind a lock.
pub(crate) struct LruCache {
    list: RecencyList,
    index: HashMap<String, usize, RandomState>,
    limit: usize,
}

impl LruCache {
    /// Create a cache holding at most `limit` entries.
    ///
    /// A `limit` of zero is allowed and yields a cache that accepts writes
    /// but stores nothing.
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            list: RecencyList::with_capacity(limit),
            index: HashMap::with_capacity_and_hasher(limit, RandomState::new()),
            limit,
        }
    }

    /// Insert or replace `key`, making it the most-recently-used entry.
    ///
    /// A re-put of a live key replaces its entry rather than updating it in
    /// place. When the cache is full the least-recently-used entry is evicted
    /// first; the evicted key is returned. Always succeeds.
    pub(crate) fn put(&mut self, key: String, value: String) -> Option<String> {
        if self.limit == 0 {
            // Anything inserted would have to be evicted in the same step,
            // so a zero-capacity cache stays permanently empty.
            return None;
        }

        if let Some(idx) = self.index.remove(&key) {
            self.list.unlink(idx);
        }

        let mut evicted = None;
        if self.list.len() == self.limit {
            if let Some((old_key, _)) = self.list.pop_back() {
                self.index.remove(&old_key);
                evicted = Some(old_key);
            }
        }

        let idx = self.list.push_front(key.clone(), value);
        self.index.insert(key, idx);

        evicted
    }

    /// Look up `key` without touching the recency order.
    pub(crate) fn get(&self, key: &str) -> Result<&str> {
        match self.index.get(key) {
            Some(&idx) => Ok(self.list.value(idx)),
            None => Err(Error::NotFound),
        }
    }

    /// Remove `key` from the cache.
    pub(crate) fn delete(&mut self, key: &str) -> Result<()> {
        match self.index.remove(key) {
            Some(idx) => {
                self.list.unlink(idx);
                Ok(())
            }
            None => Err(Error::NotFound),
        }
    }

    /// Current number of live entries.
    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Maximum number of entries this cache will hold.
    pub(crate) fn capacity(&self) -> usize {
        self.limit
    }
}
