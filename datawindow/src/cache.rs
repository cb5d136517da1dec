use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::num::NonZeroUsize;

use lru::LruCache;

use crate::ConfigError;

/// Hit/miss/eviction counters of a [`BoundedCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// A fixed-capacity key → value store with least-recently-used eviction.
///
/// Backed by [`lru::LruCache`]; this type adds the capacity check at construction and
/// hit/miss/eviction accounting.
pub struct BoundedCache<K, V> {
    inner: LruCache<K, V>,
    stats: CacheStats,
}

impl<K: Hash + Eq, V> BoundedCache<K, V> {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(ConfigError::ZeroCapacity)?;
        Ok(Self {
            inner: LruCache::new(capacity),
            stats: CacheStats::default(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.inner.cap().get()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Looks up `key` and marks it most recently used. Misses return `None`.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self.inner.get(key);
        if found.is_some() {
            self.stats.hits = self.stats.hits.saturating_add(1);
        } else {
            self.stats.misses = self.stats.misses.saturating_add(1);
        }
        found
    }

    /// Looks up `key` without touching recency or stats.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.peek(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains(key)
    }

    /// Inserts or updates `key` as the most recently used entry.
    ///
    /// When a new key arrives at capacity, the least recently used entry is evicted and
    /// returned. Updating an existing key never evicts.
    pub fn set(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.inner.contains(&key) {
            self.inner.put(key, value);
            return None;
        }
        let evicted = self.inner.push(key, value);
        if evicted.is_some() {
            self.stats.evictions = self.stats.evictions.saturating_add(1);
            vtrace!(len = self.inner.len(), "BoundedCache: evicted least recently used");
        }
        evicted
    }

    /// Returns the cached value for `key`, computing and inserting it on a miss.
    pub fn get_or_insert_with(&mut self, key: K, f: impl FnOnce() -> V) -> &V {
        if self.inner.contains(&key) {
            self.stats.hits = self.stats.hits.saturating_add(1);
        } else {
            self.stats.misses = self.stats.misses.saturating_add(1);
            if self.inner.len() == self.capacity() {
                self.stats.evictions = self.stats.evictions.saturating_add(1);
            }
        }
        self.inner.get_or_insert(key, f)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.pop(key)
    }

    /// Empties the cache. Capacity and stats are kept.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Keys from least to most recently used.
    pub fn keys_lru(&self) -> impl Iterator<Item = &K> + '_ {
        self.inner.iter().rev().map(|(k, _)| k)
    }
}

impl<K: Hash + Eq, V> fmt::Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCache")
            .field("len", &self.inner.len())
            .field("capacity", &self.inner.cap())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
