//! Upstream result cache with TTL expiry and LRU eviction.
//!
//! One instance fronts each upstream service. Entries are visible only while
//! younger than the configured TTL and are evicted least-recently-used once
//! the store grows past `max_entries`. Instances never share capacity.

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::CacheConfig;

/// A single cached value.
struct CacheEntry<V> {
    value: V,
    /// When the value was written. Reset on every `put`.
    written_at: Instant,
    /// Logical clock tick of the last read or write.
    accessed_at: AtomicU64,
}

/// Concurrent result cache with TTL expiry and LRU eviction.
pub struct ResponseCache<K, V> {
    name: &'static str,
    entries: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
    max_entries: usize,
    clock: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> ResponseCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new cache with the given TTL and capacity.
    ///
    /// `max_entries` is clamped to a minimum of 1.
    pub fn new(name: &'static str, ttl_secs: u64, max_entries: usize) -> Self {
        Self {
            name,
            entries: DashMap::new(),
            ttl: Duration::from_secs(ttl_secs),
            max_entries: max_entries.max(1),
            clock: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn from_config(name: &'static str, config: &CacheConfig) -> Self {
        Self::new(name, config.ttl_secs, config.max_entries)
    }

    /// Name used in logs and stats.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Look up a value. Returns `None` if the key is absent or expired.
    ///
    /// Expired entries are removed eagerly, unless a concurrent `put` has
    /// refreshed them in the meantime.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if !self.is_expired(&entry, now) => {
                entry.accessed_at.store(self.tick(), Ordering::Relaxed);
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            debug!(cache = self.name, "Cache entry expired, removing");
            self.entries.remove_if(key, |_, e| self.is_expired(e, now));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a value, overwriting any existing entry and resetting its age.
    ///
    /// When the store exceeds capacity, expired entries go first, then LRU.
    pub fn put(&self, key: K, value: V) {
        let now = Instant::now();
        self.entries.insert(
            key,
            CacheEntry {
                value,
                written_at: now,
                accessed_at: AtomicU64::new(self.tick()),
            },
        );
        if self.entries.len() > self.max_entries {
            self.evict_expired(now);
            while self.entries.len() > self.max_entries {
                if !self.evict_lru() {
                    break;
                }
            }
        }
    }

    /// Remove all entries from the cache.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Return the number of entries currently stored, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return aggregate statistics about the cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    // -- private helpers ---------------------------------------------------

    fn is_expired(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.written_at) >= self.ttl
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    fn evict_expired(&self, now: Instant) {
        self.entries.retain(|_, e| !self.is_expired(e, now));
    }

    fn evict_lru(&self) -> bool {
        // Copy the key out per item so only one shard guard is held at a time.
        let mut lru: Option<(u64, K)> = None;
        for entry in self.entries.iter() {
            let accessed = entry.value().accessed_at.load(Ordering::Relaxed);
            if lru.as_ref().map_or(true, |(min, _)| accessed < *min) {
                lru = Some((accessed, entry.key().clone()));
            }
        }
        match lru {
            Some((_, key)) => {
                debug!(cache = self.name, "Evicting LRU cache entry");
                self.entries.remove(&key);
                true
            }
            None => false,
        }
    }
}

/// Aggregate cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    /// Number of entries currently in the cache.
    pub total_entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing live.
    pub misses: u64,
}
