//! Bounded, time-expiring cache of destination file contents
//!
//! Keys are absolute destination paths, values the bytes this process last
//! read from or wrote to that path. Two eviction policies compose:
//!
//! - capacity: at most `max_entries` entries, least recently used evicted first
//! - age: an entry older than `ttl` is reported absent and dropped on the next
//!   access attempt
//!
//! Recency is tracked with a monotonically increasing tick per access and a
//! `BTreeMap` from tick to key, so the oldest entry is always the first key.

use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Default maximum number of cached files
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Default lifetime of a cached entry
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Size and age limits of a [`ContentCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLimits {
    /// Maximum number of entries kept
    pub max_entries: usize,
    /// Maximum age of an entry before it is treated as absent
    pub ttl: Duration,
}

impl CacheLimits {
    /// Create limits, clamping capacity to at least one entry
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            max_entries: max_entries.max(1),
            ttl,
        }
    }
}

impl Default for CacheLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }
}

/// Cached content of one destination file
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Last known bytes of the file
    pub content: Bytes,
    /// When the entry was inserted or last overwritten
    pub inserted_at: Instant,
    last_used: u64,
}

impl CacheEntry {
    /// Get the age of this cache entry
    pub fn age(&self) -> Duration {
        self.inserted_at.elapsed()
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing usable
    pub misses: u64,
    /// Entries dropped to respect capacity
    pub evictions: u64,
    /// Entries dropped because they outlived the TTL
    pub expirations: u64,
}

/// LRU + TTL map from destination path to content
#[derive(Debug)]
pub struct ContentCache {
    limits: CacheLimits,
    entries: HashMap<PathBuf, CacheEntry>,
    recency: BTreeMap<u64, PathBuf>,
    tick: u64,
    stats: CacheStats,
}

impl ContentCache {
    /// Create a cache with the given limits
    pub fn new(limits: CacheLimits) -> Self {
        Self {
            limits,
            entries: HashMap::new(),
            recency: BTreeMap::new(),
            tick: 0,
            stats: CacheStats::default(),
        }
    }

    /// Create a cache holding at most `max_entries` entries for at most `ttl`
    pub fn with_limits(max_entries: usize, ttl: Duration) -> Self {
        Self::new(CacheLimits::new(max_entries, ttl))
    }

    /// Look up a path, marking it most recently used on a hit
    pub fn get(&mut self, key: &Path) -> Option<Bytes> {
        if !self.has(key) {
            self.stats.misses += 1;
            return None;
        }

        let tick = self.next_tick();
        let entry = self.entries.get_mut(key)?;
        self.recency.remove(&entry.last_used);
        entry.last_used = tick;
        self.recency.insert(tick, key.to_path_buf());
        self.stats.hits += 1;

        trace!("Cache hit for: {}", key.display());
        Some(entry.content.clone())
    }

    /// Check for a live entry without changing its recency
    pub fn has(&mut self, key: &Path) -> bool {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(self.limits.ttl),
            None => return false,
        };

        if expired {
            self.remove(key);
            self.stats.expirations += 1;
            debug!("Cache entry expired for: {}", key.display());
            return false;
        }

        true
    }

    /// Insert or overwrite an entry, evicting the least recently used one if full
    pub fn set(&mut self, key: PathBuf, content: Bytes) {
        if let Some(previous) = self.entries.remove(&key) {
            self.recency.remove(&previous.last_used);
        }

        while self.entries.len() >= self.limits.max_entries {
            if !self.evict_least_recent() {
                break;
            }
        }

        let tick = self.next_tick();
        self.recency.insert(tick, key.clone());
        self.entries.insert(
            key,
            CacheEntry {
                content,
                inserted_at: Instant::now(),
                last_used: tick,
            },
        );
    }

    /// Drop an entry, returning its content if one was stored
    pub fn remove(&mut self, key: &Path) -> Option<Bytes> {
        let entry = self.entries.remove(key)?;
        self.recency.remove(&entry.last_used);
        Some(entry.content)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    /// Number of physically stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured limits
    pub fn limits(&self) -> CacheLimits {
        self.limits
    }

    /// Hit/miss/eviction counters
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn evict_least_recent(&mut self) -> bool {
        let Some((_, key)) = self.recency.pop_first() else {
            return false;
        };
        self.entries.remove(&key);
        self.stats.evictions += 1;
        debug!("Evicted least recently used entry: {}", key.display());
        true
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new(CacheLimits::default())
    }
}
