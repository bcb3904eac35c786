//! Query result cache implementation.

use crate::{QueryKey, Resource};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cache entry with value and insertion time.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    value: JsonValue,
    created_at: Instant,
}

impl CacheEntry {
    /// Whether this entry is older than `max_age`.
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.created_at.elapsed() > max_age
    }

    /// Time left before the entry is older than `max_age`.
    pub fn time_remaining(&self, max_age: Duration) -> Option<Duration> {
        max_age.checked_sub(self.created_at.elapsed())
    }
}

/// How stale a read may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Freshness {
    /// Public rendering; the long window
    Public,
    /// Admin editor reads right after edits; the short window
    Admin,
}

/// Configuration for the query cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct QueryCacheConfig {
    /// Staleness window for public reads (seconds)
    #[serde(default = "default_public_ttl")]
    #[builder(default = "default_public_ttl()")]
    public_ttl_secs: u64,

    /// Staleness window for admin reads (seconds)
    #[serde(default = "default_admin_ttl")]
    #[builder(default = "default_admin_ttl()")]
    admin_ttl_secs: u64,

    /// Maximum cache size (number of entries)
    #[serde(default = "default_max_size")]
    #[builder(default = "default_max_size()")]
    max_size: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    #[builder(default = "default_enabled()")]
    enabled: bool,
}

fn default_public_ttl() -> u64 {
    300 // 5 minutes
}

fn default_admin_ttl() -> u64 {
    30
}

fn default_max_size() -> usize {
    500
}

fn default_enabled() -> bool {
    true
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            public_ttl_secs: default_public_ttl(),
            admin_ttl_secs: default_admin_ttl(),
            max_size: default_max_size(),
            enabled: default_enabled(),
        }
    }
}

impl QueryCacheConfig {
    /// Staleness window for a read mode.
    pub fn max_age(&self, freshness: Freshness) -> Duration {
        match freshness {
            Freshness::Public => Duration::from_secs(self.public_ttl_secs),
            Freshness::Admin => Duration::from_secs(self.admin_ttl_secs.min(self.public_ttl_secs)),
        }
    }
}

/// Hit, miss and eviction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Fresh entries returned
    pub hits: u64,
    /// Lookups that found nothing fresh
    pub misses: u64,
    /// Entries dropped to respect `max_size`
    pub evictions: u64,
}

/// Cache for content query results.
///
/// Stores JSON values keyed by [`QueryKey`]. Each read states how stale
/// the result may be; entries older than the public window are removed on
/// read and by [`QueryCache::cleanup_expired`]. When full, the least
/// recently used entry is evicted.
///
/// # Example
///
/// ```
/// use lodge_cache::{Freshness, QueryCache, QueryCacheConfig, QueryKey, Resource};
/// use serde_json::json;
///
/// let mut cache = QueryCache::new(QueryCacheConfig::default());
/// let key = QueryKey::scoped(Resource::PublishedBlocks, "home");
///
/// cache.insert(key.clone(), json!([]));
/// assert!(cache.get(&key, Freshness::Public).is_some());
/// ```
#[derive(Debug)]
pub struct QueryCache {
    config: QueryCacheConfig,
    entries: HashMap<QueryKey, CacheEntry>,
    access_order: Vec<QueryKey>,
    stats: CacheStats,
}

impl QueryCache {
    /// Create a new query cache with configuration.
    pub fn new(config: QueryCacheConfig) -> Self {
        tracing::debug!(
            public_ttl_secs = config.public_ttl_secs,
            admin_ttl_secs = config.admin_ttl_secs,
            max_size = config.max_size,
            enabled = config.enabled,
            "Creating new QueryCache"
        );
        Self {
            config,
            entries: HashMap::new(),
            access_order: Vec::new(),
            stats: CacheStats::default(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &QueryCacheConfig {
        &self.config
    }

    /// Insert a query result.
    #[tracing::instrument(skip(self, value), fields(key = %key, cache_size = self.entries.len()))]
    pub fn insert(&mut self, key: QueryKey, value: JsonValue) {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping insert");
            return;
        }

        // Evict if at capacity
        if self.entries.len() >= self.config.max_size && !self.entries.contains_key(&key) {
            self.evict_lru();
        }

        self.touch(&key);

        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
        };
        self.entries.insert(key, entry);
        tracing::debug!("Inserted entry into cache");
    }

    /// Get a cached result no older than the window for `freshness`.
    ///
    /// Returns None if the entry doesn't exist, is too stale for this read,
    /// or the cache is disabled. Entries past the public window are removed.
    #[tracing::instrument(skip(self), fields(key = %key, cache_size = self.entries.len()))]
    pub fn get(&mut self, key: &QueryKey, freshness: Freshness) -> Option<&CacheEntry> {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, returning None");
            return None;
        }

        let max_age = self.config.max_age(freshness);
        let public_age = self.config.max_age(Freshness::Public);

        let Some(entry) = self.entries.get(key) else {
            self.stats.misses += 1;
            return None;
        };

        if entry.is_stale(public_age) {
            tracing::debug!("Cache entry expired, removing");
            self.remove(key);
            self.stats.misses += 1;
            return None;
        }

        if entry.is_stale(max_age) {
            tracing::debug!(?freshness, "Cache entry too stale for this read");
            self.stats.misses += 1;
            return None;
        }

        tracing::debug!(time_remaining = ?entry.time_remaining(max_age), "Cache hit");
        self.stats.hits += 1;
        self.touch(key);
        self.entries.get(key)
    }

    /// Drop one entry.
    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        let removed = self.remove(key);
        if removed {
            tracing::debug!(key = %key, "Invalidated cache entry");
        }
        removed
    }

    /// Drop every entry whose scope equals `scope`, across all resources.
    pub fn invalidate_scope(&mut self, scope: &str) -> usize {
        self.invalidate_where(|key| key.scope() == Some(scope))
    }

    /// Drop every entry of one resource.
    pub fn invalidate_resource(&mut self, resource: Resource) -> usize {
        self.invalidate_where(|key| key.resource() == resource)
    }

    fn invalidate_where(&mut self, predicate: impl Fn(&QueryKey) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !predicate(key));
        self.access_order.retain(|key| !predicate(key));
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!(removed, "Invalidated cache entries");
        }
        removed
    }

    /// Remove entries older than the public window.
    pub fn cleanup_expired(&mut self) -> usize {
        let max_age = self.config.max_age(Freshness::Public);
        let before = self.entries.len();

        self.entries.retain(|key, entry| {
            let keep = !entry.is_stale(max_age);
            if !keep
                && let Some(pos) = self.access_order.iter().position(|k| k == key)
            {
                self.access_order.remove(pos);
            }
            keep
        });

        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(removed, remaining = self.entries.len(), "Cleaned up expired cache entries");
        }
        removed
    }

    /// Clear all cache entries.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.access_order.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Get number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit, miss and eviction counters since creation.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn touch(&mut self, key: &QueryKey) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
        self.access_order.push(key.clone());
    }

    fn remove(&mut self, key: &QueryKey) -> bool {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
        self.entries.remove(key).is_some()
    }

    /// Evict least recently used entry.
    fn evict_lru(&mut self) {
        if let Some(key) = self.access_order.first().cloned() {
            tracing::debug!(key = %key, "Evicting LRU entry");
            self.entries.remove(&key);
            self.access_order.remove(0);
            self.stats.evictions += 1;
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(QueryCacheConfig::default())
    }
}
