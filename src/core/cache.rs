use dashmap::DashMap;
use log::trace;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

const DEFAULT_MAX_ENTRIES: usize = 1000;
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Read-through cache for file contents gathered before analysis.
///
/// Injected into [`FileScanner`](super::FileScanner) so the analyzer never
/// sees where contents came from.
pub trait ContentCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: String);
}

/// Pass-through cache that stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ContentCache for NoCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn put(&self, _key: &str, _value: String) {}
}

#[derive(Debug, Clone)]
struct CachedContent {
    value: String,
    stored_at: Instant,
}

/// Thread-safe in-memory cache with time-based expiry and a bounded size.
pub struct MemoryCache {
    entries: DashMap<u64, CachedContent>,
    ttl: Duration,
    max_entries: usize,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_limits(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(max_entries.min(DEFAULT_MAX_ENTRIES)),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    /// Stable 64-bit key for a path or URL.
    pub fn cache_key(key: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let hash = Self::cache_key(key);
        let expired = match self.entries.get(&hash) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            trace!("cache entry expired for {key}");
            self.entries.remove(&hash);
        }
        None
    }

    fn put(&self, key: &str, value: String) {
        let hash = Self::cache_key(key);
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&hash) {
            self.purge_expired();
            if self.entries.len() >= self.max_entries {
                let victim = self.entries.iter().next().map(|entry| *entry.key());
                if let Some(victim) = victim {
                    self.entries.remove(&victim);
                }
            }
        }
        self.entries.insert(
            hash,
            CachedContent {
                value,
                stored_at: Instant::now(),
            },
        );
    }
}
