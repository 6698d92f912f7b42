//! Route match caching.
//!
//! This module provides [`MatchCache`], an LRU-based cache that lets
//! [`RouteTable`](crate::matching::RouteTable) skip pattern scans for
//! pathnames it has already matched. Outlets match the pathname of every
//! recorded entry, and tab switches revisit the same pathnames over and over,
//! so hit rates are high in practice. It is gated behind the `cache` feature
//! flag and uses the [`lru`] crate internally.
//!
//! Misses are cached too: a pathname that matched no pattern is remembered as
//! `None`.
//!
//! # Examples
//!
//! ```
//! use tab_navigator::cache::MatchCache;
//!
//! let mut cache = MatchCache::new();
//! cache.insert("/unknown".to_string(), None);
//!
//! assert_eq!(cache.get("/unknown"), Some(None));
//! assert_eq!(cache.get("/other"), None);
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

use crate::matching::PatternMatch;
use crate::{debug_log, trace_log};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Counters tracking cache hit/miss rates and invalidations.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of lookups answered from the cache.
    pub hits: usize,
    /// Number of lookups that had to scan the patterns.
    pub misses: usize,
    /// Number of full cache invalidations (via [`MatchCache::clear`]).
    pub invalidations: usize,
}

impl CacheStats {
    /// Return the hit rate as a value in `0.0..=1.0`.
    ///
    /// Returns `0.0` if no lookups have been performed.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache from pathname to match result.
///
/// Default capacity is 256 pathnames. The cache is cleared whenever a
/// pattern is registered.
#[derive(Debug)]
pub struct MatchCache {
    entries: LruCache<String, Option<PatternMatch>>,
    stats: CacheStats,
}

impl MatchCache {
    const DEFAULT_CAPACITY: usize = 256;

    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache holding at most `capacity` pathnames (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Look up the cached match result for `pathname`.
    ///
    /// The outer `Option` is the cache hit; the inner one is the match.
    pub fn get(&mut self, pathname: &str) -> Option<Option<PatternMatch>> {
        if let Some(entry) = self.entries.get(pathname) {
            self.stats.hits += 1;
            trace_log!("Match cache hit for '{}'", pathname);
            Some(entry.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("Match cache miss for '{}'", pathname);
            None
        }
    }

    /// Remember the match result for `pathname`.
    pub fn insert(&mut self, pathname: String, result: Option<PatternMatch>) {
        self.entries.push(pathname, result);
    }

    /// Drop every entry and increment the invalidation counter.
    pub fn clear(&mut self) {
        debug_log!(
            "Clearing match cache: {} entries removed ({} total invalidations, hit rate: {:.1}%)",
            self.entries.len(),
            self.stats.invalidations + 1,
            self.stats.hit_rate() * 100.0
        );
        self.entries.clear();
        self.stats.invalidations += 1;
    }

    /// Return a reference to the current cache statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Return the number of cached pathnames.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MatchCache {
    fn clone(&self) -> Self {
        Self {
            entries: LruCache::new(self.entries.cap()),
            stats: self.stats.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RouteParams;

    fn found(pattern: &str) -> Option<PatternMatch> {
        Some(PatternMatch {
            pattern: pattern.to_string(),
            params: RouteParams::new(),
        })
    }

    #[test]
    fn test_cache_creation() {
        let cache = MatchCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = MatchCache::with_capacity(2);
        cache.insert("/a".to_string(), found("/a"));
        cache.insert("/b".to_string(), found("/b"));
        cache.get("/a");
        cache.insert("/c".to_string(), found("/c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("/b").is_none());
        assert!(cache.get("/a").is_some());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut cache = MatchCache::with_capacity(0);
        cache.insert("/a".to_string(), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = MatchCache::new();
        cache.insert("/a".to_string(), found("/a"));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_hit_rate_calculation() {
        let mut cache = MatchCache::new();
        cache.get("/a");
        cache.get("/b");
        cache.get("/c");
        cache.insert("/a".to_string(), found("/a"));
        cache.insert("/b".to_string(), None);
        cache.get("/a");
        cache.get("/b");

        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.stats().misses, 3);
        assert!((cache.stats().hit_rate() - 0.4).abs() < 0.001);
    }
}
