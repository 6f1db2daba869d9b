//! Keyed Dimension Cache
//!
//! Stores one measured dimension per opaque, caller-supplied key. The key is
//! meant to capture everything that affects an item's measured size, so a
//! content change produces a new key and naturally misses the cache.
//!
//! # Semantics
//!
//! - Writing a key that already exists overwrites the previous value. There
//!   is no history.
//! - Absence means "unmeasured", not zero. [`dimension`](KeyedDimensionCache::dimension)
//!   returns the zero sentinel for absent keys; use
//!   [`exists_dimension`](KeyedDimensionCache::exists_dimension) or
//!   [`get_dimension`](KeyedDimensionCache::get_dimension) to tell the cases apart.
//! - There is no capacity limit and no eviction. Entries stay until they are
//!   invalidated one by one or cleared together.
//!
//! # Performance Characteristics
//!
//! - Exists/Get/Cache/Invalidate: O(1) amortized
//! - Invalidate all: O(n)
//! - Space: O(n) in the number of distinct keys ever recorded
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. It is meant to be owned by one
//! container and driven from that container's layout pass.

extern crate alloc;

use crate::config::KeyedCacheConfig;
use crate::dimension::{Dimension, Size};
use crate::metrics::{CacheMetrics, KeyedCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A cache of measured dimensions keyed by an opaque value.
///
/// # Examples
///
/// ```
/// use dimension_cache::KeyedDimensionCache;
///
/// let mut cache: KeyedDimensionCache<&str, f64> = KeyedDimensionCache::new();
///
/// assert!(!cache.exists_dimension(&"row-1"));
/// assert_eq!(cache.dimension(&"row-1"), 0.0);
///
/// cache.cache_dimension("row-1", 88.5);
/// assert!(cache.exists_dimension(&"row-1"));
/// assert_eq!(cache.dimension(&"row-1"), 88.5);
///
/// cache.invalidate_dimension(&"row-1");
/// assert!(!cache.exists_dimension(&"row-1"));
/// ```
pub struct KeyedDimensionCache<K, D, S = DefaultHashBuilder> {
    map: HashMap<K, D, S>,
    metrics: KeyedCacheMetrics,
}

/// A keyed cache of scalar heights, as used by vertically scrolling lists.
pub type HeightKeyCache<K, S = DefaultHashBuilder> = KeyedDimensionCache<K, f64, S>;

/// A keyed cache of 2D sizes, as used by grids.
pub type SizeKeyCache<K, S = DefaultHashBuilder> = KeyedDimensionCache<K, Size, S>;

impl<K: Hash + Eq, D: Dimension> KeyedDimensionCache<K, D, DefaultHashBuilder> {
    /// Creates an empty cache with the default hasher.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// If `hasher` is `None`, the default hasher is used.
    pub fn init(config: KeyedCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_config_and_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, D: Dimension> Default for KeyedDimensionCache<K, D, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, D: Dimension, S: BuildHasher> KeyedDimensionCache<K, D, S> {
    /// Creates an empty cache with the given hash builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_config_and_hasher(KeyedCacheConfig::default(), hash_builder)
    }

    /// Creates an empty cache with the given configuration and hash builder.
    pub fn with_config_and_hasher(config: KeyedCacheConfig, hash_builder: S) -> Self {
        KeyedDimensionCache {
            map: HashMap::with_capacity_and_hasher(config.initial_capacity, hash_builder),
            metrics: KeyedCacheMetrics::new(),
        }
    }

    /// Returns the number of recorded dimensions.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the write-side counters of this cache.
    #[inline]
    pub fn cache_metrics(&self) -> &KeyedCacheMetrics {
        &self.metrics
    }

    /// Returns `true` if a dimension has been recorded for `key`.
    ///
    /// Any key is a valid input; one that was never recorded yields `false`.
    #[inline]
    pub fn exists_dimension<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the recorded dimension for `key`, or `None` if it is absent.
    #[inline]
    pub fn get_dimension<Q>(&self, key: &Q) -> Option<D>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).copied()
    }

    /// Returns the recorded dimension for `key`, or the zero sentinel if it
    /// is absent.
    #[inline]
    pub fn dimension<Q>(&self, key: &Q) -> D
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_dimension(key).unwrap_or_else(D::zero)
    }

    /// Records `value` for `key`, replacing any previous value.
    ///
    /// Returns the value that was replaced. The cache does not validate
    /// `value`; negative or NaN measurements are stored as given and reported
    /// through a warning event.
    pub fn cache_dimension(&mut self, key: K, value: D) -> Option<D> {
        if !value.is_valid() {
            tracing::warn!("recorded dimension is negative or not a number");
        }
        let previous = self.map.insert(key, value);
        self.metrics.record_store(previous.is_some());
        previous
    }

    /// Removes the dimension recorded for `key`.
    ///
    /// Returns the removed value. Invalidating an absent key is a no-op.
    pub fn invalidate_dimension<Q>(&mut self, key: &Q) -> Option<D>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let removed = self.map.remove(key);
        if removed.is_some() {
            self.metrics.record_invalidation();
        }
        removed
    }

    /// Removes every recorded dimension.
    pub fn invalidate_all(&mut self) {
        let entries = self.map.len();
        self.map.clear();
        self.metrics.record_clear(entries);
    }
}

impl<K, D, S> core::fmt::Debug for KeyedDimensionCache<K, D, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyedDimensionCache")
            .field("len", &self.map.len())
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl<K: Hash + Eq, D: Dimension, S: BuildHasher> CacheMetrics for KeyedDimensionCache<K, D, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.to_btreemap();
        metrics.insert("entries".to_string(), self.len() as f64);
        metrics
    }

    fn component_name(&self) -> &'static str {
        self.metrics.component_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyed_cache_absent_key() {
        let cache: KeyedDimensionCache<u64, f64> = KeyedDimensionCache::new();
        assert!(!cache.exists_dimension(&7));
        assert_eq!(cache.dimension(&7), 0.0);
        assert_eq!(cache.get_dimension(&7), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_keyed_cache_round_trip_and_overwrite() {
        let mut cache = KeyedDimensionCache::new();
        assert_eq!(cache.cache_dimension(57u64, 120.5f64), None);
        assert_eq!(cache.dimension(&57), 120.5);
        assert_eq!(cache.cache_dimension(57, 98.0), Some(120.5));
        assert_eq!(cache.dimension(&57), 98.0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keyed_cache_measured_zero_is_present() {
        let mut cache = KeyedDimensionCache::new();
        cache.cache_dimension("divider", 0.0f64);
        assert!(cache.exists_dimension(&"divider"));
        assert_eq!(cache.get_dimension(&"divider"), Some(0.0));
    }

    #[test]
    fn test_keyed_cache_invalidate() {
        let mut cache = KeyedDimensionCache::new();
        cache.cache_dimension(1u32, 10.0f64);
        cache.cache_dimension(2u32, 20.0f64);
        assert_eq!(cache.invalidate_dimension(&1), Some(10.0));
        assert_eq!(cache.invalidate_dimension(&1), None);
        assert!(!cache.exists_dimension(&1));
        assert!(cache.exists_dimension(&2));

        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_keyed_cache_string_keys_borrow() {
        let mut cache: KeyedDimensionCache<String, Size> = KeyedDimensionCache::new();
        cache.cache_dimension("avatar".to_string(), Size::new(40.0, 40.0));
        assert!(cache.exists_dimension("avatar"));
        assert_eq!(cache.dimension("avatar"), Size::new(40.0, 40.0));
        assert_eq!(cache.dimension("banner"), Size::ZERO);
    }

    #[test]
    fn test_keyed_cache_stores_invalid_values() {
        let mut cache = KeyedDimensionCache::new();
        cache.cache_dimension(1u8, -12.0f64);
        cache.cache_dimension(2u8, f64::NAN);
        assert_eq!(cache.dimension(&1), -12.0);
        assert!(cache.exists_dimension(&2));
        assert!(cache.dimension(&2).is_nan());
    }

    #[test]
    fn test_keyed_cache_metrics() {
        let mut cache = KeyedDimensionCache::new();
        cache.cache_dimension(1u8, 1.0f64);
        cache.cache_dimension(1u8, 2.0f64);
        cache.cache_dimension(2u8, 3.0f64);
        cache.invalidate_dimension(&9);
        cache.invalidate_dimension(&2);
        cache.invalidate_all();

        let metrics = cache.metrics();
        assert_eq!(metrics["recordings"], 3.0);
        assert_eq!(metrics["overwrites"], 1.0);
        assert_eq!(metrics["invalidations"], 1.0);
        assert_eq!(metrics["clears"], 1.0);
        assert_eq!(metrics["cleared_entries"], 1.0);
        assert_eq!(metrics["entries"], 0.0);
        assert_eq!(cache.component_name(), "KeyedDimensionCache");
    }

    #[test]
    fn test_keyed_cache_init_with_config() {
        let config = KeyedCacheConfig {
            initial_capacity: 64,
        };
        let mut cache: HeightKeyCache<u64> = KeyedDimensionCache::init(config, None);
        cache.cache_dimension(3, 44.0);
        assert_eq!(cache.dimension(&3), 44.0);
    }
}
