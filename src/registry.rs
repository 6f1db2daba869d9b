//! Per-Extent Cache Registry
//!
//! Measured dimensions are only valid for the layout extent they were
//! measured at. Rather than clearing everything whenever the container is
//! resized, the registry keeps one [`KeyedDimensionCache`] per distinct
//! extent and hands out the one matching the current layout.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       CacheRegistry                          │
//! │                                                              │
//! │   usable extent ──▶ LayoutExtent ──▶ per-extent cache        │
//! │                                                              │
//! │   ┌──────────────┐  ┌──────────────┐  ┌──────────────┐       │
//! │   │  375.0 (pt)  │  │  667.0 (pt)  │  │  320.0 (pt)  │       │
//! │   │ key → height │  │ key → height │  │ key → height │       │
//! │   └──────────────┘  └──────────────┘  └──────────────┘       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rotating a device back and forth, or toggling split-screen, flips between
//! a handful of known extents, and each flip reuses the measurements taken
//! the last time that extent was active. Caches are created lazily and never
//! evicted; the set of extents a container ever sees is small in practice.

extern crate alloc;

use crate::config::KeyedCacheConfig;
use crate::dimension::Dimension;
use crate::extent::LayoutExtent;
use crate::keyed::KeyedDimensionCache;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// One [`KeyedDimensionCache`] per layout extent, created on demand.
///
/// # Examples
///
/// ```
/// use dimension_cache::CacheRegistry;
///
/// let mut registry: CacheRegistry<u64, f64> = CacheRegistry::new();
///
/// // Portrait
/// registry.current_cache(375.0).unwrap().cache_dimension(57, 132.0);
///
/// // Landscape gets its own, initially empty, cache
/// assert!(!registry.current_cache(667.0).unwrap().exists_dimension(&57));
///
/// // Back to portrait: the earlier measurement is still there
/// assert_eq!(registry.current_cache(375.0).unwrap().dimension(&57), 132.0);
///
/// // A container that has not been sized yet has no cache
/// assert!(registry.current_cache(0.0).is_none());
/// ```
pub struct CacheRegistry<K, D, S = DefaultHashBuilder> {
    caches: HashMap<LayoutExtent, KeyedDimensionCache<K, D, S>>,
    config: KeyedCacheConfig,
    hash_builder: S,
}

impl<K: Hash + Eq, D: Dimension> CacheRegistry<K, D, DefaultHashBuilder> {
    /// Creates an empty registry whose caches use the default hasher.
    pub fn new() -> Self {
        Self::with_hasher(KeyedCacheConfig::default(), DefaultHashBuilder::default())
    }

    /// Creates an empty registry from a per-cache configuration with an
    /// optional hasher.
    pub fn init(config: KeyedCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, D: Dimension> Default for CacheRegistry<K, D, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, D: Dimension, S: BuildHasher + Clone> CacheRegistry<K, D, S> {
    /// Creates an empty registry. Every cache it creates uses `config` and a
    /// clone of `hash_builder`.
    pub fn with_hasher(config: KeyedCacheConfig, hash_builder: S) -> Self {
        CacheRegistry {
            caches: HashMap::default(),
            config,
            hash_builder,
        }
    }

    /// Returns the cache for `extent`, creating an empty one the first time
    /// the extent is seen.
    ///
    /// Returns `None` when `extent` is zero, negative or not finite: the
    /// layout is degenerate and caching is unavailable for now.
    pub fn current_cache(&mut self, extent: f64) -> Option<&mut KeyedDimensionCache<K, D, S>> {
        let extent = LayoutExtent::new(extent)?;
        let config = self.config;
        let hash_builder = &self.hash_builder;
        let cache = self.caches.entry(extent).or_insert_with(|| {
            tracing::debug!(extent = extent.get(), "creating dimension cache for new extent");
            KeyedDimensionCache::with_config_and_hasher(config, hash_builder.clone())
        });
        Some(cache)
    }

    /// Returns the cache for `extent` if one has been created, without
    /// creating it.
    pub fn cache_for(&self, extent: f64) -> Option<&KeyedDimensionCache<K, D, S>> {
        self.caches.get(&LayoutExtent::new(extent)?)
    }

    /// Number of extents that have a cache.
    #[inline]
    pub fn extent_count(&self) -> usize {
        self.caches.len()
    }

    /// Iterates over the extents that have a cache, in no particular order.
    pub fn extents(&self) -> impl Iterator<Item = f64> + '_ {
        self.caches.keys().map(|extent| extent.get())
    }

    /// Total number of recorded dimensions across every extent.
    pub fn total_entries(&self) -> usize {
        self.caches.values().map(KeyedDimensionCache::len).sum()
    }

    /// Clears every per-extent cache. The caches themselves are kept.
    pub fn invalidate_all(&mut self) {
        tracing::debug!(extents = self.caches.len(), "invalidating all dimension caches");
        for cache in self.caches.values_mut() {
            cache.invalidate_all();
        }
    }
}

impl<K, D, S> core::fmt::Debug for CacheRegistry<K, D, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("extents", &self.caches.len())
            .field("config", &self.config)
            .finish()
    }
}
