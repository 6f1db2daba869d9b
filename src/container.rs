//! Container Integration
//!
//! [`CachingContainer`] is the toolkit-neutral model of a scrollable list or
//! grid that caches item dimensions by key. A layout framework drives it
//! through two calls per item:
//!
//! 1. [`dimension_for_item`](CachingContainer::dimension_for_item) while
//!    laying out. A cached dimension is returned directly; otherwise the
//!    container answers [`DimensionRequest::Automatic`] and the framework
//!    runs its normal self-sizing measurement.
//! 2. [`did_display_item`](CachingContainer::did_display_item) once the item
//!    is on screen with its real frame. The measured dimension is recorded
//!    under the item's key in the cache for the current extent.
//!
//! Recording before layout would store the estimate instead of the real size,
//! so the display hook is the only write path.
//!
//! # Keys
//!
//! The owner of the container supplies a [`CacheKeyProvider`] that maps a
//! position to a key describing the item's content. When content changes
//! the key changes with it, the lookup misses and the item is remeasured;
//! the old entry stays behind unused. When an item must be remeasured
//! although its key did not change, call
//! [`invalidate_dimension_for_item`](CachingContainer::invalidate_dimension_for_item)
//! before reloading it; reloading alone would serve the stale value again.
//!
//! # Example
//!
//! ```
//! use dimension_cache::{CachingContainer, DimensionRequest, IndexPath, Size};
//! use dimension_cache::config::ContainerConfig;
//!
//! let lengths = [12usize, 57, 33];
//!
//! let mut list: CachingContainer<usize, f64> = CachingContainer::new(ContainerConfig::default());
//! list.set_bounds(Size::new(375.0, 667.0));
//! list.set_key_provider(move |position: IndexPath| lengths[position.item]);
//! list.set_caches_dimensions_by_key_automatically(true).unwrap();
//!
//! let row = IndexPath::new(0, 1);
//! assert_eq!(list.dimension_for_item(row), DimensionRequest::Automatic);
//!
//! // The framework measured the row and put it on screen
//! list.did_display_item(row, 96.0);
//!
//! assert_eq!(list.dimension_for_item(row), DimensionRequest::Cached(96.0));
//! ```

extern crate alloc;

use crate::config::ContainerConfig;
use crate::dimension::{Dimension, Size};
use crate::error::SetupError;
use crate::extent::{usable_extent, Insets};
use crate::keyed::KeyedDimensionCache;
use crate::metrics::{CacheMetrics, ContainerMetrics};
use crate::registry::CacheRegistry;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Position of an item within a sectioned container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    /// Section index.
    pub section: usize,
    /// Item (row) index within the section.
    pub item: usize,
}

impl IndexPath {
    /// Creates an index path.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.section, self.item)
    }
}

/// Supplies the cache key for the item at a position.
///
/// The key must change exactly when the item's measured dimension would
/// change. Closures `Fn(IndexPath) -> K` implement this trait.
pub trait CacheKeyProvider<K> {
    /// Returns the cache key of the item at `position`.
    fn cache_key(&self, position: IndexPath) -> K;
}

impl<K, F> CacheKeyProvider<K> for F
where
    F: Fn(IndexPath) -> K,
{
    #[inline]
    fn cache_key(&self, position: IndexPath) -> K {
        self(position)
    }
}

/// Answer to a layout query for one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionRequest<D> {
    /// A previously measured dimension; no measurement pass is needed.
    Cached(D),
    /// Measure the item from its content.
    Automatic,
}

impl<D> DimensionRequest<D> {
    /// Returns the cached dimension, if any.
    #[inline]
    pub fn cached(self) -> Option<D> {
        match self {
            DimensionRequest::Cached(dimension) => Some(dimension),
            DimensionRequest::Automatic => None,
        }
    }

    /// Returns `true` if the item has to be measured.
    #[inline]
    pub fn is_automatic(&self) -> bool {
        matches!(self, DimensionRequest::Automatic)
    }
}

/// A scrollable list or grid that caches measured item dimensions by key.
///
/// Each container owns its [`CacheRegistry`] exclusively; two containers
/// never share measurements.
pub struct CachingContainer<K, D, S = DefaultHashBuilder> {
    config: ContainerConfig,
    bounds: Size,
    insets: Insets,
    enabled: bool,
    key_provider: Option<Box<dyn CacheKeyProvider<K>>>,
    registry: CacheRegistry<K, D, S>,
    metrics: ContainerMetrics,
}

impl<K: Hash + Eq, D: Dimension> CachingContainer<K, D, DefaultHashBuilder> {
    /// Creates an unsized container with caching disabled.
    pub fn new(config: ContainerConfig) -> Self {
        Self::with_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, D: Dimension, S: BuildHasher + Clone> CachingContainer<K, D, S> {
    /// Creates an unsized container with caching disabled. Every per-extent
    /// cache uses a clone of `hash_builder`.
    pub fn with_hasher(config: ContainerConfig, hash_builder: S) -> Self {
        CachingContainer {
            config,
            bounds: Size::ZERO,
            insets: Insets::ZERO,
            enabled: false,
            key_provider: None,
            registry: CacheRegistry::with_hasher(config.cache, hash_builder),
            metrics: ContainerMetrics::new(),
        }
    }

    /// Returns the container configuration.
    #[inline]
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Sets the container bounds.
    #[inline]
    pub fn set_bounds(&mut self, bounds: Size) {
        self.bounds = bounds;
    }

    /// Returns the container bounds.
    #[inline]
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Sets the content insets.
    #[inline]
    pub fn set_insets(&mut self, insets: Insets) {
        self.insets = insets;
    }

    /// Returns the content insets.
    #[inline]
    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// Space available to items along the constraining axis: the width minus
    /// horizontal insets for vertical containers, the height minus vertical
    /// insets for horizontal ones.
    #[inline]
    pub fn usable_extent(&self) -> f64 {
        usable_extent(self.bounds, self.insets, self.config.axis)
    }

    /// Registers the provider that maps positions to cache keys, replacing
    /// any earlier one.
    pub fn set_key_provider<P>(&mut self, provider: P)
    where
        P: CacheKeyProvider<K> + 'static,
    {
        self.key_provider = Some(Box::new(provider));
    }

    /// Returns `true` if a key provider is registered.
    #[inline]
    pub fn has_key_provider(&self) -> bool {
        self.key_provider.is_some()
    }

    /// Returns `true` if dimensions are cached by key.
    #[inline]
    pub fn caches_dimensions_by_key_automatically(&self) -> bool {
        self.enabled
    }

    /// Switches caching by key on or off.
    ///
    /// Enabling requires a registered key provider, self-sizing mode, and an
    /// estimated item size that is finite and positive in every component the
    /// container measures. If any of these is missing the
    /// flag stays off and the misconfiguration is returned; it is a setup
    /// mistake, and callers typically `expect` the result where the
    /// container is built. Disabling always succeeds and keeps the recorded
    /// dimensions.
    #[must_use = "a failed enable leaves caching off and every item remeasured"]
    pub fn set_caches_dimensions_by_key_automatically(
        &mut self,
        enabled: bool,
    ) -> Result<(), SetupError> {
        if enabled {
            if let Err(err) = self.check_setup() {
                tracing::error!(error = %err, "cannot cache dimensions by key");
                self.enabled = false;
                return Err(err);
            }
        }
        self.enabled = enabled;
        Ok(())
    }

    fn check_setup(&self) -> Result<(), SetupError> {
        if self.key_provider.is_none() {
            return Err(SetupError::MissingKeyProvider);
        }
        if !self.config.self_sizing {
            return Err(SetupError::SelfSizingDisabled);
        }
        let estimate = self.config.estimated_size;
        if !D::from_estimate(estimate, self.config.axis).is_positive() {
            return Err(SetupError::InvalidEstimatedSize(estimate));
        }
        Ok(())
    }

    /// Answers a layout query for the item at `position`.
    ///
    /// Returns the cached dimension when the current extent's cache holds
    /// one for the item's key. Otherwise, or when caching is off or the
    /// container has no usable extent, returns
    /// [`DimensionRequest::Automatic`].
    pub fn dimension_for_item(&mut self, position: IndexPath) -> DimensionRequest<D> {
        if !self.enabled {
            self.metrics.bypassed += 1;
            return DimensionRequest::Automatic;
        }
        let Some(provider) = self.key_provider.as_deref() else {
            self.metrics.bypassed += 1;
            return DimensionRequest::Automatic;
        };

        let extent = usable_extent(self.bounds, self.insets, self.config.axis);
        let Some(cache) = self.registry.current_cache(extent) else {
            tracing::trace!(extent, "no usable extent; measuring item");
            self.metrics.unavailable += 1;
            self.metrics.core.record_miss();
            return DimensionRequest::Automatic;
        };

        let key = provider.cache_key(position);
        match cache.get_dimension(&key) {
            Some(dimension) => {
                tracing::trace!(%position, extent, "dimension served from cache");
                self.metrics.core.record_hit();
                DimensionRequest::Cached(dimension)
            }
            None => {
                tracing::trace!(%position, extent, "dimension not cached; measuring item");
                self.metrics.core.record_miss();
                DimensionRequest::Automatic
            }
        }
    }

    /// Records the measured dimension of an item that has just been laid
    /// out and displayed.
    ///
    /// Does nothing while caching is off or while the container has no
    /// usable extent.
    pub fn did_display_item(&mut self, position: IndexPath, measured: D) {
        if !self.enabled {
            return;
        }
        let Some(provider) = self.key_provider.as_deref() else {
            return;
        };
        let extent = usable_extent(self.bounds, self.insets, self.config.axis);
        let Some(cache) = self.registry.current_cache(extent) else {
            return;
        };
        let key = provider.cache_key(position);
        cache.cache_dimension(key, measured);
        self.metrics.recordings += 1;
        tracing::trace!(%position, extent, "recorded displayed dimension");
    }

    /// Returns the cache for the current usable extent, creating it if
    /// needed, or `None` when the container is not sized.
    ///
    /// Use it to invalidate entries in response to known data changes.
    pub fn current_cache(&mut self) -> Option<&mut KeyedDimensionCache<K, D, S>> {
        let extent = self.usable_extent();
        self.registry.current_cache(extent)
    }

    /// Returns the registry of all per-extent caches.
    #[inline]
    pub fn registry(&self) -> &CacheRegistry<K, D, S> {
        &self.registry
    }

    /// Forgets the dimension of the item at `position` in the current cache,
    /// so the next layout query measures it again.
    ///
    /// Returns the dimension that was removed. Caches for other extents keep
    /// their entries.
    pub fn invalidate_dimension_for_item(&mut self, position: IndexPath) -> Option<D> {
        let provider = self.key_provider.as_deref()?;
        let extent = usable_extent(self.bounds, self.insets, self.config.axis);
        let cache = self.registry.current_cache(extent)?;
        let key = provider.cache_key(position);
        cache.invalidate_dimension(&key)
    }

    /// Clears the caches of every extent, as needed after a full reload
    /// with new data.
    pub fn invalidate_all_dimensions(&mut self) {
        self.registry.invalidate_all();
    }

    /// Returns the lookup counters of this container.
    #[inline]
    pub fn container_metrics(&self) -> &ContainerMetrics {
        &self.metrics
    }
}

impl<K, D, S> fmt::Debug for CachingContainer<K, D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingContainer")
            .field("config", &self.config)
            .field("bounds", &self.bounds)
            .field("insets", &self.insets)
            .field("enabled", &self.enabled)
            .field("has_key_provider", &self.key_provider.is_some())
            .field("registry", &self.registry)
            .finish()
    }
}

impl<K: Hash + Eq, D: Dimension, S: BuildHasher + Clone> CacheMetrics for CachingContainer<K, D, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn component_name(&self) -> &'static str {
        self.metrics.component_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::ScrollAxis;

    fn vertical_list() -> CachingContainer<u64, f64> {
        let mut list = CachingContainer::new(ContainerConfig::default());
        list.set_bounds(Size::new(375.0, 667.0));
        list
    }

    #[test]
    fn test_enable_requires_key_provider() {
        let mut list = vertical_list();
        assert_eq!(
            list.set_caches_dimensions_by_key_automatically(true),
            Err(SetupError::MissingKeyProvider)
        );
        assert!(!list.caches_dimensions_by_key_automatically());
    }

    #[test]
    fn test_failed_enable_can_be_retried() {
        let mut list = vertical_list();
        let err = list
            .set_caches_dimensions_by_key_automatically(true)
            .unwrap_err();
        assert_eq!(err, SetupError::MissingKeyProvider);
        assert!(list.dimension_for_item(IndexPath::new(0, 0)).is_automatic());

        list.set_key_provider(|position: IndexPath| position.item as u64);
        list.set_caches_dimensions_by_key_automatically(true).unwrap();
        list.did_display_item(IndexPath::new(0, 0), 52.0);
        assert_eq!(
            list.dimension_for_item(IndexPath::new(0, 0)),
            DimensionRequest::Cached(52.0)
        );
    }

    #[test]
    fn test_enable_requires_self_sizing() {
        let mut list: CachingContainer<u64, f64> = CachingContainer::new(ContainerConfig {
            self_sizing: false,
            ..ContainerConfig::default()
        });
        list.set_key_provider(|position: IndexPath| position.item as u64);
        assert_eq!(
            list.set_caches_dimensions_by_key_automatically(true),
            Err(SetupError::SelfSizingDisabled)
        );
    }

    #[test]
    fn test_enable_requires_positive_estimate() {
        let mut list: CachingContainer<u64, f64> = CachingContainer::new(ContainerConfig {
            estimated_size: Size::new(320.0, 0.0),
            ..ContainerConfig::default()
        });
        list.set_key_provider(|position: IndexPath| position.item as u64);
        assert_eq!(
            list.set_caches_dimensions_by_key_automatically(true),
            Err(SetupError::InvalidEstimatedSize(Size::new(320.0, 0.0)))
        );

        // A list only measures along its scroll axis
        let mut list: CachingContainer<u64, f64> = CachingContainer::new(ContainerConfig {
            estimated_size: Size::new(0.0, 44.0),
            ..ContainerConfig::default()
        });
        list.set_key_provider(|position: IndexPath| position.item as u64);
        assert!(list.set_caches_dimensions_by_key_automatically(true).is_ok());
    }

    #[test]
    fn test_grid_estimate_needs_both_axes() {
        let mut grid: CachingContainer<u64, Size> = CachingContainer::new(ContainerConfig {
            estimated_size: Size::new(0.0, 120.0),
            ..ContainerConfig::default()
        });
        grid.set_key_provider(|position: IndexPath| position.item as u64);
        assert_eq!(
            grid.set_caches_dimensions_by_key_automatically(true),
            Err(SetupError::InvalidEstimatedSize(Size::new(0.0, 120.0)))
        );
        assert!(!grid.caches_dimensions_by_key_automatically());
    }

    #[test]
    fn test_disabled_container_always_measures() {
        let mut list = vertical_list();
        list.set_key_provider(|position: IndexPath| position.item as u64);
        list.did_display_item(IndexPath::new(0, 0), 50.0);
        assert!(list.dimension_for_item(IndexPath::new(0, 0)).is_automatic());
        assert_eq!(list.registry().total_entries(), 0);
        assert_eq!(list.container_metrics().bypassed, 1);
        assert_eq!(list.container_metrics().core.requests, 0);
    }

    #[test]
    fn test_hit_after_display() {
        let mut list = vertical_list();
        list.set_key_provider(|position: IndexPath| position.item as u64 * 10);
        list.set_caches_dimensions_by_key_automatically(true).unwrap();

        let row = IndexPath::new(0, 3);
        assert_eq!(list.dimension_for_item(row), DimensionRequest::Automatic);
        list.did_display_item(row, 72.0);
        assert_eq!(list.dimension_for_item(row), DimensionRequest::Cached(72.0));
        assert_eq!(list.current_cache().unwrap().dimension(&30), 72.0);

        let metrics = list.metrics();
        assert_eq!(metrics["requests"], 2.0);
        assert_eq!(metrics["cache_hits"], 1.0);
        assert_eq!(metrics["recordings"], 1.0);
    }

    #[test]
    fn test_unsized_container_is_unavailable() {
        let mut list: CachingContainer<u64, f64> =
            CachingContainer::new(ContainerConfig::default());
        list.set_key_provider(|position: IndexPath| position.item as u64);
        list.set_caches_dimensions_by_key_automatically(true).unwrap();

        assert!(list.dimension_for_item(IndexPath::new(0, 0)).is_automatic());
        list.did_display_item(IndexPath::new(0, 0), 40.0);
        assert!(list.current_cache().is_none());
        assert_eq!(list.container_metrics().unavailable, 1);
        assert_eq!(list.container_metrics().recordings, 0);
    }

    #[test]
    fn test_insets_select_extent() {
        let mut list = vertical_list();
        list.set_key_provider(|_: IndexPath| 1u64);
        list.set_caches_dimensions_by_key_automatically(true).unwrap();

        list.did_display_item(IndexPath::new(0, 0), 60.0);
        list.set_insets(Insets::new(0.0, 20.0, 0.0, 20.0));
        assert_eq!(list.usable_extent(), 335.0);
        assert!(list.dimension_for_item(IndexPath::new(0, 0)).is_automatic());

        list.set_insets(Insets::ZERO);
        assert_eq!(
            list.dimension_for_item(IndexPath::new(0, 0)),
            DimensionRequest::Cached(60.0)
        );
    }

    #[test]
    fn test_horizontal_grid_uses_height() {
        let config = ContainerConfig {
            axis: ScrollAxis::Horizontal,
            estimated_size: Size::new(100.0, 200.0),
            ..ContainerConfig::default()
        };
        let mut grid: CachingContainer<&'static str, Size> = CachingContainer::new(config);
        grid.set_bounds(Size::new(375.0, 200.0));
        grid.set_key_provider(|_: IndexPath| "card");
        grid.set_caches_dimensions_by_key_automatically(true).unwrap();

        grid.did_display_item(IndexPath::new(0, 0), Size::new(140.0, 200.0));
        assert!(grid.registry().cache_for(200.0).is_some());

        // Width changes do not affect a horizontal grid
        grid.set_bounds(Size::new(667.0, 200.0));
        assert_eq!(
            grid.dimension_for_item(IndexPath::new(0, 0)),
            DimensionRequest::Cached(Size::new(140.0, 200.0))
        );
    }

    #[test]
    fn test_invalidate_item_and_all() {
        let mut list = vertical_list();
        list.set_key_provider(|position: IndexPath| position.item as u64);
        list.set_caches_dimensions_by_key_automatically(true).unwrap();

        list.did_display_item(IndexPath::new(0, 1), 30.0);
        list.did_display_item(IndexPath::new(0, 2), 40.0);
        assert_eq!(list.invalidate_dimension_for_item(IndexPath::new(0, 1)), Some(30.0));
        assert_eq!(list.invalidate_dimension_for_item(IndexPath::new(0, 1)), None);
        assert!(list.dimension_for_item(IndexPath::new(0, 1)).is_automatic());

        list.invalidate_all_dimensions();
        assert!(list.dimension_for_item(IndexPath::new(0, 2)).is_automatic());
    }

    #[test]
    fn test_disable_keeps_entries() {
        let mut list = vertical_list();
        list.set_key_provider(|position: IndexPath| position.item as u64);
        list.set_caches_dimensions_by_key_automatically(true).unwrap();
        list.did_display_item(IndexPath::new(0, 0), 30.0);

        list.set_caches_dimensions_by_key_automatically(false).unwrap();
        assert!(list.dimension_for_item(IndexPath::new(0, 0)).is_automatic());

        list.set_caches_dimensions_by_key_automatically(true).unwrap();
        assert_eq!(
            list.dimension_for_item(IndexPath::new(0, 0)),
            DimensionRequest::Cached(30.0)
        );
    }
}
