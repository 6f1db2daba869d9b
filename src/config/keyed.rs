//! Configuration for a single keyed dimension cache.
//!
//! The cache has no capacity limit and never evicts, so the only knob is how
//! much room the underlying map reserves up front. A list that shows a few
//! dozen distinct layouts at once can avoid rehashing during its first
//! layout pass by reserving that many slots.
//!
//! # Examples
//!
//! ```
//! use dimension_cache::config::KeyedCacheConfig;
//! use dimension_cache::KeyedDimensionCache;
//!
//! let config = KeyedCacheConfig { initial_capacity: 32 };
//! let cache: KeyedDimensionCache<u64, f64> = KeyedDimensionCache::init(config, None);
//! assert!(cache.is_empty());
//! ```

use core::fmt;

/// Configuration for a [`KeyedDimensionCache`](crate::KeyedDimensionCache).
///
/// # Fields
///
/// - `initial_capacity`: Number of entries to reserve when the cache is
///   created. The cache grows past it without limit.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyedCacheConfig {
    /// Entries reserved up front. Not an upper bound.
    pub initial_capacity: usize,
}

impl fmt::Debug for KeyedCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedCacheConfig")
            .field("initial_capacity", &self.initial_capacity)
            .finish()
    }
}
