//! Configuration for a container that caches item dimensions by key.
//!
//! Key-based caching sits in front of self-sizing: the container must measure
//! items from their content, and the layout framework needs a non-zero
//! estimate to lay out items it has not measured yet. Both conditions are
//! checked when caching is switched on, see
//! [`CachingContainer::set_caches_dimensions_by_key_automatically`](crate::CachingContainer::set_caches_dimensions_by_key_automatically).
//!
//! # Examples
//!
//! ```
//! use dimension_cache::config::{ContainerConfig, KeyedCacheConfig};
//! use dimension_cache::{ScrollAxis, Size};
//!
//! // A horizontally scrolling grid whose items are roughly 120pt wide
//! let config = ContainerConfig {
//!     axis: ScrollAxis::Horizontal,
//!     self_sizing: true,
//!     estimated_size: Size::new(120.0, 160.0),
//!     cache: KeyedCacheConfig::default(),
//! };
//! assert_eq!(config.axis, ScrollAxis::Horizontal);
//! ```

use super::KeyedCacheConfig;
use crate::dimension::Size;
use crate::extent::ScrollAxis;
use core::fmt;

/// Configuration for a [`CachingContainer`](crate::CachingContainer).
///
/// # Fields
///
/// - `axis`: Scroll direction. Selects which bound, minus insets, partitions
///   the cache registry.
/// - `self_sizing`: Whether items are measured from their content. Caching by
///   key cannot be enabled without it.
/// - `estimated_size`: The placeholder size used for unmeasured items. Lists
///   that cache a scalar only use the component along `axis`; grids that
///   cache a [`Size`] use both. Every used component must be finite and
///   positive for caching to be enabled.
/// - `cache`: Applied to every per-extent cache the registry creates.
#[derive(Clone, Copy, PartialEq)]
pub struct ContainerConfig {
    /// Scroll direction of the container.
    pub axis: ScrollAxis,
    /// Items are measured from their own content.
    pub self_sizing: bool,
    /// Placeholder size for items that have not been measured.
    pub estimated_size: Size,
    /// Configuration for each per-extent cache.
    pub cache: KeyedCacheConfig,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            axis: ScrollAxis::Vertical,
            self_sizing: true,
            estimated_size: Size::new(320.0, 44.0),
            cache: KeyedCacheConfig::default(),
        }
    }
}

impl fmt::Debug for ContainerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerConfig")
            .field("axis", &self.axis)
            .field("self_sizing", &self.self_sizing)
            .field("estimated_size", &self.estimated_size)
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_config_default() {
        let config = ContainerConfig::default();
        assert_eq!(config.axis, ScrollAxis::Vertical);
        assert!(config.self_sizing);
        assert_eq!(config.estimated_size, Size::new(320.0, 44.0));
        assert_eq!(config.cache.initial_capacity, 0);
    }

    #[test]
    fn test_container_config_creation() {
        let config = ContainerConfig {
            axis: ScrollAxis::Horizontal,
            self_sizing: false,
            estimated_size: Size::ZERO,
            cache: KeyedCacheConfig {
                initial_capacity: 16,
            },
        };
        assert_eq!(config.axis, ScrollAxis::Horizontal);
        assert!(!config.self_sizing);
        assert_eq!(config.cache.initial_capacity, 16);
    }
}
