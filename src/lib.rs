#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How the Pieces Fit
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │  CachingContainer (one per list / grid)                            │
//! │                                                                    │
//! │   layout query ──▶ key provider ──▶ CacheRegistry ──▶ cache hit?   │
//! │                                      │                  │    │     │
//! │                          usable extent                 yes   no    │
//! │                                      ▼                  │    │     │
//! │                          KeyedDimensionCache   Cached(d) Automatic │
//! │                                      ▲                             │
//! │   did display ───────────────────────┘  (record real size)         │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Keyed Cache
//!
//! ```rust
//! use dimension_cache::KeyedDimensionCache;
//!
//! let mut heights: KeyedDimensionCache<u64, f64> = KeyedDimensionCache::new();
//! heights.cache_dimension(57, 132.0);
//! assert!(heights.exists_dimension(&57));
//! assert_eq!(heights.dimension(&61), 0.0); // unmeasured
//! ```
//!
//! ## Per-Extent Registry
//!
//! ```rust
//! use dimension_cache::{CacheRegistry, Size};
//!
//! let mut sizes: CacheRegistry<&str, Size> = CacheRegistry::new();
//! sizes.current_cache(320.0).unwrap().cache_dimension("tile", Size::new(100.0, 100.0));
//! assert!(sizes.cache_for(414.0).is_none());
//! ```
//!
//! ## Modules
//!
//! - [`dimension`]: The [`Dimension`] trait and [`Size`]
//! - [`extent`]: Scroll axis, insets and hashable layout extents
//! - [`keyed`]: The keyed dimension cache
//! - [`registry`]: One keyed cache per layout extent
//! - [`container`]: Container integration contract
//! - [`config`]: Configuration structures
//! - [`metrics`]: Metrics reporting
//! - [`error`]: Setup errors

#![no_std]

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

extern crate alloc;

/// Measured dimensions.
///
/// Provides the [`Dimension`] trait implemented by scalar heights and by the
/// 2D [`Size`] used for grid items.
pub mod dimension;

/// Layout extents.
///
/// Converts container bounds and insets into the usable extent that
/// partitions the cache registry.
pub mod extent;

/// Cache configuration structures.
pub mod config;

/// Keyed dimension cache.
///
/// A map from opaque keys to measured dimensions, with no eviction.
pub mod keyed;

/// Per-extent cache registry.
///
/// Keeps one keyed cache per distinct layout extent so resizing between known
/// extents reuses earlier measurements.
pub mod registry;

/// Container integration.
///
/// Connects the registry to a list or grid through a key provider, a layout
/// query and a display hook.
pub mod container;

/// Cache metrics system.
pub mod metrics;

/// Setup errors.
pub mod error;

pub use container::{CacheKeyProvider, CachingContainer, DimensionRequest, IndexPath};
pub use dimension::{Dimension, Size};
pub use error::SetupError;
pub use extent::{Insets, LayoutExtent, ScrollAxis};
pub use keyed::{HeightKeyCache, KeyedDimensionCache, SizeKeyCache};
pub use registry::CacheRegistry;
