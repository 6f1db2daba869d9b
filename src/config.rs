//! Cache Configuration Module
//!
//! Configuration structures for the keyed dimension cache and for the
//! container that drives it. Configuration is an explicit value handed to
//! each constructor; nothing in this crate reads process-wide settings.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **Sensible defaults**: `Default` gives a working vertical list setup
//!
//! # Configs
//!
//! | Config | Used by | Description |
//! |--------|---------|-------------|
//! | `KeyedCacheConfig` | [`KeyedDimensionCache`](crate::KeyedDimensionCache) | Map sizing for one per-extent cache |
//! | `ContainerConfig` | [`CachingContainer`](crate::CachingContainer) | Scroll axis, self-sizing mode, estimated item size |
//!
//! # Examples
//!
//! ```
//! use dimension_cache::config::{ContainerConfig, KeyedCacheConfig};
//! use dimension_cache::{ScrollAxis, Size};
//!
//! let config = ContainerConfig {
//!     axis: ScrollAxis::Vertical,
//!     self_sizing: true,
//!     estimated_size: Size::new(320.0, 44.0),
//!     cache: KeyedCacheConfig { initial_capacity: 64 },
//! };
//! assert!(config.self_sizing);
//! ```

pub mod container;
pub mod keyed;

pub use container::ContainerConfig;
pub use keyed::KeyedCacheConfig;
