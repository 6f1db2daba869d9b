//! Cache Metrics System
//!
//! Provides a small metrics system for the dimension caches using
//! BTreeMap-based reporting. The keyed cache tracks what was written and
//! removed; the container tracks how often layout queries were answered from
//! the cache instead of falling back to self-sizing.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap keeps metric names in a stable, sorted order, so reports and CSV
//! exports from the simulator line up between runs and are easy to diff.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod container;
pub mod keyed;

pub use container::ContainerMetrics;
pub use keyed::KeyedCacheMetrics;

/// Lookup counters shared by every component that answers layout queries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of dimension lookups.
    pub requests: u64,

    /// Lookups answered from the cache.
    pub cache_hits: u64,
}

impl CoreCacheMetrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that was served from the cache.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that fell back to self-sizing.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Lookups that were not served from the cache.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups served from the cache, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that fell back to self-sizing, or 0.0 before any
    /// lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());
        metrics
    }
}

/// Uniform metrics reporting for the caches and containers in this crate.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name identifying the component, e.g. `"KeyedDimensionCache"`.
    fn component_name(&self) -> &'static str;
}
