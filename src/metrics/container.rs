//! Container Metrics
//!
//! Lookup counters for a [`CachingContainer`](crate::CachingContainer). A miss
//! is any query answered with the self-sizing sentinel while caching is
//! enabled; misses caused by a degenerate extent are also counted separately.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use super::{CacheMetrics, CoreCacheMetrics};

/// Metrics for a container that caches item dimensions by key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContainerMetrics {
    /// Hit/miss counters for queries made while caching was enabled.
    pub core: CoreCacheMetrics,
    /// Misses caused by a zero, negative or non-finite usable extent.
    pub unavailable: u64,
    /// Queries made while caching was disabled.
    pub bypassed: u64,
    /// Measured dimensions recorded after display.
    pub recordings: u64,
}

impl ContainerMetrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts the counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("bypassed".to_string(), self.bypassed as f64);
        metrics.insert("recordings".to_string(), self.recordings as f64);
        metrics.insert("unavailable".to_string(), self.unavailable as f64);
        metrics
    }
}

impl CacheMetrics for ContainerMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn component_name(&self) -> &'static str {
        "CachingContainer"
    }
}
