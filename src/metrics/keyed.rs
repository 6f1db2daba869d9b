//! Keyed Cache Metrics
//!
//! Write-side counters for a single [`KeyedDimensionCache`](crate::KeyedDimensionCache).
//! Lookups take `&self` and leave no trace here; the container that issues
//! them counts hits and misses in [`ContainerMetrics`](super::ContainerMetrics).

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use super::CacheMetrics;

/// Counters for writes and removals on one keyed cache.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyedCacheMetrics {
    /// Dimensions stored, including overwrites.
    pub recordings: u64,
    /// Stores that replaced an existing entry.
    pub overwrites: u64,
    /// Single-key invalidations that removed an entry.
    pub invalidations: u64,
    /// Calls to `invalidate_all`.
    pub clears: u64,
    /// Entries removed by `invalidate_all`.
    pub cleared_entries: u64,
}

impl KeyedCacheMetrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a store; `replaced` is true when the key already had a value.
    pub fn record_store(&mut self, replaced: bool) {
        self.recordings += 1;
        if replaced {
            self.overwrites += 1;
        }
    }

    /// Records a single-key invalidation that removed an entry.
    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }

    /// Records a full clear of `entries` entries.
    pub fn record_clear(&mut self, entries: usize) {
        self.clears += 1;
        self.cleared_entries += entries as u64;
    }

    /// Converts the counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("cleared_entries".to_string(), self.cleared_entries as f64);
        metrics.insert("clears".to_string(), self.clears as f64);
        metrics.insert("invalidations".to_string(), self.invalidations as f64);
        metrics.insert("overwrites".to_string(), self.overwrites as f64);
        metrics.insert("recordings".to_string(), self.recordings as f64);
        metrics
    }
}

impl CacheMetrics for KeyedCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn component_name(&self) -> &'static str {
        "KeyedDimensionCache"
    }
}
