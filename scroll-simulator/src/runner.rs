//! Simulation runner for dimension caching strategies
//!
//! Every strategy replays the same trace against its own fresh feed and
//! container, so the measurement counts are directly comparable.
//!
//! ## Event Handling
//!
//! | Event     | Container call                                  |
//! |-----------|-------------------------------------------------|
//! | `display` | `dimension_for_item`, measure on miss, `did_display_item` |
//! | `resize`  | `set_bounds` (plus a full clear for `clear-on-resize`) |
//! | `edit`    | none; the content length, and so the key, changes |
//! | `refresh` | `invalidate_dimension_for_item`                 |
//! | `reload`  | `invalidate_all_dimensions`                     |

use std::collections::BTreeMap;
use std::time::Instant;

use ahash::RandomState as AHashRandomState;
use dimension_cache::config::{ContainerConfig, KeyedCacheConfig};
use dimension_cache::{CachingContainer, DimensionRequest, IndexPath, Size};

use crate::feed::Feed;
use crate::input::{TraceParseError, TraceReader};
use crate::models::{SimulationConfig, SimulationResult, Strategy, StrategyStats, TraceEvent};

/// A simulated feed list: content plus the caching container laid over it
type FeedList = CachingContainer<usize, f64, AHashRandomState>;

/// Replays one trace with one strategy
struct StrategyRun {
    strategy: Strategy,
    feed: Feed,
    list: FeedList,
    container_height: f64,
    stats: StrategyStats,
}

impl StrategyRun {
    fn new(strategy: Strategy, items: usize, container_height: f64) -> Self {
        let feed = Feed::new(items);
        let config = ContainerConfig {
            cache: KeyedCacheConfig {
                initial_capacity: items,
            },
            ..ContainerConfig::default()
        };

        let mut list = FeedList::with_hasher(config, AHashRandomState::new());
        list.set_key_provider(feed.key_provider());
        if strategy != Strategy::Uncached {
            if let Err(e) = list.set_caches_dimensions_by_key_automatically(true) {
                tracing::error!(%strategy, error = %e, "falling back to uncached replay");
            }
        }

        Self {
            strategy,
            feed,
            list,
            container_height,
            stats: StrategyStats::new(),
        }
    }

    fn apply(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::Display { item } => self.display(item),
            TraceEvent::Resize { width } => {
                self.stats.resizes += 1;
                self.list.set_bounds(Size::new(width, self.container_height));
                if self.strategy == Strategy::ClearOnResize {
                    self.list.invalidate_all_dimensions();
                }
            }
            TraceEvent::Edit { item, length } => {
                if self.feed.edit(item, length) {
                    self.stats.edits += 1;
                } else {
                    self.skip(item);
                }
            }
            TraceEvent::Refresh { item } => {
                if item < self.feed.len() {
                    self.stats.invalidations += 1;
                    self.list.invalidate_dimension_for_item(IndexPath::new(0, item));
                } else {
                    self.skip(item);
                }
            }
            TraceEvent::Reload => {
                self.stats.invalidations += 1;
                self.list.invalidate_all_dimensions();
            }
        }
    }

    fn display(&mut self, item: usize) {
        if item >= self.feed.len() {
            self.skip(item);
            return;
        }

        let position = IndexPath::new(0, item);
        let height = match self.list.dimension_for_item(position) {
            DimensionRequest::Cached(height) => {
                self.stats.hits += 1;
                height
            }
            DimensionRequest::Automatic => self.feed.measure(item, self.list.usable_extent()),
        };
        self.list.did_display_item(position, height);
        self.stats.displays += 1;
    }

    fn skip(&mut self, item: usize) {
        tracing::warn!(strategy = %self.strategy, item, "trace references an item outside the feed");
        self.stats.skipped += 1;
    }

    fn finish(mut self) -> StrategyStats {
        self.stats.measurements = self.feed.measurements();
        self.stats.extents = self.list.registry().extent_count();
        self.stats.entries = self.list.registry().total_entries();
        self.stats
    }
}

/// Replay a trace with a single strategy
pub fn replay(
    strategy: Strategy,
    events: &[TraceEvent],
    items: usize,
    container_height: f64,
) -> StrategyStats {
    let start = Instant::now();
    let mut run = StrategyRun::new(strategy, items, container_height);
    for &event in events {
        run.apply(event);
    }
    let mut stats = run.finish();
    stats.elapsed = start.elapsed();

    tracing::debug!(
        %strategy,
        displays = stats.displays,
        hits = stats.hits,
        measurements = stats.measurements,
        "strategy replay finished"
    );
    stats
}

/// Runs every configured strategy over the traces in the input directory
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    /// Create a new runner
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Run the simulation
    pub fn run(&self) -> Result<SimulationResult, TraceParseError> {
        let start = Instant::now();
        let reader = TraceReader::new(&self.config.input_dir);
        let (events, trace_files) = reader.parse_all_files()?;

        if trace_files == 0 {
            tracing::warn!(dir = %self.config.input_dir.display(), "no trace files found");
        }
        println!(
            "Loaded {} events from {} trace file(s)",
            events.len(),
            trace_files
        );

        let mut stats = BTreeMap::new();
        for &strategy in &self.config.strategies {
            println!("Replaying with strategy: {strategy}");
            let result = replay(
                strategy,
                &events,
                self.config.items,
                self.config.container_height,
            );
            stats.insert(strategy, result);
        }

        Ok(SimulationResult {
            stats,
            total_events: events.len(),
            trace_files,
            duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{LINE_HEIGHT, PADDING};

    const HEIGHT: f64 = 812.0;

    fn scroll_down_and_back(items: usize) -> Vec<TraceEvent> {
        let mut events = vec![TraceEvent::Resize { width: 375.0 }];
        events.extend((0..items).map(|item| TraceEvent::Display { item }));
        events.extend((0..items).rev().map(|item| TraceEvent::Display { item }));
        events
    }

    fn rotations(times: usize) -> Vec<TraceEvent> {
        let mut events = Vec::new();
        for _ in 0..times {
            events.push(TraceEvent::Resize { width: 375.0 });
            events.extend((0..10).map(|item| TraceEvent::Display { item }));
            events.push(TraceEvent::Resize { width: 812.0 });
            events.extend((0..10).map(|item| TraceEvent::Display { item }));
        }
        events
    }

    #[test]
    fn test_uncached_measures_every_display() {
        let events = scroll_down_and_back(20);
        let stats = replay(Strategy::Uncached, &events, 20, HEIGHT);
        assert_eq!(stats.displays, 40);
        assert_eq!(stats.measurements, 40);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.entries, 0);
    }

    #[test]
    fn test_cached_scroll_back_measures_nothing_new() {
        let events = scroll_down_and_back(20);
        let stats = replay(Strategy::PerExtent, &events, 20, HEIGHT);
        assert_eq!(stats.displays, 40);
        assert_eq!(stats.measurements, 20);
        assert_eq!(stats.hits, 20);
        assert_eq!(stats.measurements_saved(), stats.hits);
    }

    #[test]
    fn test_per_extent_beats_clear_on_resize() {
        let events = rotations(5);
        let per_extent = replay(Strategy::PerExtent, &events, 10, HEIGHT);
        let clear = replay(Strategy::ClearOnResize, &events, 10, HEIGHT);

        assert_eq!(per_extent.extents, 2);
        assert_eq!(per_extent.measurements, 20);
        assert_eq!(clear.measurements, 100);
        assert!(per_extent.hit_rate() > clear.hit_rate());
    }

    #[test]
    fn test_edit_and_refresh_force_measurement() {
        let feed = Feed::new(5);
        let length = feed.length(2).unwrap();
        let events = vec![
            TraceEvent::Resize { width: 375.0 },
            TraceEvent::Display { item: 2 },
            TraceEvent::Display { item: 2 },
            TraceEvent::Edit {
                item: 2,
                length: length + 200,
            },
            TraceEvent::Display { item: 2 },
            TraceEvent::Refresh { item: 2 },
            TraceEvent::Display { item: 2 },
            TraceEvent::Reload,
            TraceEvent::Display { item: 2 },
        ];
        let stats = replay(Strategy::PerExtent, &events, 5, HEIGHT);
        assert_eq!(stats.displays, 5);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.measurements, 4);
        assert_eq!(stats.edits, 1);
        assert_eq!(stats.invalidations, 2);
    }

    #[test]
    fn test_out_of_range_events_are_skipped() {
        let events = vec![
            TraceEvent::Resize { width: 375.0 },
            TraceEvent::Display { item: 99 },
            TraceEvent::Edit { item: 99, length: 3 },
            TraceEvent::Refresh { item: 99 },
        ];
        let stats = replay(Strategy::PerExtent, &events, 5, HEIGHT);
        assert_eq!(stats.skipped, 3);
        assert_eq!(stats.displays, 0);
    }

    #[test]
    fn test_unsized_list_still_displays() {
        let events = vec![TraceEvent::Display { item: 0 }, TraceEvent::Display { item: 0 }];
        let stats = replay(Strategy::PerExtent, &events, 1, HEIGHT);
        assert_eq!(stats.measurements, 2);
        assert_eq!(stats.extents, 0);

        let feed = Feed::with_lengths(vec![3]);
        assert_eq!(feed.measure(0, 0.0), 3.0 * LINE_HEIGHT + PADDING);
    }
}
