// Data models for scroll simulation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// One step of a scroll trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceEvent {
    /// The item scrolled on screen and was laid out
    Display { item: usize },
    /// The container was resized to a new width (device rotation)
    Resize { width: f64 },
    /// The item's content changed to a new length
    Edit { item: usize, length: usize },
    /// The owner asked for one item to be remeasured
    Refresh { item: usize },
    /// The whole list was reloaded with new data
    Reload,
}

/// Raw CSV row of a trace file: `action,position,value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub action: String,
    pub position: Option<usize>,
    pub value: Option<f64>,
}

impl From<TraceEvent> for TraceRecord {
    fn from(event: TraceEvent) -> Self {
        let (action, position, value) = match event {
            TraceEvent::Display { item } => ("display", Some(item), None),
            TraceEvent::Resize { width } => ("resize", None, Some(width)),
            TraceEvent::Edit { item, length } => ("edit", Some(item), Some(length as f64)),
            TraceEvent::Refresh { item } => ("refresh", Some(item), None),
            TraceEvent::Reload => ("reload", None, None),
        };
        Self {
            action: action.to_string(),
            position,
            value,
        }
    }
}

impl TryFrom<TraceRecord> for TraceEvent {
    type Error = String;

    fn try_from(record: TraceRecord) -> Result<Self, Self::Error> {
        let position = || {
            record
                .position
                .ok_or_else(|| format!("'{}' requires a position", record.action))
        };
        let value = || {
            record
                .value
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(|| format!("'{}' requires a non-negative value", record.action))
        };

        match record.action.trim().to_lowercase().as_str() {
            "display" => Ok(TraceEvent::Display { item: position()? }),
            "resize" => Ok(TraceEvent::Resize { width: value()? }),
            "edit" => {
                let item = position()?;
                let length = value()?;
                if length.fract() != 0.0 || length >= usize::MAX as f64 {
                    return Err(format!(
                        "'{}' requires a non-negative value that is a whole length",
                        record.action
                    ));
                }
                Ok(TraceEvent::Edit {
                    item,
                    length: length as usize,
                })
            }
            "refresh" => Ok(TraceEvent::Refresh { item: position()? }),
            "reload" => Ok(TraceEvent::Reload),
            other => Err(format!("unknown action '{other}'")),
        }
    }
}

/// Caching strategies compared by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    /// One cache per layout extent; resizing back reuses measurements
    PerExtent,
    /// Caching by key, but every resize throws all measurements away
    ClearOnResize,
    /// Caching off; every display measures
    Uncached,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::PerExtent => "per-extent",
            Strategy::ClearOnResize => "clear-on-resize",
            Strategy::Uncached => "uncached",
        }
    }

    /// Get all available strategies
    pub fn all() -> Vec<Strategy> {
        vec![
            Strategy::PerExtent,
            Strategy::ClearOnResize,
            Strategy::Uncached,
        ]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-extent" | "extent" => Ok(Strategy::PerExtent),
            "clear-on-resize" | "clear" => Ok(Strategy::ClearOnResize),
            "uncached" | "none" => Ok(Strategy::Uncached),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Directory containing trace files
    pub input_dir: PathBuf,
    /// Strategies to simulate
    pub strategies: Vec<Strategy>,
    /// Number of items in the simulated feed
    pub items: usize,
    /// Container height; only the width changes on resize
    pub container_height: f64,
}

/// Results of a simulation run
#[derive(Debug)]
pub struct SimulationResult {
    /// Statistics for each strategy
    pub stats: BTreeMap<Strategy, StrategyStats>,
    /// Total number of trace events replayed per strategy
    pub total_events: usize,
    /// Number of trace files read
    pub trace_files: usize,
    /// Wall time of the whole simulation
    pub duration: Duration,
}

/// Statistics for a single strategy
#[derive(Debug, Default, Clone)]
pub struct StrategyStats {
    /// Items laid out and displayed
    pub displays: u64,
    /// Displays answered from the cache
    pub hits: u64,
    /// Self-sizing measurement passes
    pub measurements: u64,
    /// Resize events
    pub resizes: u64,
    /// Content edits
    pub edits: u64,
    /// Single-item and full invalidations
    pub invalidations: u64,
    /// Events that referenced items outside the feed
    pub skipped: u64,
    /// Distinct extents with a cache at the end of the run
    pub extents: usize,
    /// Cached entries across all extents at the end of the run
    pub entries: usize,
    /// Time spent replaying the trace
    pub elapsed: Duration,
}

impl StrategyStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        if self.displays > 0 {
            (self.hits as f64 / self.displays as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Measurements avoided relative to measuring every display
    pub fn measurements_saved(&self) -> u64 {
        self.displays.saturating_sub(self.measurements)
    }
}

/// CSV export row for simulation results
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub strategy: String,
    pub displays: u64,
    pub hits: u64,
    pub measurements: u64,
    pub measurements_saved: u64,
    pub hit_rate: f64,
    pub resizes: u64,
    pub edits: u64,
    pub invalidations: u64,
    pub skipped: u64,
    pub extents: usize,
    pub entries: usize,
    pub elapsed_us: u128,
}
