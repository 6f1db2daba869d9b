// Statistics reporting for scroll simulation

use crate::models::{CsvResultRow, SimulationResult, Strategy, StrategyStats};
use std::collections::BTreeMap;
use std::path::Path;

/// Reports the per-strategy statistics of a simulation run
pub struct SimulationStats {
    stats: BTreeMap<Strategy, StrategyStats>,
    total_events: usize,
}

impl SimulationStats {
    /// Create SimulationStats from a SimulationResult
    pub fn from_result(result: &SimulationResult) -> Self {
        Self {
            stats: result.stats.clone(),
            total_events: result.total_events,
        }
    }

    /// Build the CSV rows, one per strategy in a stable order
    pub fn rows(&self) -> Vec<CsvResultRow> {
        self.stats
            .iter()
            .map(|(strategy, stats)| CsvResultRow {
                strategy: strategy.as_str().to_string(),
                displays: stats.displays,
                hits: stats.hits,
                measurements: stats.measurements,
                measurements_saved: stats.measurements_saved(),
                hit_rate: stats.hit_rate(),
                resizes: stats.resizes,
                edits: stats.edits,
                invalidations: stats.invalidations,
                skipped: stats.skipped,
                extents: stats.extents,
                entries: stats.entries,
                elapsed_us: stats.elapsed.as_micros(),
            })
            .collect()
    }

    /// Print a summary report of the simulation results
    pub fn print_summary(&self) {
        println!("\nScroll Simulation Summary");
        println!("=========================");
        println!("Events per strategy: {}", self.total_events);

        println!("\nResults by Strategy:");
        println!(
            "{:<16} {:>9} {:>9} {:>12} {:>8} {:>8} {:>8} {:>10}",
            "Strategy", "Displays", "Hits", "Measurements", "HitRate", "Extents", "Entries", "Elapsed"
        );
        println!("{}", "-".repeat(88));

        for row in self.rows() {
            println!(
                "{:<16} {:>9} {:>9} {:>12} {:>7.2}% {:>8} {:>8} {:>8}us",
                row.strategy,
                row.displays,
                row.hits,
                row.measurements,
                row.hit_rate,
                row.extents,
                row.entries,
                row.elapsed_us
            );
        }

        if let (Some(cached), Some(uncached)) = (
            self.stats.get(&Strategy::PerExtent),
            self.stats.get(&Strategy::Uncached),
        ) {
            let avoided = uncached.measurements.saturating_sub(cached.measurements);
            println!(
                "\nPer-extent caching avoided {avoided} of {} measurements",
                uncached.measurements
            );
        }
    }

    /// Export results to a CSV file
    pub fn export_csv(&self, path: &Path) -> Result<(), std::io::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in self.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn result() -> SimulationResult {
        let mut stats = BTreeMap::new();
        stats.insert(
            Strategy::Uncached,
            StrategyStats {
                displays: 100,
                measurements: 100,
                ..StrategyStats::new()
            },
        );
        stats.insert(
            Strategy::PerExtent,
            StrategyStats {
                displays: 100,
                hits: 80,
                measurements: 20,
                extents: 2,
                entries: 20,
                ..StrategyStats::new()
            },
        );
        SimulationResult {
            stats,
            total_events: 104,
            trace_files: 1,
            duration: Duration::from_millis(3),
        }
    }

    #[test]
    fn test_rows_follow_strategy_order() {
        let rows = SimulationStats::from_result(&result()).rows();
        let names: Vec<_> = rows.iter().map(|r| r.strategy.as_str()).collect();
        assert_eq!(names, vec!["per-extent", "uncached"]);
        assert_eq!(rows[0].measurements_saved, 80);
        assert_eq!(rows[0].hit_rate, 80.0);
    }

    #[test]
    fn test_export_csv() {
        let dir = std::env::temp_dir().join("scroll_stats_test_export");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("results.csv");

        SimulationStats::from_result(&result())
            .export_csv(&path)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("strategy,displays,hits,measurements"));
        assert!(lines.next().unwrap().starts_with("per-extent,100,80,20,80,"));
        assert!(lines.next().unwrap().starts_with("uncached,100,0,100,0,"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
