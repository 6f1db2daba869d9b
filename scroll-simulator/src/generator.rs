// Random scroll trace generation

use crate::models::{TraceEvent, TraceRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;

/// Number of rows visible on screen at once
const VISIBLE_ROWS: usize = 8;

/// Parameters for generating random scroll traces
#[derive(Debug, Clone)]
pub struct TraceConfig {
    /// Number of events to generate
    pub events: usize,
    /// Number of items in the feed
    pub items: usize,
    /// Container widths to rotate between; the first is the initial width
    pub widths: Vec<f64>,
    /// Percentage of events that resize the container
    pub resize_percent: u8,
    /// Percentage of events that edit an item
    pub edit_percent: u8,
    /// Percentage of events that refresh or reload
    pub invalidate_percent: u8,
    /// Seed for reproducible traces; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Output directory
    pub output_dir: PathBuf,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            events: 10_000,
            items: 200,
            widths: vec![375.0, 812.0],
            resize_percent: 2,
            edit_percent: 3,
            invalidate_percent: 1,
            seed: None,
            output_dir: PathBuf::from("scroll_traces"),
        }
    }
}

/// Generator for random scroll traces
///
/// Models a user scrolling a feed: the viewport drifts up and down, every
/// visible row is displayed, and occasionally the device rotates, a post is
/// edited or the list is refreshed.
pub struct TraceGenerator {
    config: TraceConfig,
}

impl TraceGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: TraceConfig) -> Self {
        Self { config }
    }

    /// Generate the events of one trace
    pub fn events(&self) -> Vec<TraceEvent> {
        let config = &self.config;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut events = Vec::with_capacity(config.events);
        if config.events == 0 || config.items == 0 {
            return events;
        }

        let first_width = config.widths.first().copied().unwrap_or(375.0);
        events.push(TraceEvent::Resize { width: first_width });

        let max_top = config.items.saturating_sub(VISIBLE_ROWS);
        let mut top = 0usize;
        let mut row = 0usize;

        while events.len() < config.events {
            let roll: u8 = rng.gen_range(0..100);
            // A single width leaves nothing to rotate to
            let resize_until = if config.widths.len() > 1 {
                config.resize_percent
            } else {
                0
            };
            let edit_until = resize_until.saturating_add(config.edit_percent);
            let invalidate_until = edit_until.saturating_add(config.invalidate_percent);

            let event = if roll < resize_until {
                let width = config.widths[rng.gen_range(0..config.widths.len())];
                TraceEvent::Resize { width }
            } else if roll < edit_until {
                TraceEvent::Edit {
                    item: rng.gen_range(0..config.items),
                    length: rng.gen_range(10..200),
                }
            } else if roll < invalidate_until {
                if rng.gen_bool(0.8) {
                    TraceEvent::Refresh {
                        item: rng.gen_range(0..config.items),
                    }
                } else {
                    TraceEvent::Reload
                }
            } else {
                // Show the next visible row; once the screen is filled,
                // scroll by a few rows in either direction
                if row == VISIBLE_ROWS {
                    row = 0;
                    let delta: i64 = rng.gen_range(-3..=4);
                    top = (top as i64 + delta).clamp(0, max_top as i64) as usize;
                }
                let item = (top + row).min(config.items - 1);
                row += 1;
                TraceEvent::Display { item }
            };
            events.push(event);
        }

        events
    }

    /// Generate a trace and write it to `scroll_trace.csv` in the output
    /// directory, returning the file path
    pub fn generate(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        // Ensure output directory exists
        fs::create_dir_all(&self.config.output_dir)?;

        println!("Generating scroll trace with the following parameters:");
        println!("  Events: {}", self.config.events);
        println!("  Items: {}", self.config.items);
        println!("  Widths: {:?}", self.config.widths);
        if let Some(seed) = self.config.seed {
            println!("  Seed: {seed}");
        }
        println!("  Output directory: {}", self.config.output_dir.display());

        let path = self.config.output_dir.join("scroll_trace.csv");
        let mut writer = csv::Writer::from_path(&path)?;
        let events = self.events();
        for event in &events {
            writer.serialize(TraceRecord::from(*event))?;
        }
        writer.flush()?;

        tracing::info!(file = %path.display(), events = events.len(), "wrote scroll trace");
        println!("Scroll trace generation complete");
        Ok(path)
    }
}
