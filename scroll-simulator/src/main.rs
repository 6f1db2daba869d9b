use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use scroll_simulator::generator::{TraceConfig, TraceGenerator};
use scroll_simulator::models::{SimulationConfig, Strategy};
use scroll_simulator::runner::SimulationRunner;
use scroll_simulator::stats::SimulationStats;

/// Dimension cache scroll simulator CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay scroll traces with each caching strategy
    Simulate {
        /// Directory containing trace files (*.csv)
        #[arg(short, long, value_name = "DIR", default_value = "scroll_traces")]
        input_dir: PathBuf,

        /// Strategies to simulate (per-extent, clear-on-resize, uncached)
        /// If not provided, all strategies will be used
        #[arg(short, long, value_name = "STRATEGIES", num_args = 1.., value_delimiter = ',')]
        strategies: Option<Vec<String>>,

        /// Number of items in the simulated feed
        #[arg(long, default_value = "200")]
        items: usize,

        /// Container height in points; resize events only change the width
        #[arg(long, default_value = "812")]
        height: f64,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },

    /// Generate a random scroll trace
    Generate {
        /// Number of events
        #[arg(long, default_value = "10000")]
        events: usize,

        /// Number of items in the feed
        #[arg(long, default_value = "200")]
        items: usize,

        /// Container widths to rotate between
        #[arg(long, value_delimiter = ',', default_values_t = [375.0, 812.0])]
        widths: Vec<f64>,

        /// Percentage of events that resize the container
        #[arg(long, default_value = "2")]
        resize_percent: u8,

        /// Percentage of events that edit an item
        #[arg(long, default_value = "3")]
        edit_percent: u8,

        /// Percentage of events that refresh an item or reload the list
        #[arg(long, default_value = "1")]
        invalidate_percent: u8,

        /// Seed for a reproducible trace
        #[arg(long)]
        seed: Option<u64>,

        /// Output directory
        #[arg(short, long, default_value = "scroll_traces")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Generate {
            events,
            items,
            widths,
            resize_percent,
            edit_percent,
            invalidate_percent,
            seed,
            output,
        } => {
            let config = TraceConfig {
                events,
                items,
                widths,
                resize_percent,
                edit_percent,
                invalidate_percent,
                seed,
                output_dir: output,
            };
            let path = TraceGenerator::new(config).generate()?;
            println!("Wrote {}", path.display());
            Ok(())
        }

        Commands::Simulate {
            input_dir,
            strategies,
            items,
            height,
            output_csv,
        } => run_simulator(input_dir, strategies, items, height, output_csv),
    }
}

/// Parse strategy names, skipping unknown ones
fn parse_strategies(names: Option<Vec<String>>) -> Vec<Strategy> {
    let Some(names) = names.filter(|n| !n.is_empty()) else {
        return Strategy::all();
    };

    let mut selected = Vec::new();
    for name in names {
        match name.parse::<Strategy>() {
            Ok(strategy) if !selected.contains(&strategy) => selected.push(strategy),
            Ok(_) => {}
            Err(e) => println!("Warning: {e}, skipping"),
        }
    }
    if selected.is_empty() {
        println!("No valid strategies selected, using all available strategies");
        return Strategy::all();
    }
    selected
}

/// Run the simulator with the given parameters
fn run_simulator(
    input_dir: PathBuf,
    strategies: Option<Vec<String>>,
    items: usize,
    height: f64,
    output_csv: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let strategies = parse_strategies(strategies);

    println!("Scroll Simulation");
    println!("=================");
    println!("Input directory: {}", input_dir.display());
    println!("Feed items: {items}");
    println!("Container height: {height}");
    println!(
        "Strategies: {:?}",
        strategies.iter().map(|s| s.as_str()).collect::<Vec<_>>()
    );
    println!();

    let config = SimulationConfig {
        input_dir,
        strategies,
        items,
        container_height: height,
    };

    let result = match SimulationRunner::new(config).run() {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error running simulation: {e}");
            return Err(e.into());
        }
    };

    println!("\nSimulation completed in {:.2?}", result.duration);
    println!("Trace files: {}", result.trace_files);

    let stats = SimulationStats::from_result(&result);
    stats.print_summary();

    // Export to CSV if requested
    if let Some(csv_path) = output_csv {
        match stats.export_csv(&csv_path) {
            Ok(()) => println!("\nResults exported to: {}", csv_path.display()),
            Err(e) => eprintln!("Failed to export CSV: {e}"),
        }
    }

    Ok(())
}
