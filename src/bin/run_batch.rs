//! Run every scenario in a CSV file (or the built-in library) in parallel
//!
//! Usage: run_batch [SCENARIOS_CSV]
//! Defaults to scenarios.csv when present. Writes per-scenario return metrics
//! to batch_scenario_output.csv

use anyhow::{Context, Result};
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;
use underwriting_system::deal::loader::DEFAULT_SCENARIOS_PATH;
use underwriting_system::deal::load_scenarios;
use underwriting_system::report::write_batch_csv;
use underwriting_system::{ScenarioLibrary, ScenarioRunner};

const OUTPUT_PATH: &str = "batch_scenario_output.csv";

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();

    let path = env::args()
        .nth(1)
        .or_else(|| Path::new(DEFAULT_SCENARIOS_PATH).exists().then(|| DEFAULT_SCENARIOS_PATH.to_string()));

    let library = match path {
        Some(path) => {
            println!("Loading scenarios from {}...", path);
            let scenarios = load_scenarios(&path)
                .with_context(|| format!("Failed to load scenarios from {}", path))?;
            ScenarioLibrary::from_scenarios(scenarios)
        }
        None => {
            println!("No scenario file found, using the built-in library");
            ScenarioLibrary::with_presets()
        }
    };
    println!("Loaded {} scenarios in {:?}", library.len(), start.elapsed());

    let runner = ScenarioRunner::new();
    let outcomes = runner.run_batch(library.as_slice());

    let file = File::create(OUTPUT_PATH).context("Failed to create output file")?;
    write_batch_csv(BufWriter::new(file), &outcomes)?;
    println!("Output written to {}", OUTPUT_PATH);

    println!("\nBatch Summary:");
    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => {
                let s = &result.summary;
                println!(
                    "  {:<28} IRR={:>7.2}%  Multiple={:.2}x  Profit=${:.2}M",
                    outcome.name,
                    s.estimated_irr,
                    s.equity_multiple,
                    s.total_profit / 1_000_000.0
                );
            }
            Err(e) => println!("  {:<28} skipped: {}", outcome.name, e),
        }
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
