//! Run projections for every person in a batch CSV
//!
//! Outputs one summary row per input row; failed rows carry the error

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use pension_projection::assumptions::PrognosisVariant;
use pension_projection::career::load_batch;
use pension_projection::{EngineConfig, ScenarioRunner};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "project-batch", about = "Project pensions for a batch of people")]
struct Args {
    /// Batch CSV, one person per row
    input: PathBuf,

    /// Summary CSV to write
    #[arg(long, default_value = "batch_projection_output.csv")]
    output: PathBuf,

    /// Directory of table CSV files
    #[arg(long, default_value = "data/tables")]
    tables: PathBuf,

    #[arg(long, value_enum, default_value = "moderate")]
    prognosis: PrognosisVariant,

    /// Year the inputs describe, defaults to this year
    #[arg(long)]
    current_year: Option<i32>,
}

#[derive(Debug, Default, Serialize)]
struct SummaryRow {
    row: usize,
    retirement_age: Option<u32>,
    retirement_year: Option<i32>,
    total_capital: Option<f64>,
    total_contributions: Option<f64>,
    nominal_pension: Option<f64>,
    real_pension: Option<f64>,
    replacement_rate: Option<f64>,
    years_needed: Option<u32>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading batch from {}...", args.input.display());
    let batch = load_batch(&args.input).with_context(|| format!("Failed to load {}", args.input.display()))?;
    println!("Loaded {} rows in {:?}", batch.len(), start.elapsed());

    let config = args.current_year.map(EngineConfig::for_year).unwrap_or_default();
    let runner = ScenarioRunner::from_csv_path(&args.tables, args.prognosis, config)
        .with_context(|| format!("Failed to load tables from {}", args.tables.display()))?;

    println!("Running projections...");
    let proj_start = Instant::now();
    let results = runner.run_batch(&batch);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut failures = 0;

    for (row, result) in results.iter().enumerate() {
        let summary = match result {
            Ok(results) => {
                let summary = results.summary();
                SummaryRow {
                    row: row + 1,
                    retirement_age: Some(summary.retirement_age),
                    retirement_year: Some(summary.retirement_year),
                    total_capital: Some(summary.total_capital),
                    total_contributions: Some(summary.total_contributions),
                    nominal_pension: Some(summary.nominal_pension),
                    real_pension: Some(summary.real_pension),
                    replacement_rate: summary.replacement_rate,
                    years_needed: summary.years_needed,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Row {} failed: {}", row + 1, e);
                failures += 1;
                SummaryRow {
                    row: row + 1,
                    error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        };
        writer.serialize(summary)?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    let pensions: Vec<f64> = results.iter().filter_map(|r| r.as_ref().ok()).map(|r| r.nominal_pension).collect();
    println!("\nBatch Summary:");
    println!("  Projected: {}  Failed: {}", pensions.len(), failures);
    if !pensions.is_empty() {
        let mean = pensions.iter().sum::<f64>() / pensions.len() as f64;
        let min = pensions.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = pensions.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        println!("  Nominal pension: mean {:.2}, min {:.2}, max {:.2}", mean, min, max);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
