#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the Boston crime normalization pipeline.
//!
//! Reads the incident-report CSV export, runs the pipeline, and writes each
//! output table as a pretty-printed JSON file for the plotting notebooks.

use std::path::{Path, PathBuf};
use std::time::Instant;

use boston_crime_analytics::HolidayOverlay;
use boston_crime_pipeline::{PipelineConfig, PipelineDriver, PipelineOutput};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "boston_crime_cli", about = "Boston crime data normalization pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean an export and write the derived tables
    Run {
        /// Path to the Latin-1 encoded incident-report CSV
        input: PathBuf,
        /// TOML file overriding the default pipeline settings
        #[arg(long)]
        config: Option<PathBuf>,
        /// Year to compute the daily incident series for (overrides the config)
        #[arg(long)]
        year: Option<i32>,
        /// Directory the JSON tables are written to
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },
    /// Print the holiday reference calendar
    Holidays,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            config,
            year,
            out,
        } => {
            let start = Instant::now();

            let mut config = match config {
                Some(path) => PipelineConfig::load(&path)?,
                None => PipelineConfig::default(),
            };
            if let Some(year) = year {
                config.target_year = year;
            }

            let rows = boston_crime_ingest::read_export(&input)?;
            let output = PipelineDriver::new(config).run(&rows)?;
            write_tables(&out, &output)?;

            log::info!(
                "Pipeline complete: {} incidents in {:.1}s",
                output.incidents().len(),
                start.elapsed().as_secs_f64()
            );
        }
        Commands::Holidays => {
            let overlay = HolidayOverlay::load()?;
            println!("{:<12} DAY OF YEAR ({})", "LABEL", overlay.year());
            println!("{}", "-".repeat(30));
            for mark in overlay.marks() {
                println!("{:<12} {}", mark.label, mark.day_of_year);
            }
        }
    }

    Ok(())
}

/// Writes every output table into `dir`.
fn write_tables(dir: &Path, output: &PipelineOutput) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;

    write_json(&dir.join("incidents.json"), output.incidents())?;
    write_json(&dir.join("daily_counts.json"), output.daily_counts())?;
    write_json(&dir.join("holidays.json"), output.holidays())?;
    write_json(&dir.join("breakdowns.json"), output.breakdowns())?;

    log::info!("Wrote tables to {}", dir.display());
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
