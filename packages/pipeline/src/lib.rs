#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! End-to-end run of the incident normalization pipeline.
//!
//! [`PipelineDriver::run`] cleans the ingested rows once, computes the daily
//! series for the configured year, loads the holiday calendar, and builds the
//! exploratory breakdowns. The resulting [`PipelineOutput`] hands each table
//! out as an independent read-only view. Any cleaning error aborts the run
//! and is returned as-is; nothing is retried.

pub mod config;

use boston_crime_analytics::{HolidayError, HolidayOverlay, breakdowns, daily_counts};
use boston_crime_analytics_models::{Breakdowns, DailyCounts, HolidayMark};
use boston_crime_clean::{CleanError, CleanStats, Cleaner};
use boston_crime_incident_models::{IncidentRecord, RawRow};

pub use config::PipelineConfig;

/// Errors that can occur while running the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A raw row failed validation.
    #[error(transparent)]
    Clean(#[from] CleanError),

    /// The holiday calendar could not be loaded.
    #[error(transparent)]
    Holiday(#[from] HolidayError),

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// A configuration file could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Tables produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    incidents: Vec<IncidentRecord>,
    stats: CleanStats,
    daily_counts: DailyCounts,
    holidays: HolidayOverlay,
    breakdowns: Breakdowns,
}

impl PipelineOutput {
    /// The cleaned dataset, in raw row order.
    #[must_use]
    pub fn incidents(&self) -> &[IncidentRecord] {
        &self.incidents
    }

    /// Row counts from the cleaning step.
    #[must_use]
    pub const fn stats(&self) -> &CleanStats {
        &self.stats
    }

    /// Count-per-day series for the target year.
    #[must_use]
    pub const fn daily_counts(&self) -> &DailyCounts {
        &self.daily_counts
    }

    /// Year of the holiday calendar.
    #[must_use]
    pub const fn holiday_year(&self) -> i32 {
        self.holidays.year()
    }

    /// Reference marks to overlay on the daily series.
    #[must_use]
    pub fn holidays(&self) -> &[HolidayMark] {
        self.holidays.marks()
    }

    /// Exploratory breakdowns of the cleaned dataset.
    #[must_use]
    pub const fn breakdowns(&self) -> &Breakdowns {
        &self.breakdowns
    }
}

/// Runs the cleaner and the aggregations with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct PipelineDriver {
    config: PipelineConfig,
}

impl PipelineDriver {
    /// Creates a driver with the given settings.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// This driver's settings.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the pipeline over ingested rows.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Clean`] with the row index, field, and raw
    /// value of the first invalid row, or [`PipelineError::Holiday`] if the
    /// embedded calendar is malformed.
    pub fn run(&self, rows: &[RawRow]) -> Result<PipelineOutput, PipelineError> {
        let cleaner = Cleaner::new(self.config.clean_options());
        let cleaned = cleaner.clean(rows)?;

        let target_year = self.config.target_year;
        let daily_counts = daily_counts(&cleaned.records, target_year);
        log::info!(
            "Daily series for {target_year}: {} incidents over {} days",
            daily_counts.total(),
            daily_counts.days.len()
        );

        let holidays = HolidayOverlay::load()?;
        if holidays.year() != target_year {
            log::warn!(
                "Holiday calendar covers {} but the daily series is for {target_year}",
                holidays.year()
            );
        }

        let breakdowns = breakdowns(&cleaned.records);

        Ok(PipelineOutput {
            incidents: cleaned.records,
            stats: cleaned.stats,
            daily_counts,
            holidays,
            breakdowns,
        })
    }
}
