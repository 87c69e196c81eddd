//! Count-per-day series.

use std::collections::BTreeMap;

use boston_crime_analytics_models::{DailyCount, DailyCounts};
use boston_crime_incident_models::IncidentRecord;
use chrono::{Datelike as _, NaiveDateTime};

/// Returns the 1-based ordinal day of `date` (1-366, leap-year aware).
#[must_use]
pub fn day_of_year(date: &NaiveDateTime) -> u32 {
    date.ordinal()
}

/// Counts incidents per day of year for records whose `year` is `year`.
///
/// Only days with at least one incident get a row. Rows are sorted by day
/// of year ascending.
#[must_use]
pub fn daily_counts(records: &[IncidentRecord], year: i32) -> DailyCounts {
    let mut by_day: BTreeMap<u32, u64> = BTreeMap::new();

    for record in records.iter().filter(|record| record.year == year) {
        *by_day.entry(day_of_year(&record.date)).or_default() += 1;
    }

    log::debug!("Counted incidents on {} distinct days of {year}", by_day.len());

    DailyCounts {
        year,
        days: by_day
            .into_iter()
            .map(|(day_of_year, count)| DailyCount { day_of_year, count })
            .collect(),
    }
}
