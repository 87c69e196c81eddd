#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived summary tables computed from the cleaned incident dataset.
//!
//! Every table here is a fresh value built from a read-only slice of
//! incident records. Rows are always emitted in a fixed order so that two
//! computations over the same input serialize identically.

use boston_crime_incident_models::Weekday;
use serde::{Deserialize, Serialize};

/// Number of incidents on one day of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    /// 1-based ordinal day (1-366).
    pub day_of_year: u32,
    /// Incidents on that day, always at least 1.
    pub count: u64,
}

/// Count-per-day series for a single year.
///
/// Days without incidents have no row; read them as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCounts {
    /// Year the series covers.
    pub year: i32,
    /// Rows sorted by `day_of_year` ascending.
    pub days: Vec<DailyCount>,
}

impl DailyCounts {
    /// Returns the incident count for `day_of_year`, zero when absent.
    #[must_use]
    pub fn count_for(&self, day_of_year: u32) -> u64 {
        self.days
            .binary_search_by_key(&day_of_year, |row| row.day_of_year)
            .map_or(0, |i| self.days[i].count)
    }

    /// Sum of all daily counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.days.iter().map(|row| row.count).sum()
    }

    /// Whether no day in the year had an incident.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// A named reference date for overlaying on a daily series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayMark {
    /// Short label drawn next to the mark.
    pub label: String,
    /// 1-based ordinal day of the reference date.
    pub day_of_year: u32,
}

/// Incident count for one offense group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCount {
    /// Offense group label.
    pub group: String,
    /// Number of incidents.
    pub count: u64,
}

/// Incident count for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourCount {
    /// Hour (0-23).
    pub hour: u32,
    /// Number of incidents.
    pub count: u64,
}

/// Incident count for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayCount {
    /// Weekday.
    pub day: Weekday,
    /// Number of incidents (may be zero).
    pub count: u64,
}

/// Incident count for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCount {
    /// Month (1-12).
    pub month: u32,
    /// Number of incidents.
    pub count: u64,
}

/// A located incident for spatial scatter plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePoint {
    /// Latitude.
    #[serde(rename = "Lat")]
    pub lat: f64,
    /// Longitude.
    #[serde(rename = "Long")]
    pub long: f64,
    /// District code, if reported.
    pub district: Option<String>,
}

/// Number of records with no value for a nullable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingCount {
    /// Canonical field name.
    pub field: String,
    /// Records missing a value.
    pub missing: u64,
}

/// Exploratory breakdowns of the cleaned dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdowns {
    /// Counts per offense group, most frequent first.
    pub by_group: Vec<GroupCount>,
    /// Counts per hour, ascending.
    pub by_hour: Vec<HourCount>,
    /// Counts per weekday, Monday first, all seven present.
    pub by_weekday: Vec<WeekdayCount>,
    /// Counts per month, ascending.
    pub by_month: Vec<MonthCount>,
    /// Located incidents, in dataset order.
    pub points: Vec<CoordinatePoint>,
    /// Missing-value counts per nullable field.
    pub missing: Vec<MissingCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> DailyCounts {
        DailyCounts {
            year: 2017,
            days: vec![
                DailyCount { day_of_year: 1, count: 4 },
                DailyCount { day_of_year: 76, count: 9 },
                DailyCount { day_of_year: 359, count: 2 },
            ],
        }
    }

    #[test]
    fn absent_days_count_as_zero() {
        let counts = series();
        assert_eq!(counts.count_for(76), 9);
        assert_eq!(counts.count_for(77), 0);
        assert_eq!(counts.count_for(366), 0);
    }

    #[test]
    fn total_sums_all_days() {
        assert_eq!(series().total(), 15);
        assert!(!series().is_empty());
    }
}
