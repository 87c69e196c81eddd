//! Exploratory breakdowns of the cleaned dataset.

use std::collections::BTreeMap;

use boston_crime_analytics_models::{
    Breakdowns, CoordinatePoint, GroupCount, HourCount, MissingCount, MonthCount, WeekdayCount,
};
use boston_crime_incident_models::{CanonicalField, IncidentRecord, Weekday};

/// Builds every breakdown table for `records`.
#[must_use]
pub fn breakdowns(records: &[IncidentRecord]) -> Breakdowns {
    Breakdowns {
        by_group: counts_by_group(records),
        by_hour: counts_by_hour(records),
        by_weekday: counts_by_weekday(records),
        by_month: counts_by_month(records),
        points: coordinate_points(records),
        missing: missing_counts(records),
    }
}

/// Counts per offense group, most frequent first. Ties sort by label.
#[must_use]
pub fn counts_by_group(records: &[IncidentRecord]) -> Vec<GroupCount> {
    let mut by_group: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        *by_group.entry(record.group.as_str()).or_default() += 1;
    }

    let mut rows: Vec<GroupCount> = by_group
        .into_iter()
        .map(|(group, count)| GroupCount {
            group: group.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps the label order from the BTreeMap for ties.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Counts per hour of day for hours with at least one incident.
#[must_use]
pub fn counts_by_hour(records: &[IncidentRecord]) -> Vec<HourCount> {
    let mut by_hour: BTreeMap<u32, u64> = BTreeMap::new();
    for record in records {
        *by_hour.entry(record.hour).or_default() += 1;
    }
    by_hour
        .into_iter()
        .map(|(hour, count)| HourCount { hour, count })
        .collect()
}

/// Counts per weekday, Monday through Sunday, including zero rows.
#[must_use]
pub fn counts_by_weekday(records: &[IncidentRecord]) -> Vec<WeekdayCount> {
    Weekday::all()
        .iter()
        .map(|&day| WeekdayCount {
            day,
            count: records.iter().filter(|record| record.day == day).count() as u64,
        })
        .collect()
}

/// Counts per month for months with at least one incident.
#[must_use]
pub fn counts_by_month(records: &[IncidentRecord]) -> Vec<MonthCount> {
    let mut by_month: BTreeMap<u32, u64> = BTreeMap::new();
    for record in records {
        *by_month.entry(record.month).or_default() += 1;
    }
    by_month
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}

/// Located incidents in dataset order. Records missing either coordinate
/// are skipped.
#[must_use]
pub fn coordinate_points(records: &[IncidentRecord]) -> Vec<CoordinatePoint> {
    records
        .iter()
        .filter_map(|record| {
            let (lat, long) = record.coordinates()?;
            Some(CoordinatePoint {
                lat,
                long,
                district: record.district.clone(),
            })
        })
        .collect()
}

/// Missing-value counts for each nullable canonical field.
#[must_use]
pub fn missing_counts(records: &[IncidentRecord]) -> Vec<MissingCount> {
    CanonicalField::all()
        .iter()
        .copied()
        .filter(|field| field.is_nullable())
        .map(|field| MissingCount {
            field: field.to_string(),
            missing: records.iter().filter(|r| r.is_missing(field)).count() as u64,
        })
        .collect()
}
