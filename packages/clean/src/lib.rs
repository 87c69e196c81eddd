#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Normalization of raw incident-report rows into [`IncidentRecord`]s.
//!
//! The [`Cleaner`] runs in two phases per row. First the soft filters (year
//! window and severity tier) decide whether the row is kept at all; rows that
//! fail them are dropped without error. Every kept row is then coerced field
//! by field, and the first field that cannot be coerced aborts the whole run
//! with a [`CleanError`] naming the row, the raw field, and its text.

pub mod parsing;

use std::ops::RangeInclusive;

use boston_crime_incident_models::{IncidentRecord, PART_ONE, RawField, RawRow, Weekday};

use crate::parsing::{
    nullable_text, parse_coordinate, parse_integer, parse_occurred_on, resolve_shooting,
};

/// Errors that abort a cleaning run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CleanError {
    /// A required field could not be converted to its semantic type.
    #[error("row {row}: cannot parse {field} value {value:?}: {reason}")]
    Parse {
        /// Position of the row in the raw input.
        row: usize,
        /// Raw column that failed.
        field: RawField,
        /// Raw cell text (empty when the cell was absent).
        value: String,
        /// What was expected.
        reason: String,
    },

    /// A field held a value outside its declared domain.
    #[error("row {row}: {field} value {value:?} is outside its domain (expected {expected})")]
    Domain {
        /// Position of the row in the raw input.
        row: usize,
        /// Raw column that failed.
        field: RawField,
        /// Raw cell text.
        value: String,
        /// Description of the allowed values.
        expected: String,
    },
}

impl CleanError {
    /// Position of the offending row in the raw input.
    #[must_use]
    pub const fn row(&self) -> usize {
        match self {
            Self::Parse { row, .. } | Self::Domain { row, .. } => *row,
        }
    }

    /// Raw column that failed.
    #[must_use]
    pub const fn field(&self) -> RawField {
        match self {
            Self::Parse { field, .. } | Self::Domain { field, .. } => *field,
        }
    }

    /// Offending raw cell text.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Parse { value, .. } | Self::Domain { value, .. } => value,
        }
    }
}

/// Filter settings for a cleaning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOptions {
    /// Years to retain.
    pub years: Vec<i32>,
    /// Severity-tier marker a row must carry exactly.
    pub severity_marker: String,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            years: vec![2016, 2017],
            severity_marker: PART_ONE.to_string(),
        }
    }
}

/// Row counts from one cleaning run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanStats {
    /// Rows handed to the cleaner.
    pub raw_rows: usize,
    /// Rows dropped for a missing or out-of-window year.
    pub dropped_by_year: usize,
    /// Rows dropped for a severity tier other than the marker.
    pub dropped_by_severity: usize,
    /// Rows emitted as incident records.
    pub cleaned: usize,
}

/// Result of a successful cleaning run.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    /// Cleaned records, in raw row order.
    pub records: Vec<IncidentRecord>,
    /// Row counts.
    pub stats: CleanStats,
}

/// Turns raw rows into canonical incident records.
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    options: CleanOptions,
}

impl Cleaner {
    /// Creates a cleaner with the given filter settings.
    #[must_use]
    pub const fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    /// Returns this cleaner's filter settings.
    #[must_use]
    pub const fn options(&self) -> &CleanOptions {
        &self.options
    }

    /// Cleans every row, preserving input order.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError`] for the first retained row holding an
    /// unparseable or out-of-domain value. No partial output is produced.
    pub fn clean(&self, rows: &[RawRow]) -> Result<Cleaned, CleanError> {
        let mut stats = CleanStats {
            raw_rows: rows.len(),
            ..CleanStats::default()
        };
        let mut records = Vec::new();

        for (index, row) in rows.iter().enumerate() {
            if !self.in_year_window(row) {
                stats.dropped_by_year += 1;
                continue;
            }
            if !self.is_restricted_tier(row) {
                stats.dropped_by_severity += 1;
                continue;
            }
            records.push(clean_row(index, row)?);
        }

        stats.cleaned = records.len();

        log::debug!(
            "Dropped {} rows outside years {:?} and {} rows not marked {:?}",
            stats.dropped_by_year,
            self.options.years,
            stats.dropped_by_severity,
            self.options.severity_marker,
        );
        log::info!(
            "Cleaned {} incidents from {} raw rows",
            stats.cleaned,
            stats.raw_rows
        );

        Ok(Cleaned { records, stats })
    }

    /// Whether the row's year parses as an integer inside the window.
    #[must_use]
    pub fn in_year_window(&self, row: &RawRow) -> bool {
        RawField::Year
            .get(row)
            .and_then(parse_integer)
            .and_then(|year| i32::try_from(year).ok())
            .is_some_and(|year| self.options.years.contains(&year))
    }

    /// Whether the row's severity tier equals the marker exactly.
    #[must_use]
    pub fn is_restricted_tier(&self, row: &RawRow) -> bool {
        row.get(RawField::UcrPart.column())
            .is_some_and(|tier| *tier == self.options.severity_marker)
    }
}

/// Coerces a single row that already passed the filters.
///
/// # Errors
///
/// Returns [`CleanError`] for the first field that fails coercion.
pub fn clean_row(index: usize, row: &RawRow) -> Result<IncidentRecord, CleanError> {
    let group = required_text(index, row, RawField::OffenseCodeGroup)?;
    let description = required_text(index, row, RawField::OffenseDescription)?;

    let date_text = RawField::OccurredOnDate.get(row);
    let date = date_text
        .and_then(parse_occurred_on)
        .ok_or_else(|| CleanError::Parse {
            row: index,
            field: RawField::OccurredOnDate,
            value: date_text.unwrap_or_default().to_string(),
            reason: "expected a date-time such as 2017-03-17 14:00:00".to_string(),
        })?;

    let year: i32 = bounded_integer(index, row, RawField::Year, i32::MIN..=i32::MAX)?;
    let month: u32 = bounded_integer(index, row, RawField::Month, 1..=12)?;
    let hour: u32 = bounded_integer(index, row, RawField::Hour, 0..=23)?;

    let day_text = RawField::DayOfWeek.get(row).unwrap_or_default();
    let day = day_text
        .parse::<Weekday>()
        .map_err(|_| CleanError::Domain {
            row: index,
            field: RawField::DayOfWeek,
            value: day_text.to_string(),
            expected: "one of Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday"
                .to_string(),
        })?;

    let shooting_text = RawField::Shooting.get(row);
    if shooting_text.is_none() {
        log::trace!("row {index}: SHOOTING absent, defaulting to N");
    }
    let shooting = resolve_shooting(shooting_text);

    let lat = coordinate(index, row, RawField::Lat);
    let long = coordinate(index, row, RawField::Long);

    Ok(IncidentRecord {
        group,
        description,
        district: nullable_text(RawField::District.get(row)),
        area: nullable_text(RawField::ReportingArea.get(row)),
        shooting,
        date,
        year,
        month,
        day,
        hour,
        street: nullable_text(RawField::Street.get(row)),
        lat,
        long,
    })
}

fn required_text(index: usize, row: &RawRow, field: RawField) -> Result<String, CleanError> {
    field
        .get(row)
        .map(str::to_owned)
        .ok_or_else(|| CleanError::Parse {
            row: index,
            field,
            value: String::new(),
            reason: "value is required".to_string(),
        })
}

fn bounded_integer<T>(
    index: usize,
    row: &RawRow,
    field: RawField,
    range: RangeInclusive<T>,
) -> Result<T, CleanError>
where
    T: TryFrom<i64> + PartialOrd + std::fmt::Display,
{
    let text = field.get(row).unwrap_or_default();
    let value = parse_integer(text).ok_or_else(|| CleanError::Parse {
        row: index,
        field,
        value: text.to_string(),
        reason: "expected an integer".to_string(),
    })?;
    T::try_from(value)
        .ok()
        .filter(|value| range.contains(value))
        .ok_or_else(|| CleanError::Domain {
            row: index,
            field,
            value: text.to_string(),
            expected: format!("an integer in {}..={}", range.start(), range.end()),
        })
}

fn coordinate(index: usize, row: &RawRow, field: RawField) -> Option<f64> {
    let text = field.get(row);
    let value = parse_coordinate(text);
    if value.is_none()
        && let Some(text) = text
    {
        log::trace!("row {index}: {field} value {text:?} treated as missing");
    }
    value
}

#[cfg(test)]
mod tests {
    use boston_crime_incident_models::Shooting;
    use chrono::Datelike as _;

    use super::*;

    fn raw_row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn base_row() -> RawRow {
        raw_row(&[
            ("INCIDENT_NUMBER", "I172040657"),
            ("OFFENSE_CODE", "619"),
            ("OFFENSE_CODE_GROUP", "Larceny"),
            ("OFFENSE_DESCRIPTION", "LARCENY ALL OTHERS"),
            ("DISTRICT", "D14"),
            ("REPORTING_AREA", "808"),
            ("SHOOTING", ""),
            ("OCCURRED_ON_DATE", "2017-03-17 14:00:00"),
            ("YEAR", "2017"),
            ("MONTH", "3"),
            ("DAY_OF_WEEK", "Friday"),
            ("HOUR", "14"),
            ("UCR_PART", "Part One"),
            ("STREET", "LINCOLN ST"),
            ("Lat", "42.35779134"),
            ("Long", "-71.13937053"),
            ("Location", "(42.35779134, -71.13937053)"),
        ])
    }

    fn with(mut row: RawRow, key: &str, value: &str) -> RawRow {
        row.insert(key.to_string(), value.to_string());
        row
    }

    #[test]
    fn cleans_a_complete_row() {
        let cleaned = Cleaner::default().clean(&[base_row()]).unwrap();
        assert_eq!(cleaned.records.len(), 1);
        let record = &cleaned.records[0];
        assert_eq!(record.group, "Larceny");
        assert_eq!(record.description, "LARCENY ALL OTHERS");
        assert_eq!(record.district.as_deref(), Some("D14"));
        assert_eq!(record.area.as_deref(), Some("808"));
        assert_eq!(record.shooting, Shooting::No);
        assert_eq!(record.date.ordinal(), 76);
        assert_eq!(record.year, 2017);
        assert_eq!(record.month, 3);
        assert_eq!(record.day, Weekday::Friday);
        assert_eq!(record.hour, 14);
        assert_eq!(record.street.as_deref(), Some("LINCOLN ST"));
        assert!(record.lat.is_some() && record.long.is_some());
    }

    #[test]
    fn drops_rows_outside_year_window() {
        let rows = vec![
            with(base_row(), "YEAR", "2015"),
            with(base_row(), "YEAR", "2018"),
            with(base_row(), "YEAR", ""),
            base_row(),
        ];
        let cleaned = Cleaner::default().clean(&rows).unwrap();
        assert_eq!(cleaned.records.len(), 1);
        assert_eq!(cleaned.stats.dropped_by_year, 3);
    }

    #[test]
    fn drops_rows_outside_restricted_tier() {
        let rows = vec![
            with(base_row(), "UCR_PART", "Part Two"),
            with(base_row(), "UCR_PART", "part one"),
            with(base_row(), "UCR_PART", ""),
            base_row(),
        ];
        let cleaned = Cleaner::default().clean(&rows).unwrap();
        assert_eq!(cleaned.records.len(), 1);
        assert_eq!(cleaned.stats.dropped_by_severity, 3);
    }

    #[test]
    fn filtered_rows_are_not_validated() {
        let row = with(
            with(base_row(), "YEAR", "2015"),
            "OCCURRED_ON_DATE",
            "garbage",
        );
        let cleaned = Cleaner::default().clean(&[row]).unwrap();
        assert!(cleaned.records.is_empty());
    }

    #[test]
    fn absent_shooting_resolves_to_no() {
        let mut row = base_row();
        row.remove("SHOOTING");
        let cleaned = Cleaner::default().clean(&[row]).unwrap();
        assert_eq!(cleaned.records[0].shooting, Shooting::No);

        let cleaned = Cleaner::default()
            .clean(&[with(base_row(), "SHOOTING", "Y")])
            .unwrap();
        assert_eq!(cleaned.records[0].shooting, Shooting::Yes);
    }

    #[test]
    fn other_shooting_values_are_kept_verbatim() {
        let rows = [
            with(base_row(), "SHOOTING", "1"),
            with(base_row(), "SHOOTING", "0"),
        ];
        let cleaned = Cleaner::default().clean(&rows).unwrap();
        assert_eq!(cleaned.records.len(), 2);
        assert_eq!(cleaned.records[0].shooting, Shooting::Other("1".to_string()));
        assert_eq!(cleaned.records[1].shooting, Shooting::Other("0".to_string()));

        let json = serde_json::to_value(&cleaned.records[0]).unwrap();
        assert_eq!(json["shooting"], "1");
    }

    #[test]
    fn sentinel_coordinates_become_missing() {
        let row = with(with(base_row(), "Lat", "-1"), "Long", "-1");
        let cleaned = Cleaner::default().clean(&[row]).unwrap();
        assert_eq!(cleaned.records[0].lat, None);
        assert_eq!(cleaned.records[0].long, None);
    }

    #[test]
    fn unparseable_coordinates_become_missing() {
        let row = with(base_row(), "Lat", "north-ish");
        let cleaned = Cleaner::default().clean(&[row]).unwrap();
        assert_eq!(cleaned.records[0].lat, None);
        assert!(cleaned.records[0].long.is_some());
    }

    #[test]
    fn unparseable_date_reports_row_context() {
        let rows = vec![base_row(), with(base_row(), "OCCURRED_ON_DATE", "17th of March")];
        let err = Cleaner::default().clean(&rows).unwrap_err();
        assert!(matches!(err, CleanError::Parse { .. }));
        assert_eq!(err.row(), 1);
        assert_eq!(err.field(), RawField::OccurredOnDate);
        assert_eq!(err.value(), "17th of March");
        assert!(err.to_string().contains("17th of March"));
    }

    #[test]
    fn missing_date_is_a_parse_error() {
        let mut row = base_row();
        row.remove("OCCURRED_ON_DATE");
        let err = Cleaner::default().clean(&[row]).unwrap_err();
        assert_eq!(err.field(), RawField::OccurredOnDate);
        assert_eq!(err.value(), "");
    }

    #[test]
    fn unknown_weekday_is_a_domain_error() {
        let err = Cleaner::default()
            .clean(&[with(base_row(), "DAY_OF_WEEK", "Caturday")])
            .unwrap_err();
        assert!(matches!(err, CleanError::Domain { .. }));
        assert_eq!(err.field(), RawField::DayOfWeek);
        assert_eq!(err.value(), "Caturday");
    }

    #[test]
    fn out_of_range_hour_and_month_are_domain_errors() {
        let err = Cleaner::default()
            .clean(&[with(base_row(), "HOUR", "24")])
            .unwrap_err();
        assert!(matches!(err, CleanError::Domain { field: RawField::Hour, .. }));

        let err = Cleaner::default()
            .clean(&[with(base_row(), "MONTH", "0")])
            .unwrap_err();
        assert!(matches!(err, CleanError::Domain { field: RawField::Month, .. }));

        let err = Cleaner::default()
            .clean(&[with(base_row(), "HOUR", "noon")])
            .unwrap_err();
        assert!(matches!(err, CleanError::Parse { field: RawField::Hour, .. }));
    }

    #[test]
    fn integer_fields_convert_at_range_edges() {
        let row = with(with(base_row(), "HOUR", "23"), "MONTH", "12.0");
        let cleaned = Cleaner::default().clean(&[row]).unwrap();
        assert_eq!(cleaned.records[0].hour, 23);
        assert_eq!(cleaned.records[0].month, 12);
        assert_eq!(cleaned.records[0].year, 2017);

        let err = Cleaner::default()
            .clean(&[with(base_row(), "HOUR", "-1")])
            .unwrap_err();
        assert_eq!(err.field(), RawField::Hour);
        assert_eq!(err.value(), "-1");
        assert!(matches!(err, CleanError::Domain { .. }));
    }

    #[test]
    fn missing_group_is_a_parse_error() {
        let err = Cleaner::default()
            .clean(&[with(base_row(), "OFFENSE_CODE_GROUP", " ")])
            .unwrap_err();
        assert_eq!(err.field(), RawField::OffenseCodeGroup);
    }

    #[test]
    fn blank_optional_fields_become_missing() {
        let row = with(with(base_row(), "DISTRICT", ""), "REPORTING_AREA", " ");
        let cleaned = Cleaner::default().clean(&[row]).unwrap();
        assert_eq!(cleaned.records[0].district, None);
        assert_eq!(cleaned.records[0].area, None);
    }

    #[test]
    fn preserves_input_order() {
        let rows = vec![
            with(base_row(), "STREET", "A ST"),
            with(base_row(), "YEAR", "2014"),
            with(with(base_row(), "STREET", "B ST"), "YEAR", "2016"),
            with(base_row(), "STREET", "C ST"),
        ];
        let cleaned = Cleaner::default().clean(&rows).unwrap();
        let streets: Vec<_> = cleaned
            .records
            .iter()
            .map(|r| r.street.clone().unwrap())
            .collect();
        assert_eq!(streets, vec!["A ST", "B ST", "C ST"]);
    }

    #[test]
    fn cleaning_is_deterministic() {
        let rows = vec![
            base_row(),
            with(with(base_row(), "Lat", "-1"), "Long", "-1"),
            with(base_row(), "YEAR", "2016"),
        ];
        let cleaner = Cleaner::default();
        let first = serde_json::to_string(&cleaner.clean(&rows).unwrap().records).unwrap();
        let second = serde_json::to_string(&cleaner.clean(&rows).unwrap().records).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn cleaned_records_hold_invariants() {
        let rows = vec![
            base_row(),
            with(base_row(), "YEAR", "2015"),
            with(base_row(), "UCR_PART", "Part Three"),
            with(with(base_row(), "Lat", "-1"), "Long", "-1.0"),
            with(base_row(), "SHOOTING", "Y"),
        ];
        let cleaned = Cleaner::default().clean(&rows).unwrap();
        assert_eq!(cleaned.records.len(), 3);
        for record in &cleaned.records {
            assert!([2016, 2017].contains(&record.year));
            assert!(matches!(record.shooting, Shooting::Yes | Shooting::No));
            assert_ne!(record.lat, Some(-1.0));
            assert_ne!(record.long, Some(-1.0));
        }
    }

    #[test]
    fn does_not_mutate_input() {
        let rows = vec![with(with(base_row(), "Lat", "-1"), "SHOOTING", "")];
        let before = rows.clone();
        Cleaner::default().clean(&rows).unwrap();
        assert_eq!(rows, before);
    }

    #[test]
    fn custom_options_change_the_filters() {
        let cleaner = Cleaner::new(CleanOptions {
            years: vec![2015],
            severity_marker: "Part Two".to_string(),
        });
        let rows = vec![
            base_row(),
            with(with(base_row(), "YEAR", "2015"), "UCR_PART", "Part Two"),
        ];
        let cleaned = cleaner.clean(&rows).unwrap();
        assert_eq!(cleaned.records.len(), 1);
        assert_eq!(cleaned.records[0].year, 2015);
    }
}
