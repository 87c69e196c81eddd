//! Per-field text coercions used by the cleaner.
//!
//! Each function takes the trimmed raw text of one field (or `None` when the
//! cell is absent) and returns the canonical value. None of them touch the
//! surrounding row.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use boston_crime_incident_models::Shooting;

/// Coordinate value the export uses for "unknown".
pub const COORDINATE_SENTINEL: f64 = -1.0;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses an occurrence timestamp.
///
/// Accepts the export's `YYYY-MM-DD HH:MM:SS` form plus a few common
/// variants. A trailing UTC offset is accepted and dropped, keeping the
/// local wall-clock time. A bare date resolves to midnight.
#[must_use]
pub fn parse_occurred_on(s: &str) -> Option<NaiveDateTime> {
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive);
        }
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%#z") {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parses an integer field, tolerating a trailing `.0` left behind by
/// spreadsheet exports.
#[must_use]
pub fn parse_integer(s: &str) -> Option<i64> {
    if let Ok(value) = s.parse::<i64>() {
        return Some(value);
    }
    let whole = s.strip_suffix(".0")?;
    whole.parse::<i64>().ok()
}

/// Resolves the shooting indicator, defaulting to [`Shooting::No`] when the
/// cell is absent. Present text other than `Y` or `N` is kept as given.
#[must_use]
pub fn resolve_shooting(raw: Option<&str>) -> Shooting {
    raw.map_or(Shooting::No, Shooting::from)
}

/// Parses one coordinate component.
///
/// Absent cells, the `-1` sentinel, and text that is not a finite number all
/// come back as `None`.
#[must_use]
pub fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    let value = raw?.parse::<f64>().ok()?;
    replace_sentinel(value)
}

/// Replaces the `-1` coordinate sentinel (and non-finite values) with `None`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn replace_sentinel(value: f64) -> Option<f64> {
    if value == COORDINATE_SENTINEL || !value.is_finite() {
        return None;
    }
    Some(value)
}

/// Converts optional text into an owned nullable string field.
#[must_use]
pub fn nullable_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike as _, Timelike as _};

    use super::*;

    #[test]
    fn parses_export_timestamp() {
        let dt = parse_occurred_on("2017-03-17 14:00:00").unwrap();
        assert_eq!(dt.to_string(), "2017-03-17 14:00:00");
    }

    #[test]
    fn parses_timestamp_with_offset_keeping_wall_clock() {
        let dt = parse_occurred_on("2016-07-04 23:15:00+00").unwrap();
        assert_eq!(dt.hour(), 23);
        assert_eq!(dt.ordinal(), 186);
    }

    #[test]
    fn parses_iso_and_us_formats() {
        assert!(parse_occurred_on("2016-01-02T03:04:05").is_some());
        assert!(parse_occurred_on("2016-01-02T03:04:05.000").is_some());
        assert!(parse_occurred_on("01/02/2016 03:04").is_some());
    }

    #[test]
    fn bare_date_resolves_to_midnight() {
        let dt = parse_occurred_on("2017-12-25").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.ordinal(), 359);
    }

    #[test]
    fn rejects_invalid_timestamp() {
        assert!(parse_occurred_on("not-a-date").is_none());
        assert!(parse_occurred_on("2017-02-30 10:00:00").is_none());
    }

    #[test]
    fn integers_tolerate_trailing_zero_fraction() {
        assert_eq!(parse_integer("2017"), Some(2017));
        assert_eq!(parse_integer("2017.0"), Some(2017));
        assert_eq!(parse_integer("2017.5"), None);
        assert_eq!(parse_integer("twenty"), None);
    }

    #[test]
    fn absent_shooting_defaults_to_no() {
        assert_eq!(resolve_shooting(None), Shooting::No);
        assert_eq!(resolve_shooting(Some("Y")), Shooting::Yes);
        assert_eq!(resolve_shooting(Some("N")), Shooting::No);
        assert_eq!(
            resolve_shooting(Some("maybe")),
            Shooting::Other("maybe".to_string())
        );
    }

    #[test]
    fn sentinel_coordinates_become_missing() {
        assert_eq!(parse_coordinate(Some("-1")), None);
        assert_eq!(parse_coordinate(Some("-1.0")), None);
        assert_eq!(parse_coordinate(None), None);
    }

    #[test]
    fn non_numeric_coordinates_become_missing() {
        assert_eq!(parse_coordinate(Some("unknown")), None);
        assert_eq!(parse_coordinate(Some("NaN")), None);
        assert_eq!(parse_coordinate(Some("inf")), None);
    }

    #[test]
    fn valid_coordinates_are_kept() {
        let lat = parse_coordinate(Some("42.35779134")).unwrap();
        assert!((lat - 42.357_791_34).abs() < f64::EPSILON);
        let long = parse_coordinate(Some("-71.13937053")).unwrap();
        assert!((long - -71.139_370_53).abs() < f64::EPSILON);
    }
}
