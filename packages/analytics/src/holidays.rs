//! Fixed reference calendar for overlaying on a daily series.
//!
//! The calendar is hand-authored in `holidays.toml` and compiled into the
//! binary. It never depends on the incident data; it is only drawn next to
//! the daily counts, never used to filter or weight them.

use boston_crime_analytics_models::HolidayMark;
use chrono::{Datelike as _, NaiveDate};
use serde::Deserialize;

/// Embedded holiday calendar (compiled into the binary).
const HOLIDAYS_TOML: &str = include_str!("../holidays.toml");

/// Errors from loading the holiday calendar.
#[derive(Debug, thiserror::Error)]
pub enum HolidayError {
    /// The calendar TOML could not be parsed.
    #[error("Failed to parse holiday calendar: {0}")]
    Toml(#[from] toml::de::Error),

    /// A reference date falls outside the calendar's year.
    #[error("Holiday {label:?} on {date} is not in calendar year {year}")]
    WrongYear {
        /// Holiday label.
        label: String,
        /// The offending date.
        date: NaiveDate,
        /// The calendar's declared year.
        year: i32,
    },
}

#[derive(Debug, Deserialize)]
struct CalendarFile {
    year: i32,
    holidays: Vec<CalendarEntry>,
}

#[derive(Debug, Deserialize)]
struct CalendarEntry {
    label: String,
    date: NaiveDate,
}

/// Named reference dates for a single year, in calendar file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayOverlay {
    year: i32,
    marks: Vec<HolidayMark>,
}

impl HolidayOverlay {
    /// Loads the embedded calendar.
    ///
    /// # Errors
    ///
    /// Returns [`HolidayError`] if the embedded calendar is malformed.
    pub fn load() -> Result<Self, HolidayError> {
        Self::from_toml_str(HOLIDAYS_TOML)
    }

    /// Parses a calendar from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`HolidayError`] if the text is not a valid calendar or any
    /// date lies outside the declared year.
    pub fn from_toml_str(s: &str) -> Result<Self, HolidayError> {
        let file: CalendarFile = toml::from_str(s)?;

        let marks = file
            .holidays
            .into_iter()
            .map(|entry| {
                if entry.date.year() != file.year {
                    return Err(HolidayError::WrongYear {
                        label: entry.label,
                        date: entry.date,
                        year: file.year,
                    });
                }
                Ok(HolidayMark {
                    label: entry.label,
                    day_of_year: entry.date.ordinal(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            year: file.year,
            marks,
        })
    }

    /// Year the calendar covers.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Reference marks, in calendar order.
    #[must_use]
    pub fn marks(&self) -> &[HolidayMark] {
        &self.marks
    }

    /// Looks up a mark by label.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&HolidayMark> {
        self.marks.iter().find(|mark| mark.label == label)
    }
}
