#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Raw and canonical incident record schema.
//!
//! The Boston incident-report export arrives as rows of named text fields
//! ([`RawRow`]) keyed by the columns in [`RawField`]. Cleaning turns each
//! retained row into an [`IncidentRecord`] whose fields are the canonical
//! names in [`CanonicalField`]. The mapping between the two is the static
//! table returned by [`RawField::canonical`].

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// One raw input row: column name to decoded cell text.
pub type RawRow = BTreeMap<String, String>;

/// Severity-tier marker for the most serious offenses.
pub const PART_ONE: &str = "Part One";

/// Columns of the raw incident-report export.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
pub enum RawField {
    /// Incident identifier.
    #[strum(serialize = "INCIDENT_NUMBER")]
    IncidentNumber,
    /// Numeric offense code.
    #[strum(serialize = "OFFENSE_CODE")]
    OffenseCode,
    /// Offense category label.
    #[strum(serialize = "OFFENSE_CODE_GROUP")]
    OffenseCodeGroup,
    /// Free-text offense description.
    #[strum(serialize = "OFFENSE_DESCRIPTION")]
    OffenseDescription,
    /// Police district code.
    #[strum(serialize = "DISTRICT")]
    District,
    /// Reporting-area code.
    #[strum(serialize = "REPORTING_AREA")]
    ReportingArea,
    /// Shooting indicator (`Y` or empty).
    #[strum(serialize = "SHOOTING")]
    Shooting,
    /// Occurrence timestamp text.
    #[strum(serialize = "OCCURRED_ON_DATE")]
    OccurredOnDate,
    /// Occurrence year.
    #[strum(serialize = "YEAR")]
    Year,
    /// Occurrence month.
    #[strum(serialize = "MONTH")]
    Month,
    /// Occurrence weekday name.
    #[strum(serialize = "DAY_OF_WEEK")]
    DayOfWeek,
    /// Occurrence hour.
    #[strum(serialize = "HOUR")]
    Hour,
    /// UCR severity tier (`Part One`, `Part Two`, ...).
    #[strum(serialize = "UCR_PART")]
    UcrPart,
    /// Street name.
    #[strum(serialize = "STREET")]
    Street,
    /// Latitude, `-1` when unknown.
    #[strum(serialize = "Lat")]
    Lat,
    /// Longitude, `-1` when unknown.
    #[strum(serialize = "Long")]
    Long,
    /// Combined `(lat, long)` text.
    #[strum(serialize = "Location")]
    Location,
}

impl RawField {
    /// Returns the export column header for this field.
    #[must_use]
    pub fn column(self) -> &'static str {
        self.into()
    }

    /// Returns the canonical field this raw column is renamed to, or `None`
    /// for columns that are pruned during cleaning.
    #[must_use]
    pub const fn canonical(self) -> Option<CanonicalField> {
        match self {
            Self::IncidentNumber | Self::OffenseCode | Self::UcrPart | Self::Location => None,
            Self::OffenseCodeGroup => Some(CanonicalField::Group),
            Self::OffenseDescription => Some(CanonicalField::Description),
            Self::District => Some(CanonicalField::District),
            Self::ReportingArea => Some(CanonicalField::Area),
            Self::Shooting => Some(CanonicalField::Shooting),
            Self::OccurredOnDate => Some(CanonicalField::Date),
            Self::Year => Some(CanonicalField::Year),
            Self::Month => Some(CanonicalField::Month),
            Self::DayOfWeek => Some(CanonicalField::Day),
            Self::Hour => Some(CanonicalField::Hour),
            Self::Street => Some(CanonicalField::Street),
            Self::Lat => Some(CanonicalField::Lat),
            Self::Long => Some(CanonicalField::Long),
        }
    }

    /// Returns the raw columns that have no canonical counterpart.
    #[must_use]
    pub fn dropped() -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|field| field.canonical().is_none())
            .collect()
    }

    /// Looks up this field's text in a raw row. Empty and whitespace-only
    /// cells count as absent.
    #[must_use]
    pub fn get(self, row: &RawRow) -> Option<&str> {
        row.get(self.column())
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Returns all variants of this enum, in export column order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::IncidentNumber,
            Self::OffenseCode,
            Self::OffenseCodeGroup,
            Self::OffenseDescription,
            Self::District,
            Self::ReportingArea,
            Self::Shooting,
            Self::OccurredOnDate,
            Self::Year,
            Self::Month,
            Self::DayOfWeek,
            Self::Hour,
            Self::UcrPart,
            Self::Street,
            Self::Lat,
            Self::Long,
            Self::Location,
        ]
    }
}

/// Field names of a cleaned [`IncidentRecord`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
pub enum CanonicalField {
    /// Offense category label.
    #[strum(serialize = "group")]
    Group,
    /// Offense description.
    #[strum(serialize = "description")]
    Description,
    /// District code.
    #[strum(serialize = "district")]
    District,
    /// Reporting-area code.
    #[strum(serialize = "area")]
    Area,
    /// Shooting flag.
    #[strum(serialize = "shooting")]
    Shooting,
    /// Occurrence timestamp.
    #[strum(serialize = "date")]
    Date,
    /// Occurrence year.
    #[strum(serialize = "year")]
    Year,
    /// Occurrence month.
    #[strum(serialize = "month")]
    Month,
    /// Occurrence weekday.
    #[strum(serialize = "day")]
    Day,
    /// Occurrence hour.
    #[strum(serialize = "hour")]
    Hour,
    /// Street name.
    #[strum(serialize = "street")]
    Street,
    /// Latitude.
    #[strum(serialize = "Lat")]
    Lat,
    /// Longitude.
    #[strum(serialize = "Long")]
    Long,
}

impl CanonicalField {
    /// Whether a cleaned record may hold no value for this field.
    #[must_use]
    pub const fn is_nullable(self) -> bool {
        matches!(
            self,
            Self::District | Self::Area | Self::Street | Self::Lat | Self::Long
        )
    }

    /// Returns all variants of this enum, in record field order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Group,
            Self::Description,
            Self::District,
            Self::Area,
            Self::Shooting,
            Self::Date,
            Self::Year,
            Self::Month,
            Self::Day,
            Self::Hour,
            Self::Street,
            Self::Lat,
            Self::Long,
        ]
    }
}

/// Day of the week, ordered as a calendar week starting on Monday.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    /// Returns all variants of this enum, Monday first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

/// Shooting indicator of an incident.
///
/// `Y` and `N` map to the two flag variants. Any other reported value is
/// kept verbatim in [`Shooting::Other`] so it round-trips unchanged.
#[derive(
    Debug,
    Default,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Shooting {
    /// A shooting was reported.
    Yes,
    /// No shooting was reported, or the indicator was absent.
    #[default]
    No,
    /// Any other reported indicator text.
    Other(String),
}

impl Shooting {
    /// The indicator text as it appears in the export.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Yes => "Y",
            Self::No => "N",
            Self::Other(value) => value,
        }
    }
}

// Hand-written equivalent of `#[derive(EnumString)]`: the derive also emits
// `TryFrom<&str>`, which conflicts with the `From<&str>` impl below.
impl std::str::FromStr for Shooting {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Y" => Self::Yes,
            "N" => Self::No,
            _ => Self::Other(s.into()),
        })
    }
}

impl std::fmt::Display for Shooting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Shooting {
    fn from(value: &str) -> Self {
        value
            .parse()
            .unwrap_or_else(|_| Self::Other(value.to_owned()))
    }
}

impl From<String> for Shooting {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Shooting> for String {
    fn from(value: Shooting) -> Self {
        match value {
            Shooting::Other(value) => value,
            flag => flag.as_str().to_owned(),
        }
    }
}

/// A cleaned incident report.
///
/// Created once by the cleaner and treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Offense category label.
    pub group: String,
    /// Offense description.
    pub description: String,
    /// District code, if reported.
    pub district: Option<String>,
    /// Reporting-area code, if reported.
    pub area: Option<String>,
    /// Shooting flag, `N` when the raw indicator was absent.
    pub shooting: Shooting,
    /// When the incident occurred.
    pub date: NaiveDateTime,
    /// Occurrence year.
    pub year: i32,
    /// Occurrence month (1-12).
    pub month: u32,
    /// Occurrence weekday.
    pub day: Weekday,
    /// Occurrence hour (0-23).
    pub hour: u32,
    /// Street name, if reported.
    pub street: Option<String>,
    /// Latitude. `None` when missing or the source sentinel.
    #[serde(rename = "Lat")]
    pub lat: Option<f64>,
    /// Longitude. `None` when missing or the source sentinel.
    #[serde(rename = "Long")]
    pub long: Option<f64>,
}

impl IncidentRecord {
    /// Returns `true` if this record has no value for `field`.
    ///
    /// Non-nullable fields always hold a value.
    #[must_use]
    pub const fn is_missing(&self, field: CanonicalField) -> bool {
        match field {
            CanonicalField::District => self.district.is_none(),
            CanonicalField::Area => self.area.is_none(),
            CanonicalField::Street => self.street.is_none(),
            CanonicalField::Lat => self.lat.is_none(),
            CanonicalField::Long => self.long.is_none(),
            CanonicalField::Group
            | CanonicalField::Description
            | CanonicalField::Shooting
            | CanonicalField::Date
            | CanonicalField::Year
            | CanonicalField::Month
            | CanonicalField::Day
            | CanonicalField::Hour => false,
        }
    }

    /// Returns both coordinates when present.
    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.long) {
            (Some(lat), Some(long)) => Some((lat, long)),
            _ => None,
        }
    }
}
