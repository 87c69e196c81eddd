#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived tables over the cleaned incident dataset.
//!
//! [`temporal`] builds the count-per-day series for a year, [`holidays`]
//! provides the fixed reference calendar drawn over that series, and
//! [`breakdown`] produces the exploratory per-group, per-hour, per-weekday,
//! per-month and spatial tables. All functions borrow the dataset and
//! return new values.

pub mod breakdown;
pub mod holidays;
pub mod temporal;

pub use breakdown::breakdowns;
pub use holidays::{HolidayError, HolidayOverlay};
pub use temporal::{daily_counts, day_of_year};
