#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reads the incident-report CSV export into [`RawRow`]s.
//!
//! The export is Latin-1 encoded, so the file is decoded byte-for-byte into
//! UTF-8 before CSV parsing. Every data row becomes a map keyed by the
//! trimmed header names; short rows leave their trailing columns empty.

use std::path::Path;

use boston_crime_incident_models::{RawField, RawRow};

/// Errors from reading the export.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// CSV parsing error.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// Path to the CSV file.
        path: String,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// I/O error reading the file.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file has no header row.
    #[error("CSV file {path} contains no header row")]
    MissingHeaders {
        /// Path to the CSV file.
        path: String,
    },
}

/// UTF-8 byte order mark some exports are saved with.
const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

/// Decodes Latin-1 (ISO-8859-1) bytes. Every byte maps to the Unicode code
/// point of the same value, so decoding cannot fail.
#[must_use]
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Reads and decodes the export at `path`.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or is not valid CSV.
pub fn read_export(path: &Path) -> Result<Vec<RawRow>, IngestError> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: display.clone(),
        source,
    })?;
    log::debug!("Read {} bytes from {display}", bytes.len());

    let body = bytes.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&bytes);
    let text = decode_latin1(body);
    let rows = parse_rows(&text).map_err(|e| match e {
        ParseRowsError::Csv(source) => IngestError::Csv {
            path: display.clone(),
            source,
        },
        ParseRowsError::MissingHeaders => IngestError::MissingHeaders {
            path: display.clone(),
        },
    })?;

    log::info!("Parsed {} rows from {display}", rows.len());
    Ok(rows)
}

enum ParseRowsError {
    Csv(csv::Error),
    MissingHeaders,
}

impl From<csv::Error> for ParseRowsError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

fn parse_rows(text: &str) -> Result<Vec<RawRow>, ParseRowsError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(ParseRowsError::MissingHeaders);
    }

    for field in RawField::all() {
        if !headers.iter().any(|h| h == field.column()) {
            log::warn!("Export has no {field} column");
        }
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), record.get(i).unwrap_or("").to_owned()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
