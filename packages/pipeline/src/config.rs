//! Pipeline settings loaded from TOML.

use std::path::Path;

use boston_crime_clean::CleanOptions;
use boston_crime_incident_models::PART_ONE;
use serde::Deserialize;

use crate::PipelineError;

/// Settings for one pipeline run. Every field has a default, so an empty
/// TOML document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Years retained by the cleaner.
    pub years: Vec<i32>,
    /// Severity-tier marker a row must carry exactly.
    pub severity_marker: String,
    /// Year the daily series is computed for.
    pub target_year: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            years: vec![2016, 2017],
            severity_marker: PART_ONE.to_string(),
            target_year: 2017,
        }
    }
}

impl PipelineConfig {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the text is not valid TOML or
    /// names an unknown setting.
    pub fn from_toml_str(s: &str) -> Result<Self, PipelineError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Filter settings handed to the cleaner.
    #[must_use]
    pub fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            years: self.years.clone(),
            severity_marker: self.severity_marker.clone(),
        }
    }
}
