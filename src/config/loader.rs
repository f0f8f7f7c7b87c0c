//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Classification;

use super::types::{
    CompanyMetadata, ContributionRates, PayrollConfig, RateConfig, RosterConfig, RosterEntry,
};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/paysphere/
/// ├── company.yaml        # Company metadata
/// ├── rates.yaml          # Hourly rate tables per classification
/// ├── contributions.yaml  # Statutory contribution rates
/// └── roster.yaml         # Optional seed roster
/// ```
///
/// # Example
///
/// ```no_run
/// use paysphere::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/paysphere").unwrap();
/// println!("Loaded payroll for: {}", loader.company().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
    roster: Vec<RosterEntry>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a required file is missing, contains invalid
    /// YAML, or a full-time/part-time table lacks an overtime multiplier.
    /// A missing `roster.yaml` is not an error.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<CompanyMetadata>(&path.join("company.yaml"))?;

        let rates_path = path.join("rates.yaml");
        let rates = Self::load_yaml::<RateConfig>(&rates_path)?;
        Self::check_overtime_multipliers(&rates, &rates_path)?;

        let contributions = Self::load_yaml::<ContributionRates>(&path.join("contributions.yaml"))?;

        let roster_path = path.join("roster.yaml");
        let roster = if roster_path.exists() {
            Self::load_yaml::<RosterConfig>(&roster_path)?.employees
        } else {
            Vec::new()
        };

        Ok(Self {
            config: PayrollConfig::new(metadata, rates, contributions),
            roster,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_overtime_multipliers(rates: &RateConfig, path: &Path) -> EngineResult<()> {
        for classification in [Classification::FullTime, Classification::PartTime] {
            if rates
                .for_classification(classification)
                .overtime_multiplier
                .is_none()
            {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("{classification} rates need an overtime_multiplier"),
                });
            }
        }
        Ok(())
    }

    /// Returns the loaded payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration and seed roster.
    pub fn into_parts(self) -> (PayrollConfig, Vec<RosterEntry>) {
        (self.config, self.roster)
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        self.config.company()
    }

    /// Returns the seed roster, empty when no `roster.yaml` exists.
    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }
}
