//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load payroll configuration from YAML
//! files: company metadata, hourly rate tables, statutory contribution rates
//! and an optional seed roster.
//!
//! # Example
//!
//! ```no_run
//! use paysphere::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/paysphere").unwrap();
//! println!("Company: {}", config.company().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ClassificationRates, CompanyMetadata, ContributionRates, PayrollConfig, RateConfig,
    RosterConfig, RosterEntry,
};
