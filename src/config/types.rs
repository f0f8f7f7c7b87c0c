//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. [`PayrollConfig::default`]
//! carries the built-in company tables so an engine can run without files.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Classification, DepartmentCode, NewEmployee, PayslipInput};

/// Metadata about the company running the payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMetadata {
    /// The company name printed on reports.
    pub name: String,
    /// Currency symbol used when amounts are displayed.
    pub currency_symbol: String,
    /// Country calling code shown in front of phone numbers.
    pub phone_prefix: String,
}

impl Default for CompanyMetadata {
    fn default() -> Self {
        Self {
            name: "PaySphere".to_string(),
            currency_symbol: "₱".to_string(),
            phone_prefix: "+63".to_string(),
        }
    }
}

/// Hourly rates for one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRates {
    /// Rate used when the department is not in `departments`.
    pub fallback: Decimal,
    /// Overtime multiplier. Required for full-time and part-time; ignored
    /// for contract and intern, whose overtime is not separately paid.
    #[serde(default)]
    pub overtime_multiplier: Option<Decimal>,
    /// Hourly rate per department.
    pub departments: HashMap<DepartmentCode, Decimal>,
}

impl ClassificationRates {
    /// Returns the department's rate, or the fallback for an unknown one.
    pub fn rate_for(&self, department: Option<DepartmentCode>) -> Decimal {
        department
            .and_then(|dept| self.departments.get(&dept).copied())
            .unwrap_or(self.fallback)
    }

    fn from_table(fallback: i64, overtime: Option<i64>, rates: [i64; 5]) -> Self {
        Self {
            fallback: Decimal::new(fallback, 2),
            overtime_multiplier: overtime.map(|m| Decimal::new(m, 2)),
            departments: DepartmentCode::ALL
                .into_iter()
                .zip(rates.map(|r| Decimal::new(r, 2)))
                .collect(),
        }
    }
}

/// Rate tables for every classification (`rates.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Full-time rates.
    pub full_time: ClassificationRates,
    /// Part-time rates.
    pub part_time: ClassificationRates,
    /// Contract rates.
    pub contract: ClassificationRates,
    /// Intern rates.
    pub intern: ClassificationRates,
}

impl RateConfig {
    /// Returns the rate table for a classification.
    pub fn for_classification(&self, classification: Classification) -> &ClassificationRates {
        match classification {
            Classification::FullTime => &self.full_time,
            Classification::PartTime => &self.part_time,
            Classification::Contract => &self.contract,
            Classification::Intern => &self.intern,
        }
    }
}

impl Default for RateConfig {
    // Department order follows DepartmentCode::ALL: HR, IT, FIN, MKT, ENG.
    fn default() -> Self {
        Self {
            full_time: ClassificationRates::from_table(
                10000,
                Some(150),
                [6713, 11700, 16800, 11100, 14400],
            ),
            part_time: ClassificationRates::from_table(
                5000,
                Some(125),
                [3357, 5850, 8400, 5550, 7200],
            ),
            contract: ClassificationRates::from_table(7500, None, [5035, 8775, 12600, 8325, 10800]),
            intern: ClassificationRates::from_table(3750, None, [2517, 4388, 6300, 4163, 5400]),
        }
    }
}

/// Statutory contribution rates, as fractions of basic pay (`contributions.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    /// Social-security rate.
    pub social_security: Decimal,
    /// Health-insurance rate.
    pub health_insurance: Decimal,
    /// Housing-fund rate.
    pub housing_fund: Decimal,
}

impl Default for ContributionRates {
    fn default() -> Self {
        Self {
            social_security: Decimal::new(45, 3),
            health_insurance: Decimal::new(225, 4),
            housing_fund: Decimal::new(2, 2),
        }
    }
}

/// A predefined employee with a fixed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// The identifier to register the employee under.
    pub id: String,
    /// The employee's fields.
    #[serde(flatten)]
    pub fields: NewEmployee,
    /// Period values for the employee's first payslip, if any.
    #[serde(default)]
    pub payslip: Option<PayslipInput>,
}

/// Seed roster file structure (`roster.yaml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterConfig {
    /// Employees to register on first start.
    #[serde(default)]
    pub employees: Vec<RosterEntry>,
}

/// The complete payroll configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollConfig {
    /// Company metadata.
    metadata: CompanyMetadata,
    /// Hourly rate tables.
    rates: RateConfig,
    /// Statutory contribution rates.
    contributions: ContributionRates,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: CompanyMetadata,
        rates: RateConfig,
        contributions: ContributionRates,
    ) -> Self {
        Self {
            metadata,
            rates,
            contributions,
        }
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        &self.metadata
    }

    /// Returns the hourly rate tables.
    pub fn rates(&self) -> &RateConfig {
        &self.rates
    }

    /// Returns the statutory contribution rates.
    pub fn contributions(&self) -> &ContributionRates {
        &self.contributions
    }
}
