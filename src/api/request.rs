//! Request types for the PaySphere API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::NewEmployee;
use crate::validation::validate_date;

/// Request body for `POST /employees`.
///
/// When `id` is present the employee is registered under that identifier,
/// otherwise a fresh one is allocated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Optional caller-supplied identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The employee's fields.
    #[serde(flatten)]
    pub employee: NewEmployee,
}

/// Query string for `GET /payroll`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollQuery {
    /// Date printed on the report, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
}

impl PayrollQuery {
    /// Parses the payroll date, if one was given.
    pub fn payroll_date(&self) -> EngineResult<Option<NaiveDate>> {
        let Some(date) = self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) else {
            return Ok(None);
        };
        validate_date("date", date)?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| EngineError::validation("date", e.to_string()))
    }
}
