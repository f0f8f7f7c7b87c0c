//! Response types for the PaySphere API.
//!
//! This module defines the JSON bodies returned by the handlers and the
//! mapping from engine errors to HTTP error responses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{
    Classification, Employee, PayrollReport, PayrollRow, PayrollTotals, Payslip, PayslipSummary,
};

/// An employee together with the classification encoded in their identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    /// The stored employee record.
    #[serde(flatten)]
    pub employee: Employee,
    /// The employee's classification.
    pub classification: Classification,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            employee: employee.clone(),
            classification: employee.classification(),
        }
    }
}

/// A payslip with its full-precision values and the rounded summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipResponse {
    /// Currency symbol for display.
    pub currency_symbol: String,
    /// Two-decimal presentation view.
    pub summary: PayslipSummary,
    /// The stored payslip.
    pub payslip: Payslip,
}

impl PayslipResponse {
    /// Builds the response for `payslip`.
    pub fn new(payslip: &Payslip, currency_symbol: &str) -> Self {
        Self {
            currency_symbol: currency_symbol.to_string(),
            summary: payslip.summary(),
            payslip: payslip.clone(),
        }
    }
}

/// Body of `GET /payroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollResponse {
    /// Company name printed on the report.
    pub company: String,
    /// Currency symbol for display.
    pub currency_symbol: String,
    /// Date printed on the report.
    pub payroll_date: Option<NaiveDate>,
    /// One row per employee with a payslip.
    pub rows: Vec<PayrollRow>,
    /// Totals rounded to two decimals.
    pub totals: PayrollTotals,
    /// Totals at full precision.
    pub precise_totals: PayrollTotals,
}

impl PayrollResponse {
    /// Builds the response for `report`.
    pub fn new(report: PayrollReport, company: &str, currency_symbol: &str) -> Self {
        Self {
            company: company.to_string(),
            currency_symbol: currency_symbol.to_string(),
            payroll_date: report.payroll_date,
            totals: report.rounded_totals(),
            rows: report.rows,
            precise_totals: report.totals,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the error for an employee without a payslip.
    pub fn payslip_not_found(id: &str) -> Self {
        Self::with_details(
            "PAYSLIP_NOT_FOUND",
            format!("No payslip for employee: {}", id),
            "Create a payslip for this employee first",
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a `400 Bad Request` response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// Creates a `404 Not Found` response.
    pub fn not_found(error: ApiError) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::Validation { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("VALIDATION_ERROR", message, field),
            },
            EngineError::InvalidInput { field } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("INVALID_INPUT", message, field),
            },
            EngineError::AmountOverflow { field } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("AMOUNT_OUT_OF_RANGE", message, field),
            },
            EngineError::NotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", message),
            },
            EngineError::DuplicateIdentifier { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "DUPLICATE_IDENTIFIER",
                    message,
                    "The identifier's sequence number has already been issued",
                ),
            },
            EngineError::IdentifierExhausted => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("IDENTIFIER_EXHAUSTED", message),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
        }
    }
}
