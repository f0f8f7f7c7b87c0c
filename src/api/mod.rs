//! HTTP API module for PaySphere.
//!
//! This module provides the REST endpoints for managing employees, computing
//! payslips and reporting payroll totals.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CreateEmployeeRequest, PayrollQuery};
pub use response::{ApiError, ApiErrorResponse, EmployeeResponse, PayrollResponse, PayslipResponse};
pub use state::AppState;
