//! Calculation logic for the payroll engine.
//!
//! This module contains the salary calculation by classification, the
//! payslip calculation with statutory contributions, and the payroll
//! aggregation used for reporting.

mod payroll;
mod payslip;
mod salary;

pub use payroll::{aggregate, build_report};
pub use payslip::{
    ContributionsResult, calculate_contributions, calculate_payslip, validate_payslip_input,
};
pub use salary::{SalaryBreakdown, compute_salary};
