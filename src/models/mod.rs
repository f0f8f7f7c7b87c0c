//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod payroll;
mod payslip;

pub use employee::{
    Classification, DepartmentCode, Employee, EmployeeId, EmployeeUpdate, NewEmployee,
};
pub use payroll::{PayrollReport, PayrollRow, PayrollTotals};
pub use payslip::{
    AuditStep, Payslip, PayslipInput, PayslipSummary, StatutoryContributions, round_money,
};
