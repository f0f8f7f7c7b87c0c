//! PaySphere payroll engine.
//!
//! This crate manages employee records under structured `DEPT-CLASS-SEQ`
//! identifiers, computes per-employee payslips from classification and
//! department hourly rates, and aggregates payslips into company-wide
//! payroll totals. An axum HTTP API exposes every operation.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
pub mod validation;
