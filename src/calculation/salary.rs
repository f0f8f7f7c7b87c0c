//! Salary calculation by classification.
//!
//! This module selects the hourly rate for an employee's classification and
//! department and applies the classification's regular and overtime formula.

use rust_decimal::Decimal;

use crate::config::RateConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Classification, DepartmentCode};

/// Regular and overtime pay for one period.
#[derive(Debug, Clone)]
pub struct SalaryBreakdown {
    /// The hourly rate that was applied.
    pub hourly_rate: Decimal,
    /// Regular pay.
    pub basic_pay: Decimal,
    /// Separately paid overtime.
    pub overtime_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes basic and overtime pay for a classification.
///
/// | Classification | Regular | Overtime |
/// |---|---|---|
/// | FullTime | hours × rate | overtime × rate × multiplier (1.5) |
/// | PartTime | hours × rate | overtime × rate × multiplier (1.25) |
/// | Contract | (hours + overtime) × rate | none |
/// | Intern | hours × rate | none |
///
/// `department` may be a code (`IT`) or a full name (`Information
/// Technology`); anything else is paid the classification's fallback rate.
/// No overtime is paid when `hours_worked` is zero.
///
/// # Errors
///
/// Returns `AmountOverflow` when a product leaves the decimal range.
///
/// # Examples
///
/// ```
/// use paysphere::calculation::compute_salary;
/// use paysphere::config::RateConfig;
/// use paysphere::models::Classification;
/// use rust_decimal::Decimal;
///
/// let result = compute_salary(
///     Classification::FullTime,
///     "IT",
///     Decimal::from(250),
///     Decimal::from(8),
///     &RateConfig::default(),
///     1,
/// )
/// .unwrap();
/// assert_eq!(result.basic_pay, Decimal::from(29250));
/// assert_eq!(result.overtime_pay, Decimal::from(1404));
/// ```
pub fn compute_salary(
    classification: Classification,
    department: &str,
    hours_worked: Decimal,
    overtime_hours: Decimal,
    rates: &RateConfig,
    step_number: u32,
) -> EngineResult<SalaryBreakdown> {
    let resolved = DepartmentCode::resolve(department);
    let table = rates.for_classification(classification);
    let hourly_rate = table.rate_for(resolved);

    let (basic_pay, overtime_pay, formula) = match classification {
        Classification::FullTime | Classification::PartTime => {
            let multiplier = table.overtime_multiplier.unwrap_or(Decimal::ONE);
            let overtime_pay = if hours_worked.is_zero() {
                Decimal::ZERO
            } else {
                overtime_hours
                    .checked_mul(hourly_rate)
                    .and_then(|v| v.checked_mul(multiplier))
                    .ok_or_else(|| EngineError::overflow("overtime_pay"))?
            };
            (
                regular_pay(hours_worked, hourly_rate)?,
                overtime_pay,
                format!("hours x rate, overtime x rate x {}", multiplier),
            )
        }
        Classification::Contract => {
            let hours = hours_worked
                .checked_add(overtime_hours)
                .ok_or_else(|| EngineError::overflow("basic_pay"))?;
            (
                regular_pay(hours, hourly_rate)?,
                Decimal::ZERO,
                "(hours + overtime) x rate".to_string(),
            )
        }
        Classification::Intern => (
            regular_pay(hours_worked, hourly_rate)?,
            Decimal::ZERO,
            "hours x rate, overtime unpaid".to_string(),
        ),
    };

    let rate_source = match resolved {
        Some(dept) => dept.code().to_string(),
        None => "fallback".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_calculation".to_string(),
        rule_name: "Salary Calculation".to_string(),
        input: serde_json::json!({
            "classification": classification,
            "department": department,
            "hours_worked": hours_worked.to_string(),
            "overtime_hours": overtime_hours.to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": hourly_rate.to_string(),
            "rate_source": rate_source,
            "basic_pay": basic_pay.to_string(),
            "overtime_pay": overtime_pay.to_string()
        }),
        reasoning: format!(
            "{} rate ${} ({}): {}",
            classification, hourly_rate, rate_source, formula
        ),
    };

    Ok(SalaryBreakdown {
        hourly_rate,
        basic_pay,
        overtime_pay,
        audit_step,
    })
}

fn regular_pay(hours: Decimal, hourly_rate: Decimal) -> EngineResult<Decimal> {
    hours
        .checked_mul(hourly_rate)
        .ok_or_else(|| EngineError::overflow("basic_pay"))
}
