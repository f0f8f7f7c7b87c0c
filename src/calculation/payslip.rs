//! Payslip calculation.
//!
//! This module turns an employee and a period's [`PayslipInput`] into a full
//! [`Payslip`]: salary, statutory contributions, totals and net pay.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::{ContributionRates, PayrollConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Employee, Payslip, PayslipInput, StatutoryContributions};
use crate::validation::validate_non_negative;

use super::salary::compute_salary;

/// The result of computing statutory contributions, including the audit step.
#[derive(Debug, Clone)]
pub struct ContributionsResult {
    /// The computed contributions.
    pub contributions: StatutoryContributions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the three statutory contributions from basic pay.
///
/// Incentives, bonus and overtime are not subject to contributions.
///
/// # Errors
///
/// Returns `AmountOverflow` when a contribution leaves the decimal range.
pub fn calculate_contributions(
    basic_pay: Decimal,
    rates: &ContributionRates,
    step_number: u32,
) -> EngineResult<ContributionsResult> {
    let share = |field: &str, rate: Decimal| {
        basic_pay
            .checked_mul(rate)
            .ok_or_else(|| EngineError::overflow(field))
    };
    let contributions = StatutoryContributions {
        social_security: share("social_security", rates.social_security)?,
        health_insurance: share("health_insurance", rates.health_insurance)?,
        housing_fund: share("housing_fund", rates.housing_fund)?,
    };
    let total = contributions
        .checked_total()
        .ok_or_else(|| EngineError::overflow("total_deductions"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_contributions".to_string(),
        rule_name: "Statutory Contributions".to_string(),
        input: serde_json::json!({
            "basic_pay": basic_pay.to_string(),
            "social_security_rate": rates.social_security.to_string(),
            "health_insurance_rate": rates.health_insurance.to_string(),
            "housing_fund_rate": rates.housing_fund.to_string()
        }),
        output: serde_json::json!({
            "social_security": contributions.social_security.to_string(),
            "health_insurance": contributions.health_insurance.to_string(),
            "housing_fund": contributions.housing_fund.to_string()
        }),
        reasoning: format!(
            "Contributions on basic pay ${} total ${}",
            basic_pay, total
        ),
    };

    Ok(ContributionsResult {
        contributions,
        audit_step,
    })
}

/// Rejects the first negative value among the five payslip inputs.
pub fn validate_payslip_input(input: &PayslipInput) -> EngineResult<()> {
    validate_non_negative("hours_worked", input.hours_worked)?;
    validate_non_negative("overtime_hours", input.overtime_hours)?;
    validate_non_negative("salary_advance", input.salary_advance)?;
    validate_non_negative("incentives", input.incentives)?;
    validate_non_negative("bonus", input.bonus)?;
    Ok(())
}

/// Computes a payslip for `employee`.
///
/// The rate is looked up with the department encoded in the employee's
/// identifier. Net pay is not clamped and may be negative when the salary
/// advance exceeds earnings.
///
/// # Errors
///
/// Returns `InvalidInput` naming the first negative input, or
/// `AmountOverflow` when an amount leaves the decimal range.
pub fn calculate_payslip(
    employee: &Employee,
    input: &PayslipInput,
    config: &PayrollConfig,
) -> EngineResult<Payslip> {
    validate_payslip_input(input)?;

    let mut audit = Vec::with_capacity(3);

    let salary = compute_salary(
        employee.classification(),
        employee.id.department().code(),
        input.hours_worked,
        input.overtime_hours,
        config.rates(),
        1,
    )?;
    audit.push(salary.audit_step);

    let statutory = calculate_contributions(salary.basic_pay, config.contributions(), 2)?;
    let contributions = statutory.contributions;
    audit.push(statutory.audit_step);

    let total_earnings = [salary.overtime_pay, input.incentives, input.bonus]
        .into_iter()
        .try_fold(salary.basic_pay, Decimal::checked_add)
        .ok_or_else(|| EngineError::overflow("total_earnings"))?;
    let total_deductions = contributions
        .checked_total()
        .and_then(|total| input.salary_advance.checked_add(total))
        .ok_or_else(|| EngineError::overflow("total_deductions"))?;
    let net_pay = total_earnings
        .checked_sub(total_deductions)
        .ok_or_else(|| EngineError::overflow("net_pay"))?;

    audit.push(AuditStep {
        step_number: 3,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "incentives": input.incentives.to_string(),
            "bonus": input.bonus.to_string(),
            "salary_advance": input.salary_advance.to_string()
        }),
        output: serde_json::json!({
            "total_earnings": total_earnings.to_string(),
            "total_deductions": total_deductions.to_string(),
            "net_pay": net_pay.to_string()
        }),
        reasoning: format!(
            "Earnings ${} less deductions ${} gives net pay ${}",
            total_earnings, total_deductions, net_pay
        ),
    });

    let created_at = Utc::now();
    Ok(Payslip {
        payslip_id: Uuid::new_v4(),
        employee_id: employee.id,
        pay_period: created_at.format("%Y-%m").to_string(),
        created_at,
        input: *input,
        hourly_rate: salary.hourly_rate,
        basic_pay: salary.basic_pay,
        overtime_pay: salary.overtime_pay,
        total_earnings,
        contributions,
        total_deductions,
        net_pay,
        audit,
    })
}
