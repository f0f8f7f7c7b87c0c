//! Payslip models.
//!
//! This module contains the [`Payslip`] type produced by the payslip engine,
//! the [`PayslipInput`] period values it is computed from, and the rounded
//! [`PayslipSummary`] used for presentation.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EmployeeId;

/// Rounds a monetary amount to two decimal places, half away from zero.
///
/// Only presentation code should call this; stored and aggregated values
/// keep full precision.
///
/// # Examples
///
/// ```
/// use paysphere::models::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(
///     round_money(Decimal::from_str("658.125").unwrap()),
///     Decimal::from_str("658.13").unwrap()
/// );
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// The period values a payslip is computed from. All must be non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipInput {
    /// Regular hours worked in the period.
    pub hours_worked: Decimal,
    /// Overtime hours worked in the period.
    pub overtime_hours: Decimal,
    /// Salary already advanced to the employee; deducted in full.
    #[serde(default)]
    pub salary_advance: Decimal,
    /// Incentive payments.
    #[serde(default)]
    pub incentives: Decimal,
    /// Bonus payments.
    #[serde(default)]
    pub bonus: Decimal,
}

/// The three statutory contributions withheld from basic pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryContributions {
    /// Social-security contribution.
    pub social_security: Decimal,
    /// Health-insurance contribution.
    pub health_insurance: Decimal,
    /// Housing-fund contribution.
    pub housing_fund: Decimal,
}

impl StatutoryContributions {
    /// Sum of all three contributions, or `None` if it leaves the decimal range.
    pub fn checked_total(&self) -> Option<Decimal> {
        self.social_security
            .checked_add(self.health_insurance)?
            .checked_add(self.housing_fund)
    }
}

/// A single step in the audit trail recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Identifier of the rule that was applied.
    pub rule_id: String,
    /// Human-readable name of the rule.
    pub rule_name: String,
    /// Input data for this step.
    pub input: serde_json::Value,
    /// Output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// One computed pay breakdown for one employee.
///
/// Every derived amount is a pure function of `input` and the employee's
/// classification and department. Amounts are stored unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier of this computation.
    pub payslip_id: Uuid,
    /// The employee this payslip belongs to.
    pub employee_id: EmployeeId,
    /// Pay period the payslip was created in, `YYYY-MM`.
    pub pay_period: String,
    /// When the payslip was computed.
    pub created_at: DateTime<Utc>,
    /// The values the payslip was computed from.
    pub input: PayslipInput,
    /// Hourly rate applied for the employee's classification and department.
    pub hourly_rate: Decimal,
    /// Regular pay.
    pub basic_pay: Decimal,
    /// Separately paid overtime.
    pub overtime_pay: Decimal,
    /// Basic pay + overtime pay + incentives + bonus.
    pub total_earnings: Decimal,
    /// Statutory contributions, computed from basic pay only.
    pub contributions: StatutoryContributions,
    /// Salary advance + all contributions.
    pub total_deductions: Decimal,
    /// Total earnings - total deductions. May be negative.
    pub net_pay: Decimal,
    /// Steps taken to reach the result.
    pub audit: Vec<AuditStep>,
}

impl Payslip {
    /// Returns the two-decimal presentation view of this payslip.
    pub fn summary(&self) -> PayslipSummary {
        let total_earnings = round_money(self.total_earnings);
        let total_deductions = round_money(self.total_deductions);
        PayslipSummary {
            employee_id: self.employee_id,
            hours_worked: self.input.hours_worked,
            overtime_hours: self.input.overtime_hours,
            basic_pay: round_money(self.basic_pay),
            overtime_pay: round_money(self.overtime_pay),
            incentives: round_money(self.input.incentives),
            bonus: round_money(self.input.bonus),
            total_earnings,
            salary_advance: round_money(self.input.salary_advance),
            social_security: round_money(self.contributions.social_security),
            health_insurance: round_money(self.contributions.health_insurance),
            housing_fund: round_money(self.contributions.housing_fund),
            total_deductions,
            // Printed totals must reconcile with each other.
            net_pay: total_earnings - total_deductions,
        }
    }
}

/// A payslip with every amount rounded to two decimals for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipSummary {
    /// The employee this payslip belongs to.
    pub employee_id: EmployeeId,
    /// Regular hours worked.
    pub hours_worked: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Regular pay.
    pub basic_pay: Decimal,
    /// Overtime pay.
    pub overtime_pay: Decimal,
    /// Incentive payments.
    pub incentives: Decimal,
    /// Bonus payments.
    pub bonus: Decimal,
    /// Total earnings.
    pub total_earnings: Decimal,
    /// Salary advance.
    pub salary_advance: Decimal,
    /// Social-security contribution.
    pub social_security: Decimal,
    /// Health-insurance contribution.
    pub health_insurance: Decimal,
    /// Housing-fund contribution.
    pub housing_fund: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
}
