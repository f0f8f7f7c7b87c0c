//! Payroll report models.
//!
//! [`PayrollTotals`] is the commutative sum of a set of payslips;
//! [`PayrollReport`] adds one row per payslip in ledger order.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, round_money};

/// Period totals across a set of payslips, at full precision.
///
/// # Example
///
/// ```
/// use paysphere::models::PayrollTotals;
///
/// let totals = PayrollTotals::default();
/// assert_eq!(totals.headcount, 0);
/// assert!(totals.net_pay.is_zero());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Number of payslips summed.
    pub headcount: usize,
    /// Total regular hours.
    pub hours_worked: Decimal,
    /// Total overtime hours.
    pub overtime_hours: Decimal,
    /// Total basic pay.
    pub basic_pay: Decimal,
    /// Total overtime pay.
    pub overtime_pay: Decimal,
    /// Total incentives.
    pub incentives: Decimal,
    /// Total bonuses.
    pub bonus: Decimal,
    /// Total earnings.
    pub total_earnings: Decimal,
    /// Total salary advances.
    pub salary_advance: Decimal,
    /// Total social-security contributions.
    pub social_security: Decimal,
    /// Total health-insurance contributions.
    pub health_insurance: Decimal,
    /// Total housing-fund contributions.
    pub housing_fund: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Total net pay.
    pub net_pay: Decimal,
}

/// One line of the payroll report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRow {
    /// The employee's identifier.
    pub employee_id: EmployeeId,
    /// The employee's name.
    pub name: String,
    /// The employee's department name.
    pub department: String,
    /// Regular hours worked.
    pub hours_worked: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Total earnings, rounded for display.
    pub total_earnings: Decimal,
    /// Total deductions, rounded for display.
    pub total_deductions: Decimal,
    /// Net pay, rounded for display.
    pub net_pay: Decimal,
}

/// The payroll report: one row per payslip plus period totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Payroll date supplied by the caller, if any.
    pub payroll_date: Option<NaiveDate>,
    /// Rows in the order payslips were first computed.
    pub rows: Vec<PayrollRow>,
    /// Full-precision totals.
    pub totals: PayrollTotals,
}

impl PayrollReport {
    /// Returns the totals rounded to two decimals for display.
    pub fn rounded_totals(&self) -> PayrollTotals {
        let t = &self.totals;
        PayrollTotals {
            headcount: t.headcount,
            hours_worked: t.hours_worked,
            overtime_hours: t.overtime_hours,
            basic_pay: round_money(t.basic_pay),
            overtime_pay: round_money(t.overtime_pay),
            incentives: round_money(t.incentives),
            bonus: round_money(t.bonus),
            total_earnings: round_money(t.total_earnings),
            salary_advance: round_money(t.salary_advance),
            social_security: round_money(t.social_security),
            health_insurance: round_money(t.health_insurance),
            housing_fund: round_money(t.housing_fund),
            total_deductions: round_money(t.total_deductions),
            net_pay: round_money(t.net_pay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rounded_totals_only_touch_money() {
        let report = PayrollReport {
            payroll_date: None,
            rows: vec![],
            totals: PayrollTotals {
                headcount: 2,
                hours_worked: dec("80.125"),
                health_insurance: dec("1316.255"),
                net_pay: dec("63189.245"),
                ..PayrollTotals::default()
            },
        };

        let rounded = report.rounded_totals();
        assert_eq!(rounded.headcount, 2);
        assert_eq!(rounded.hours_worked, dec("80.125"));
        assert_eq!(rounded.health_insurance, dec("1316.26"));
        assert_eq!(rounded.net_pay, dec("63189.25"));
        assert_eq!(report.totals.net_pay, dec("63189.245"));
    }
}
