//! Payroll aggregation.
//!
//! Sums payslips into [`PayrollTotals`] and lays out report rows. Sums are a
//! commutative fold at full precision; only row display values are rounded.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Payslip, PayrollReport, PayrollRow, PayrollTotals, round_money};

/// Sums every numeric field across `payslips`.
///
/// Empty input yields all-zero totals.
///
/// # Errors
///
/// Returns `AmountOverflow` naming the first total that leaves the decimal
/// range.
///
/// # Examples
///
/// ```
/// use paysphere::calculation::aggregate;
///
/// let totals = aggregate(std::iter::empty()).unwrap();
/// assert_eq!(totals.headcount, 0);
/// assert!(totals.total_earnings.is_zero());
/// ```
pub fn aggregate<'a>(
    payslips: impl IntoIterator<Item = &'a Payslip>,
) -> EngineResult<PayrollTotals> {
    payslips
        .into_iter()
        .try_fold(PayrollTotals::default(), |mut totals, payslip| {
            totals.headcount += 1;
            add(&mut totals.hours_worked, payslip.input.hours_worked, "hours_worked")?;
            add(&mut totals.overtime_hours, payslip.input.overtime_hours, "overtime_hours")?;
            add(&mut totals.basic_pay, payslip.basic_pay, "basic_pay")?;
            add(&mut totals.overtime_pay, payslip.overtime_pay, "overtime_pay")?;
            add(&mut totals.incentives, payslip.input.incentives, "incentives")?;
            add(&mut totals.bonus, payslip.input.bonus, "bonus")?;
            add(&mut totals.total_earnings, payslip.total_earnings, "total_earnings")?;
            add(&mut totals.salary_advance, payslip.input.salary_advance, "salary_advance")?;
            add(
                &mut totals.social_security,
                payslip.contributions.social_security,
                "social_security",
            )?;
            add(
                &mut totals.health_insurance,
                payslip.contributions.health_insurance,
                "health_insurance",
            )?;
            add(
                &mut totals.housing_fund,
                payslip.contributions.housing_fund,
                "housing_fund",
            )?;
            add(&mut totals.total_deductions, payslip.total_deductions, "total_deductions")?;
            add(&mut totals.net_pay, payslip.net_pay, "net_pay")?;
            Ok(totals)
        })
}

fn add(total: &mut Decimal, amount: Decimal, field: &str) -> EngineResult<()> {
    *total = total
        .checked_add(amount)
        .ok_or_else(|| EngineError::overflow(field))?;
    Ok(())
}

/// Builds the payroll report from `(employee, payslip)` pairs, keeping their order.
///
/// # Errors
///
/// Fails like [`aggregate`] when a total leaves the decimal range.
pub fn build_report<'a>(
    entries: impl IntoIterator<Item = (&'a Employee, &'a Payslip)>,
    payroll_date: Option<NaiveDate>,
) -> EngineResult<PayrollReport> {
    let entries: Vec<_> = entries.into_iter().collect();
    let totals = aggregate(entries.iter().map(|(_, payslip)| *payslip))?;

    let rows = entries
        .iter()
        .map(|(employee, payslip)| PayrollRow {
            employee_id: employee.id,
            name: employee.name.clone(),
            department: employee.department.clone(),
            hours_worked: payslip.input.hours_worked,
            overtime_hours: payslip.input.overtime_hours,
            total_earnings: round_money(payslip.total_earnings),
            total_deductions: round_money(payslip.total_deductions),
            net_pay: round_money(payslip.net_pay),
        })
        .collect();

    Ok(PayrollReport {
        payroll_date,
        rows,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_payslip;
    use crate::config::PayrollConfig;
    use crate::models::PayslipInput;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            id: id.parse().unwrap(),
            name: name.to_string(),
            job_title: "Analyst".to_string(),
            email: "someone@example.com".to_string(),
            phone: "9123456789".to_string(),
            department: "Finance".to_string(),
            manager_name: "Robert Brown".to_string(),
            hire_date: "2019-06-20".to_string(),
            birth_date: "1994-11-15".to_string(),
        }
    }

    fn payslip(employee: &Employee, hours: &str, overtime: &str, bonus: &str) -> Payslip {
        let input = PayslipInput {
            hours_worked: dec(hours),
            overtime_hours: dec(overtime),
            bonus: dec(bonus),
            ..PayslipInput::default()
        };
        calculate_payslip(employee, &input, &PayrollConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_input_yields_zero_totals() {
        assert_eq!(aggregate(Vec::<&Payslip>::new()).unwrap(), PayrollTotals::default());
    }

    #[test]
    fn test_sums_every_field() {
        let a = employee("FIN-F-0001", "Sofia Martinez");
        let b = employee("FIN-C-0002", "Mary Merrier");
        let slips = [payslip(&a, "160", "4", "100"), payslip(&b, "120", "10", "0")];

        let totals = aggregate(&slips).unwrap();

        assert_eq!(totals.headcount, 2);
        assert_eq!(totals.hours_worked, dec("280"));
        assert_eq!(totals.overtime_hours, dec("14"));
        assert_eq!(totals.bonus, dec("100"));
        assert_eq!(
            totals.total_earnings,
            slips[0].total_earnings + slips[1].total_earnings
        );
        assert_eq!(totals.net_pay, slips[0].net_pay + slips[1].net_pay);
        assert_eq!(
            totals.social_security + totals.health_insurance + totals.housing_fund,
            slips[0].contributions.checked_total().unwrap()
                + slips[1].contributions.checked_total().unwrap()
        );
    }

    #[test]
    fn test_order_does_not_change_totals() {
        let a = employee("FIN-F-0001", "Sofia Martinez");
        let b = employee("FIN-C-0002", "Mary Merrier");
        let c = employee("FIN-F-0003", "Robert Brown");
        let slips = [
            payslip(&a, "160.3", "4.1", "0"),
            payslip(&b, "120.7", "10", "33.33"),
            payslip(&c, "0.01", "0", "0"),
        ];

        let forward = aggregate(&slips).unwrap();
        let backward = aggregate(slips.iter().rev()).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_aggregation_keeps_full_precision() {
        // 7 x 33.57 x 0.0225 = 5.287275 per slip; rounding first would drift.
        let a = employee("HR-P-0001", "Evelyn Carter");
        let slips: Vec<_> = (0..3).map(|_| payslip(&a, "7", "0", "0")).collect();

        let totals = aggregate(&slips).unwrap();
        assert_eq!(totals.health_insurance, dec("15.861825"));
    }

    #[test]
    fn test_report_rows_follow_input_order() {
        let a = employee("FIN-F-0002", "Sofia Martinez");
        let b = employee("FIN-C-0001", "Mary Merrier");
        let slip_a = payslip(&a, "10", "0", "0");
        let slip_b = payslip(&b, "10", "0", "0");

        let date = NaiveDate::from_ymd_opt(2024, 11, 30);
        let report = build_report([(&a, &slip_a), (&b, &slip_b)], date).unwrap();

        let names: Vec<_> = report.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Sofia Martinez", "Mary Merrier"]);
        assert_eq!(report.payroll_date, date);
        assert_eq!(report.totals.headcount, 2);
    }

    #[test]
    fn test_report_rows_are_rounded() {
        let a = employee("HR-P-0001", "Evelyn Carter");
        let slip = payslip(&a, "7", "0", "0");

        let report = build_report([(&a, &slip)], None).unwrap();

        // 7 x 33.57 = 234.99; deductions 8.75% = 20.561625
        assert_eq!(report.rows[0].total_deductions, dec("20.56"));
        assert_eq!(report.totals.total_deductions, dec("20.561625"));
    }

    #[test]
    fn test_total_out_of_range_is_rejected() {
        let a = employee("FIN-F-0001", "Sofia Martinez");
        let mut slip = payslip(&a, "10", "0", "0");
        slip.net_pay = Decimal::MAX;
        let slips = [slip.clone(), slip];

        let result = aggregate(&slips);
        assert_eq!(result, Err(EngineError::overflow("net_pay")));

        let report = build_report([(&a, &slips[0]), (&a, &slips[1])], None);
        assert!(matches!(report, Err(EngineError::AmountOverflow { .. })));
    }
}
