//! Total salary composition.
//!
//! This module joins the individual calculations into a per-employee
//! [`SalaryBreakdown`] for a reporting period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRow, EmployeeInfo, ReportingPeriod};

use super::base_salary::{base_salary, capped_worked_days};
use super::dearness_allowance::dearness_allowance;
use super::rounding::round_currency;
use super::travel_allowance::travel_allowance;

/// The salary components computed for one employee over one period.
///
/// Every component is carried alongside the inputs that produced it
/// (days in month, cutoff, days worked), so each figure can be re-derived
/// independently from the same attendance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakdown {
    /// The employee this breakdown is for.
    pub employee_id: i64,
    /// Display name, "First Last".
    pub employee_name: String,
    /// Calendar days in the reporting month.
    pub days_in_month: u32,
    /// Fully elapsed days counted toward pro-ration.
    pub day_cutoff: u32,
    /// Days worked after capping at the cutoff.
    pub days_worked: Decimal,
    /// Pro-rated base salary, rounded to whole currency units.
    pub base_salary: Decimal,
    /// Travel allowance, per-vehicle terms rounded independently.
    pub travel_allowance: Decimal,
    /// Capped dearness allowance, unrounded.
    pub dearness_allowance: Decimal,
    /// Approved expense carried through from the attendance stats.
    pub approved_expense: Decimal,
    /// The rounded sum of all components, in whole currency units.
    pub total_salary: Decimal,
}

/// Computes the full salary breakdown for one attendance row.
///
/// The components are composed exactly as the payroll reconciliation
/// expects them: base salary and travel allowance are rounded on their
/// own, dearness allowance and approved expense enter unrounded, and the
/// sum is rounded once more at the end.
///
/// # Arguments
///
/// * `row` - The employee's attendance row for the period
/// * `employee` - The directory entry carrying the daily dearness rate;
///   `None` when the directory has no entry for the employee (rate 0)
/// * `period` - The reporting period
/// * `today` - The current date, used to cut off pro-ration for a month
///   still in progress
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::salary_breakdown;
/// use salary_engine::models::{AttendanceRow, ReportingPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let row: AttendanceRow = serde_json::from_str(r#"{
///     "employeeId": 1,
///     "employeeFirstName": "Asha",
///     "employeeLastName": "Patil",
///     "fullDays": 20,
///     "halfDays": 2,
///     "salary": 30000
/// }"#).unwrap();
///
/// let period = ReportingPeriod::new(2025, 6).unwrap();
/// let today = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let breakdown = salary_breakdown(&row, None, period, today);
/// assert_eq!(breakdown.base_salary, Decimal::from(21000));
/// assert_eq!(breakdown.total_salary, Decimal::from(21000));
/// ```
pub fn salary_breakdown(
    row: &AttendanceRow,
    employee: Option<&EmployeeInfo>,
    period: ReportingPeriod,
    today: NaiveDate,
) -> SalaryBreakdown {
    let days_in_month = period.days_in_month();
    let day_cutoff = period.effective_day_cutoff(today);
    let days_worked = capped_worked_days(row.worked_days(), day_cutoff);

    let base_salary = base_salary(row.monthly_salary(), days_worked, days_in_month);
    let travel_allowance = travel_allowance(
        row.car_distance_km(),
        row.bike_distance_km(),
        row.car_rate(),
        row.bike_rate(),
    );

    let daily_rate = employee
        .map(EmployeeInfo::daily_dearness_allowance)
        .unwrap_or(Decimal::ZERO);
    let dearness_allowance =
        dearness_allowance(daily_rate, row.full_days, row.half_days, day_cutoff);

    let approved_expense = row.approved_expense();
    let total_salary =
        round_currency(base_salary + travel_allowance + dearness_allowance + approved_expense);

    SalaryBreakdown {
        employee_id: row.employee_id,
        employee_name: row.full_name(),
        days_in_month,
        day_cutoff,
        days_worked,
        base_salary,
        travel_allowance,
        dearness_allowance,
        approved_expense,
        total_salary,
    }
}
