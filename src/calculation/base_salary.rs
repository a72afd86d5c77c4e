//! Pro-rated base salary calculation.
//!
//! This module provides functions for pro-rating a full-month salary rate
//! over the days an employee actually worked, capped at the number of
//! fully elapsed days in the reporting period.

use rust_decimal::Decimal;

use super::rounding::round_currency;

/// Caps the worked-day total at the elapsed-day cutoff.
///
/// Attendance can be entered ahead of the reporting cutoff (e.g. a half
/// day logged for today before the day is over), so the worked-day total
/// is clamped to the number of fully elapsed days.
///
/// # Arguments
///
/// * `worked_days` - Full days plus half a day per half day
/// * `cutoff_days` - Fully elapsed days in the period
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::capped_worked_days;
/// use rust_decimal::Decimal;
///
/// let worked = Decimal::from(21);
/// assert_eq!(capped_worked_days(worked, 30), Decimal::from(21));
/// assert_eq!(capped_worked_days(worked, 14), Decimal::from(14));
/// ```
pub fn capped_worked_days(worked_days: Decimal, cutoff_days: u32) -> Decimal {
    worked_days.min(Decimal::from(cutoff_days))
}

/// Calculates the pro-rated base salary for a reporting period.
///
/// The full-month salary rate is divided by the number of calendar days in
/// the month to obtain a per-day salary, multiplied by the days worked,
/// and rounded to whole currency units.
///
/// # Arguments
///
/// * `full_month_salary` - The full-month base salary rate (zero when the
///   employee has no rate on file)
/// * `days_worked` - Days worked, already capped at the elapsed-day cutoff
/// * `days_in_month` - Calendar days in the month; caller-guaranteed
///   greater than zero (a validated [`ReportingPeriod`] cannot produce
///   zero)
///
/// [`ReportingPeriod`]: crate::models::ReportingPeriod
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::base_salary;
/// use rust_decimal::Decimal;
///
/// let salary = base_salary(Decimal::from(30000), Decimal::from(21), 30);
/// assert_eq!(salary, Decimal::from(21000));
/// ```
pub fn base_salary(
    full_month_salary: Decimal,
    days_worked: Decimal,
    days_in_month: u32,
) -> Decimal {
    let per_day_salary = full_month_salary / Decimal::from(days_in_month);
    round_currency(per_day_salary * days_worked)
}
