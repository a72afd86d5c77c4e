//! Dearness allowance calculation.
//!
//! This module provides the capped daily dearness allowance for a
//! reporting period.

use rust_decimal::Decimal;

/// Calculates the dearness allowance for a reporting period.
///
/// Full days accrue the daily rate, half days accrue half the daily rate,
/// and the total is capped at `daily_rate * cutoff_days` so attendance
/// entered ahead of the reporting cutoff cannot over-accrue.
///
/// The result is not rounded here; the total-salary composition rounds
/// the overall sum once.
///
/// # Arguments
///
/// * `daily_rate` - The employee's daily dearness-allowance rate
/// * `full_days` - Count of full attendance days
/// * `half_days` - Count of half attendance days
/// * `cutoff_days` - Fully elapsed days in the period
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::dearness_allowance;
/// use rust_decimal::Decimal;
///
/// // 25 full and 4 half days would accrue 2700, capped at 20 elapsed days
/// let allowance = dearness_allowance(Decimal::from(100), 25, 4, 20);
/// assert_eq!(allowance, Decimal::from(2000));
/// ```
pub fn dearness_allowance(
    daily_rate: Decimal,
    full_days: u32,
    half_days: u32,
    cutoff_days: u32,
) -> Decimal {
    let half_rate = daily_rate / Decimal::from(2);
    let accrued =
        daily_rate * Decimal::from(full_days) + half_rate * Decimal::from(half_days);
    accrued.min(daily_rate * Decimal::from(cutoff_days))
}
