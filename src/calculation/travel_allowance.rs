//! Travel allowance calculation.

use rust_decimal::Decimal;

use super::rounding::round_currency;

/// Calculates the travel allowance for a reporting period.
///
/// Car and bike reimbursements are computed as distance times the
/// per-kilometre rate and each term is rounded to whole currency units
/// independently before summation. The per-term rounding is part of the
/// contract: downstream systems reconcile against per-vehicle figures, so
/// do not collapse this into a single rounding of the sum.
///
/// # Arguments
///
/// * `car_km` - Kilometres travelled by car
/// * `bike_km` - Kilometres travelled by bike
/// * `car_rate` - Reimbursement per kilometre by car
/// * `bike_rate` - Reimbursement per kilometre by bike
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::travel_allowance;
/// use rust_decimal::Decimal;
///
/// let allowance = travel_allowance(
///     Decimal::from(10),
///     Decimal::from(5),
///     Decimal::from(12),
///     Decimal::from(6),
/// );
/// assert_eq!(allowance, Decimal::from(150));
/// ```
pub fn travel_allowance(
    car_km: Decimal,
    bike_km: Decimal,
    car_rate: Decimal,
    bike_rate: Decimal,
) -> Decimal {
    let car_allowance = round_currency(car_km * car_rate);
    let bike_allowance = round_currency(bike_km * bike_rate);
    car_allowance + bike_allowance
}
