//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to whole units, half away from zero.
///
/// All salary figures in the engine are integer currency amounts. Halves
/// round away from zero (4.5 becomes 5), matching the upstream services
/// this engine reconciles against; the default banker's rounding would
/// send 4.5 to 4.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(45, 1)), Decimal::from(5));
/// assert_eq!(round_currency(Decimal::new(44, 1)), Decimal::from(4));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
