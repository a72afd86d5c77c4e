//! Calculation logic for the Salary Engine.
//!
//! This module contains the pure salary calculation functions: currency
//! rounding, pro-rated base salary, per-vehicle travel allowance, capped
//! dearness allowance, and the total-salary composition that joins them
//! with approved expenses into a [`SalaryBreakdown`].

mod base_salary;
mod dearness_allowance;
mod rounding;
mod salary_breakdown;
mod travel_allowance;

pub use base_salary::{base_salary, capped_worked_days};
pub use dearness_allowance::dearness_allowance;
pub use rounding::round_currency;
pub use salary_breakdown::{SalaryBreakdown, salary_breakdown};
pub use travel_allowance::travel_allowance;
