//! Attendance models.
//!
//! This module defines the per-employee monthly attendance row as returned
//! by the field-ops attendance log, including the nested expense stats.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense statistics nested under an attendance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    /// Expense amount approved for the employee in the window.
    #[serde(default)]
    pub approved_expense: Option<Decimal>,
}

/// Per-employee attendance totals for a (year, month) window.
///
/// Fetched fresh for every period selection and treated as immutable for
/// the duration of a calculation pass. Monetary and distance fields are
/// nullable upstream; the accessor methods default them to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRow {
    /// Identifier of the employee this row belongs to.
    pub employee_id: i64,
    /// Employee first name, for display and sorting.
    pub employee_first_name: String,
    /// Employee last name, for display and sorting.
    pub employee_last_name: String,
    /// Count of full attendance days in the window.
    pub full_days: u32,
    /// Count of half attendance days in the window. Each contributes 0.5 day.
    pub half_days: u32,
    /// Full-month base salary rate.
    #[serde(default)]
    pub salary: Option<Decimal>,
    /// Kilometres travelled by car in the window.
    #[serde(default)]
    pub distance_travelled_by_car: Option<Decimal>,
    /// Kilometres travelled by bike in the window.
    #[serde(default)]
    pub distance_travelled_by_bike: Option<Decimal>,
    /// Reimbursement rate per kilometre travelled by car.
    #[serde(default)]
    pub price_per_km_car: Option<Decimal>,
    /// Reimbursement rate per kilometre travelled by bike.
    #[serde(default)]
    pub price_per_km_bike: Option<Decimal>,
    /// Nested expense statistics.
    #[serde(default, rename = "statsDto")]
    pub stats: Option<AttendanceStats>,
}

impl AttendanceRow {
    /// The full-month salary rate, defaulting to zero when absent.
    pub fn monthly_salary(&self) -> Decimal {
        self.salary.unwrap_or(Decimal::ZERO)
    }

    /// Kilometres travelled by car, defaulting to zero when absent.
    pub fn car_distance_km(&self) -> Decimal {
        self.distance_travelled_by_car.unwrap_or(Decimal::ZERO)
    }

    /// Kilometres travelled by bike, defaulting to zero when absent.
    pub fn bike_distance_km(&self) -> Decimal {
        self.distance_travelled_by_bike.unwrap_or(Decimal::ZERO)
    }

    /// Per-kilometre car rate, defaulting to zero when absent.
    pub fn car_rate(&self) -> Decimal {
        self.price_per_km_car.unwrap_or(Decimal::ZERO)
    }

    /// Per-kilometre bike rate, defaulting to zero when absent.
    pub fn bike_rate(&self) -> Decimal {
        self.price_per_km_bike.unwrap_or(Decimal::ZERO)
    }

    /// Approved expense from the nested stats, defaulting to zero.
    pub fn approved_expense(&self) -> Decimal {
        self.stats
            .as_ref()
            .and_then(|stats| stats.approved_expense)
            .unwrap_or(Decimal::ZERO)
    }

    /// Days worked in the window: full days plus half a day per half day.
    pub fn worked_days(&self) -> Decimal {
        Decimal::from(self.full_days) + Decimal::new(5, 1) * Decimal::from(self.half_days)
    }

    /// The employee's display name, "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.employee_first_name, self.employee_last_name)
    }
}
