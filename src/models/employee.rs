//! Employee directory model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Static per-employee attributes from the employee directory.
///
/// The directory is fetched once per session and keyed by employee id to
/// join against attendance rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInfo {
    /// Unique identifier of the employee.
    pub id: i64,
    /// Employee first name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Employee last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Daily dearness-allowance rate.
    #[serde(default)]
    pub dearness_allowance: Option<Decimal>,
}

impl EmployeeInfo {
    /// The daily dearness-allowance rate, defaulting to zero when absent.
    pub fn daily_dearness_allowance(&self) -> Decimal {
        self.dearness_allowance.unwrap_or(Decimal::ZERO)
    }
}
