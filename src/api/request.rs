//! Request types for the Salary Engine API.
//!
//! This module defines the JSON and query-string request structures for
//! the salary and anomaly endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRow, EmployeeInfo, ReportingPeriod};

/// Request body for the `POST /salary/calculate` endpoint.
///
/// Carries one attendance row together with the directory entry and the
/// reporting period; the calculation is pure and touches no remote
/// service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryCalculationRequest {
    /// The attendance row to compute a breakdown for.
    pub row: AttendanceRow,
    /// The employee's directory entry; omitted when the directory has no
    /// entry (dearness rate 0).
    #[serde(default)]
    pub employee: Option<EmployeeInfo>,
    /// The reporting period.
    pub period: ReportingPeriod,
    /// The date to treat as "today" for the elapsed-day cutoff. Defaults
    /// to the current date.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Query parameters for the `GET /salary/report` endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Reporting year.
    pub year: i32,
    /// Reporting month (1-12).
    pub month: u32,
}

/// Request body for the `POST /anomalies/resolve` endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveAnomaliesRequest {
    /// The employee to resolve anomalies for.
    pub employee_id: i64,
    /// Reporting year.
    pub year: i32,
    /// Reporting month (1-12).
    pub month: u32,
}

/// Query parameters for the `GET /anomalies/count` endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyCountQuery {
    /// The employee to count anomalies for.
    pub employee_id: i64,
    /// Reporting year.
    pub year: i32,
    /// Reporting month (1-12).
    pub month: u32,
}
