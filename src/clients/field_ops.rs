//! Field-ops service client.
//!
//! This module defines the [`FieldOpsClient`] trait covering the four
//! field-ops operations the engine depends on, and the reqwest-backed
//! [`HttpFieldOpsClient`] implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::FieldOpsConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRow, EmployeeInfo, TravelAllowanceRecord, TravelAllowanceUpsert};

/// The field-ops operations consumed by the engine.
///
/// Implementations must be cheap to share behind an `Arc`; the engine
/// never caches responses beyond the current calculation pass.
#[async_trait]
pub trait FieldOpsClient: Send + Sync {
    /// Fetches per-employee attendance rows for an inclusive date range.
    async fn attendance_for_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRow>>;

    /// Fetches one employee's travel record for an inclusive date range.
    async fn travel_allowance(
        &self,
        employee_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<TravelAllowanceRecord>;

    /// Fetches the employee directory, keyed by employee id.
    async fn employees(&self) -> EngineResult<HashMap<i64, EmployeeInfo>>;

    /// Upserts corrected travel distances for one employee-day.
    async fn submit_travel_allowance(&self, upsert: &TravelAllowanceUpsert) -> EngineResult<()>;
}

/// HTTP implementation of [`FieldOpsClient`] against the field-ops REST API.
///
/// All requests carry the configured bearer token. Fetch failures map to
/// [`EngineError::DataUnavailable`] and upsert failures to
/// [`EngineError::SubmissionFailure`]; callers decide how to degrade.
#[derive(Debug, Clone)]
pub struct HttpFieldOpsClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl HttpFieldOpsClient {
    /// Creates a client for the configured field-ops service.
    pub fn new(config: &FieldOpsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> EngineResult<T> {
        let unavailable = |message: String| EngineError::DataUnavailable {
            resource: resource.to_string(),
            message,
        };

        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.bearer_token)
            .query(query)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(unavailable(format!("status {}", response.status())));
        }

        response.json().await.map_err(|e| unavailable(e.to_string()))
    }
}

#[async_trait]
impl FieldOpsClient for HttpFieldOpsClient {
    async fn attendance_for_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRow>> {
        self.get_json(
            "attendance-log",
            "attendance-log/getForRange",
            &[("start", start.to_string()), ("end", end.to_string())],
        )
        .await
    }

    async fn travel_allowance(
        &self,
        employee_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<TravelAllowanceRecord> {
        self.get_json(
            "travel-allowance",
            "travel-allowance/getForEmployeeAndDate",
            &[
                ("employeeId", employee_id.to_string()),
                ("start", start.to_string()),
                ("end", end.to_string()),
            ],
        )
        .await
    }

    async fn employees(&self) -> EngineResult<HashMap<i64, EmployeeInfo>> {
        let directory: Vec<EmployeeInfo> =
            self.get_json("employee", "employee/getAll", &[]).await?;
        Ok(directory.into_iter().map(|info| (info.id, info)).collect())
    }

    async fn submit_travel_allowance(&self, upsert: &TravelAllowanceUpsert) -> EngineResult<()> {
        let failure = |message: String| EngineError::SubmissionFailure {
            employee_id: upsert.employee_id,
            date: upsert.date,
            message,
        };

        let response = self
            .http
            .post(self.url("travel-allowance/create"))
            .bearer_auth(&self.bearer_token)
            .json(upsert)
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failure(format!("status {}", response.status())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpFieldOpsClient::new(&FieldOpsConfig {
            base_url: "https://fieldops.example.com/".to_string(),
            bearer_token: "token".to_string(),
        });
        assert_eq!(
            client.url("employee/getAll"),
            "https://fieldops.example.com/employee/getAll"
        );
    }

    #[test]
    fn test_trait_is_object_safe() {
        fn assert_object_safe(_client: &dyn FieldOpsClient) {}
        let client = HttpFieldOpsClient::new(&FieldOpsConfig {
            base_url: "https://fieldops.example.com".to_string(),
            bearer_token: "token".to_string(),
        });
        assert_object_safe(&client);
    }
}
