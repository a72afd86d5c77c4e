//! HTTP request handlers for the Salary Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{SalaryBreakdown, salary_breakdown};
use crate::error::EngineError;
use crate::models::ReportingPeriod;

use super::request::{
    AnomalyCountQuery, ReportQuery, ResolveAnomaliesRequest, SalaryCalculationRequest,
};
use super::response::{AnomalyCountResponse, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/salary/calculate", post(calculate_handler))
        .route("/salary/report", get(report_handler))
        .route("/anomalies/resolve", post(resolve_handler))
        .route("/anomalies/count", get(count_handler))
        .with_state(state)
}

/// Unpacks a JSON payload, mapping rejections to 400 responses.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((StatusCode::BAD_REQUEST, Json(error)).into_response())
        }
    }
}

/// Maps an engine error to its HTTP response, logging it on the way out.
fn error_response(error: EngineError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "request failed");
    let api_error: ApiErrorResponse = error.into();
    api_error.into_response()
}

/// Handler for POST /salary/calculate.
///
/// Computes a salary breakdown for one attendance row. Pure; no remote
/// calls are made.
async fn calculate_handler(
    payload: Result<Json<SalaryCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary calculation request");

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let today = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let breakdown = salary_breakdown(
        &request.row,
        request.employee.as_ref(),
        request.period,
        today,
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = request.row.employee_id,
        total_salary = %breakdown.total_salary,
        "Salary calculation completed"
    );
    (StatusCode::OK, Json(breakdown)).into_response()
}

/// Handler for GET /salary/report.
///
/// Fetches the month's attendance rows and the employee directory, and
/// returns one breakdown per row, sorted by employee name. The fetch
/// range ends at the elapsed-day cutoff for a month still in progress.
async fn report_handler(State(state): State<AppState>, Query(query): Query<ReportQuery>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        year = query.year,
        month = query.month,
        "Processing salary report request"
    );

    let period = match ReportingPeriod::new(query.year, query.month) {
        Ok(period) => period,
        Err(error) => return error_response(error, correlation_id),
    };

    let today = Utc::now().date_naive();
    let cutoff = period.effective_day_cutoff(today);
    if cutoff == 0 {
        return error_response(
            EngineError::DataUnavailable {
                resource: "attendance-log".to_string(),
                message: "no fully elapsed days in the current month".to_string(),
            },
            correlation_id,
        );
    }
    let end = NaiveDate::from_ymd_opt(period.year(), period.month(), cutoff)
        .unwrap_or_else(|| period.last_day());

    let rows = match state
        .field_ops()
        .attendance_for_range(period.first_day(), end)
        .await
    {
        Ok(rows) => rows,
        Err(error) => return error_response(error, correlation_id),
    };
    if rows.is_empty() {
        return error_response(
            EngineError::DataUnavailable {
                resource: "attendance-log".to_string(),
                message: "no attendance rows for the selected period".to_string(),
            },
            correlation_id,
        );
    }

    // A directory failure degrades to zero dearness allowance instead of
    // failing the whole report.
    let directory = match state.field_ops().employees().await {
        Ok(directory) => directory,
        Err(error) => {
            warn!(
                correlation_id = %correlation_id,
                %error,
                "employee directory unavailable; dearness allowance defaults to zero"
            );
            Default::default()
        }
    };

    let mut report: Vec<SalaryBreakdown> = rows
        .iter()
        .map(|row| salary_breakdown(row, directory.get(&row.employee_id), period, today))
        .collect();
    report.sort_by_key(|breakdown| breakdown.employee_name.to_lowercase());

    info!(
        correlation_id = %correlation_id,
        rows = report.len(),
        "Salary report completed"
    );
    (StatusCode::OK, Json(report)).into_response()
}

/// Handler for POST /anomalies/resolve.
///
/// Fetches the employee's travel record and runs one anomaly resolution
/// pass with the session routing credential.
async fn resolve_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResolveAnomaliesRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing anomaly resolution request");

    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let period = match ReportingPeriod::new(request.year, request.month) {
        Ok(period) => period,
        Err(error) => return error_response(error, correlation_id),
    };

    let record = match state
        .field_ops()
        .travel_allowance(request.employee_id, period.first_day(), period.last_day())
        .await
    {
        Ok(record) => record,
        Err(error) => return error_response(error, correlation_id),
    };

    match state
        .resolver()
        .resolve(
            request.employee_id,
            period,
            &record,
            state.routing_credential(),
        )
        .await
    {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = report.employee_id,
                anomalies_before = report.anomalies_before,
                anomalies_after = report.anomalies_after,
                "Anomaly resolution completed"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(error) => error_response(error, correlation_id),
    }
}

/// Handler for GET /anomalies/count.
///
/// Returns the fresh anomaly count for one employee and period.
async fn count_handler(
    State(state): State<AppState>,
    Query(query): Query<AnomalyCountQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let period = match ReportingPeriod::new(query.year, query.month) {
        Ok(period) => period,
        Err(error) => return error_response(error, correlation_id),
    };

    let record = match state
        .field_ops()
        .travel_allowance(query.employee_id, period.first_day(), period.last_day())
        .await
    {
        Ok(record) => record,
        Err(error) => return error_response(error, correlation_id),
    };

    let response = AnomalyCountResponse {
        employee_id: query.employee_id,
        anomaly_count: record.anomaly_count(),
    };
    (StatusCode::OK, Json(response)).into_response()
}
