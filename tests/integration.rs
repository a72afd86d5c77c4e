//! Integration tests for the Salary Engine API.
//!
//! This test suite drives the router end to end with in-memory
//! collaborators, covering:
//! - Salary calculation (base salary, travel allowance, dearness
//!   allowance, approved expense, cutoff handling)
//! - Monthly salary reports
//! - Anomaly resolution and anomaly counts
//! - Error cases (malformed JSON, missing fields, invalid periods,
//!   unavailable data, missing routing credential)

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use salary_engine::api::{AppState, create_router};
use salary_engine::clients::{FieldOpsClient, RoutingCredential, RoutingProvider};
use salary_engine::error::{EngineError, EngineResult};
use salary_engine::models::{
    AttendanceRow, EmployeeInfo, TravelAllowanceRecord, TravelAllowanceUpsert,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// In-memory field-ops service. Successful upserts patch the stored
/// travel record so reconciliation fetches observe them.
#[derive(Default)]
struct StubFieldOps {
    rows: Vec<AttendanceRow>,
    employees: HashMap<i64, EmployeeInfo>,
    records: Mutex<HashMap<i64, TravelAllowanceRecord>>,
}

impl StubFieldOps {
    fn with_rows(mut self, rows: Vec<Value>) -> Self {
        self.rows = rows
            .into_iter()
            .map(|row| serde_json::from_value(row).unwrap())
            .collect();
        self
    }

    fn with_employee(mut self, employee: Value) -> Self {
        let info: EmployeeInfo = serde_json::from_value(employee).unwrap();
        self.employees.insert(info.id, info);
        self
    }

    fn with_record(self, employee_id: i64, record: Value) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(employee_id, serde_json::from_value(record).unwrap());
        self
    }
}

#[async_trait]
impl FieldOpsClient for StubFieldOps {
    async fn attendance_for_range(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRow>> {
        Ok(self.rows.clone())
    }

    async fn travel_allowance(
        &self,
        employee_id: i64,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> EngineResult<TravelAllowanceRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&employee_id)
            .cloned()
            .ok_or_else(|| EngineError::DataUnavailable {
                resource: "travel-allowance".to_string(),
                message: format!("no record for employee {}", employee_id),
            })
    }

    async fn employees(&self) -> EngineResult<HashMap<i64, EmployeeInfo>> {
        Ok(self.employees.clone())
    }

    async fn submit_travel_allowance(&self, upsert: &TravelAllowanceUpsert) -> EngineResult<()> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.get_mut(&upsert.employee_id) {
            if let Some(detail) = record
                .date_details
                .iter_mut()
                .find(|detail| detail.date == upsert.date)
            {
                detail.total_distance_travelled =
                    upsert.distance_travelled_by_car + upsert.distance_travelled_by_bike;
            }
        }
        Ok(())
    }
}

/// Routing stub answering every pair with a fixed distance.
struct StubRouting {
    distance_km: Decimal,
}

#[async_trait]
impl RoutingProvider for StubRouting {
    async fn fetch_credential(&self) -> EngineResult<RoutingCredential> {
        Ok(RoutingCredential::new("stub-token"))
    }

    async fn road_distance_km(
        &self,
        _origin: salary_engine::models::GeoPoint,
        _destination: salary_engine::models::GeoPoint,
        _credential: &RoutingCredential,
    ) -> EngineResult<Decimal> {
        Ok(self.distance_km)
    }
}

fn router_with(field_ops: StubFieldOps, with_credential: bool) -> Router {
    let state = AppState::new(
        Arc::new(field_ops),
        Arc::new(StubRouting {
            distance_km: dec("12.5"),
        }),
        with_credential.then(|| RoutingCredential::new("token")),
    );
    create_router(state)
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn attendance_row(employee_id: i64, first: &str, last: &str) -> Value {
    json!({
        "employeeId": employee_id,
        "employeeFirstName": first,
        "employeeLastName": last,
        "fullDays": 20,
        "halfDays": 2,
        "salary": 30000
    })
}

fn anomalous_record(date: &str) -> Value {
    json!({
        "dateDetails": [
            {
                "date": date,
                "checkoutCount": 2,
                "totalDistanceTravelled": 0,
                "visitDetails": [
                    {
                        "checkinLatitude": 18.5204,
                        "checkinLongitude": 73.8567,
                        "vehicleType": "Car"
                    },
                    {
                        "checkinLatitude": 18.5308,
                        "checkinLongitude": 73.8475,
                        "vehicleType": "Car"
                    }
                ]
            }
        ]
    })
}

fn assert_decimal_field(value: &Value, field: &str, expected: &str) {
    let actual = value[field].as_str().unwrap();
    assert_eq!(
        dec(actual),
        dec(expected),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

// =============================================================================
// POST /salary/calculate
// =============================================================================

#[tokio::test]
async fn test_calculate_base_salary_for_completed_month() {
    let router = router_with(StubFieldOps::default(), true);

    let (status, body) = send(
        router,
        "POST",
        "/salary/calculate",
        Some(json!({
            "row": attendance_row(1, "Asha", "Patil"),
            "period": { "year": 2024, "month": 11 },
            "asOf": "2025-02-01"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&body, "baseSalary", "21000");
    assert_decimal_field(&body, "totalSalary", "21000");
    assert_eq!(body["daysInMonth"], 30);
    assert_eq!(body["dayCutoff"], 30);
}

#[tokio::test]
async fn test_calculate_all_components() {
    let router = router_with(StubFieldOps::default(), true);

    let (status, body) = send(
        router,
        "POST",
        "/salary/calculate",
        Some(json!({
            "row": {
                "employeeId": 1,
                "employeeFirstName": "Asha",
                "employeeLastName": "Patil",
                "fullDays": 20,
                "halfDays": 2,
                "salary": 30000,
                "distanceTravelledByCar": 10,
                "distanceTravelledByBike": 5,
                "pricePerKmCar": 12,
                "pricePerKmBike": 6,
                "statsDto": { "approvedExpense": 450 }
            },
            "employee": { "id": 1, "dearnessAllowance": 100 },
            "period": { "year": 2024, "month": 11 },
            "asOf": "2025-02-01"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&body, "baseSalary", "21000");
    assert_decimal_field(&body, "travelAllowance", "150");
    assert_decimal_field(&body, "dearnessAllowance", "2100");
    assert_decimal_field(&body, "approvedExpense", "450");
    assert_decimal_field(&body, "totalSalary", "23700");
}

#[tokio::test]
async fn test_calculate_cuts_off_current_month() {
    let router = router_with(StubFieldOps::default(), true);

    // asOf mid-month: only 14 days have fully elapsed
    let (status, body) = send(
        router,
        "POST",
        "/salary/calculate",
        Some(json!({
            "row": attendance_row(1, "Asha", "Patil"),
            "period": { "year": 2024, "month": 11 },
            "asOf": "2024-11-15"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dayCutoff"], 14);
    assert_decimal_field(&body, "daysWorked", "14");
    assert_decimal_field(&body, "baseSalary", "14000");
}

#[tokio::test]
async fn test_calculate_rejects_malformed_json() {
    let router = router_with(StubFieldOps::default(), true);

    let request = Request::builder()
        .method("POST")
        .uri("/salary/calculate")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_calculate_rejects_missing_field() {
    let router = router_with(StubFieldOps::default(), true);

    let (status, body) = send(
        router,
        "POST",
        "/salary/calculate",
        Some(json!({ "period": { "year": 2024, "month": 11 } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_calculate_rejects_invalid_period() {
    let router = router_with(StubFieldOps::default(), true);

    let (status, body) = send(
        router,
        "POST",
        "/salary/calculate",
        Some(json!({
            "row": attendance_row(1, "Asha", "Patil"),
            "period": { "year": 2024, "month": 13 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Invalid reporting period")
    );
}

// =============================================================================
// GET /salary/report
// =============================================================================

#[tokio::test]
async fn test_report_sorts_rows_by_employee_name() {
    let field_ops = StubFieldOps::default()
        .with_rows(vec![
            attendance_row(2, "Ravi", "Kumar"),
            attendance_row(1, "Asha", "Patil"),
        ])
        .with_employee(json!({ "id": 1, "dearnessAllowance": 100 }));
    let router = router_with(field_ops, true);

    let (status, body) = send(router, "GET", "/salary/report?year=2024&month=11", None).await;

    assert_eq!(status, StatusCode::OK);
    let report = body.as_array().unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0]["employeeName"], "Asha Patil");
    assert_eq!(report[1]["employeeName"], "Ravi Kumar");

    // Directory entry applies only to employee 1
    assert_decimal_field(&report[0], "dearnessAllowance", "2100");
    assert_decimal_field(&report[1], "dearnessAllowance", "0");
}

#[tokio::test]
async fn test_report_with_no_rows_is_data_unavailable() {
    let router = router_with(StubFieldOps::default(), true);

    let (status, body) = send(router, "GET", "/salary/report?year=2024&month=11", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "DATA_UNAVAILABLE");
}

#[tokio::test]
async fn test_report_rejects_invalid_period() {
    let router = router_with(StubFieldOps::default(), true);

    let (status, body) = send(router, "GET", "/salary/report?year=2024&month=0", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PERIOD");
}

// =============================================================================
// POST /anomalies/resolve
// =============================================================================

#[tokio::test]
async fn test_resolve_backfills_anomalous_day() {
    let field_ops =
        StubFieldOps::default().with_record(118, anomalous_record("2024-11-04"));
    let router = router_with(field_ops, true);

    let (status, body) = send(
        router,
        "POST",
        "/anomalies/resolve",
        Some(json!({ "employeeId": 118, "year": 2024, "month": 11 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employeeId"], 118);
    assert_eq!(body["anomaliesBefore"], 1);
    assert_eq!(body["anomaliesAfter"], 0);

    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_decimal_field(&days[0], "carKm", "12.5");
    assert_decimal_field(&days[0], "bikeKm", "0");
    assert_eq!(days[0]["pairsResolved"], 1);
    assert_eq!(days[0]["submitted"], true);
}

#[tokio::test]
async fn test_resolve_without_credential_is_conflict() {
    let field_ops =
        StubFieldOps::default().with_record(118, anomalous_record("2024-11-04"));
    let router = router_with(field_ops, false);

    let (status, body) = send(
        router,
        "POST",
        "/anomalies/resolve",
        Some(json!({ "employeeId": 118, "year": 2024, "month": 11 })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ROUTING_CREDENTIAL_MISSING");
}

#[tokio::test]
async fn test_resolve_unknown_employee_is_data_unavailable() {
    let router = router_with(StubFieldOps::default(), true);

    let (status, body) = send(
        router,
        "POST",
        "/anomalies/resolve",
        Some(json!({ "employeeId": 999, "year": 2024, "month": 11 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "DATA_UNAVAILABLE");
}

#[tokio::test]
async fn test_resolve_clean_record_is_noop() {
    let field_ops = StubFieldOps::default().with_record(
        118,
        json!({
            "dateDetails": [
                {
                    "date": "2024-11-04",
                    "checkoutCount": 2,
                    "totalDistanceTravelled": 14.2,
                    "visitDetails": []
                }
            ]
        }),
    );
    let router = router_with(field_ops, true);

    let (status, body) = send(
        router,
        "POST",
        "/anomalies/resolve",
        Some(json!({ "employeeId": 118, "year": 2024, "month": 11 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["anomaliesBefore"], 0);
    assert_eq!(body["anomaliesAfter"], 0);
    assert!(body["days"].as_array().unwrap().is_empty());
}

// =============================================================================
// GET /anomalies/count
// =============================================================================

#[tokio::test]
async fn test_count_reports_fresh_anomaly_count() {
    let field_ops =
        StubFieldOps::default().with_record(118, anomalous_record("2024-11-04"));
    let router = router_with(field_ops, true);

    let (status, body) = send(
        router,
        "GET",
        "/anomalies/count?employeeId=118&year=2024&month=11",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employeeId"], 118);
    assert_eq!(body["anomalyCount"], 1);
}

#[tokio::test]
async fn test_count_drops_after_resolution() {
    let field_ops =
        StubFieldOps::default().with_record(118, anomalous_record("2024-11-04"));
    let state = AppState::new(
        Arc::new(field_ops),
        Arc::new(StubRouting {
            distance_km: dec("12.5"),
        }),
        Some(RoutingCredential::new("token")),
    );

    let (status, _body) = send(
        create_router(state.clone()),
        "POST",
        "/anomalies/resolve",
        Some(json!({ "employeeId": 118, "year": 2024, "month": 11 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        create_router(state),
        "GET",
        "/anomalies/count?employeeId=118&year=2024&month=11",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["anomalyCount"], 0);
}
