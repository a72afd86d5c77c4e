//! HTTP API module for the Salary Engine.
//!
//! This module provides the REST API endpoints for computing salary
//! breakdowns and resolving travel anomalies.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AnomalyCountQuery, ReportQuery, ResolveAnomaliesRequest, SalaryCalculationRequest};
pub use response::{AnomalyCountResponse, ApiError};
pub use state::AppState;
