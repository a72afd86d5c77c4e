//! Error types for the Salary Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing salaries or
//! resolving travel anomalies.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Salary Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The requested year/month pair does not denote a valid calendar month.
    #[error("Invalid reporting period: {year}-{month:02}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month (1-12).
        month: u32,
    },

    /// An upstream attendance, travel or employee fetch failed or returned
    /// no usable data.
    #[error("No data available from {resource}: {message}")]
    DataUnavailable {
        /// The remote resource that failed (e.g. "attendance-log").
        resource: String,
        /// A description of the failure.
        message: String,
    },

    /// The routing provider could not be reached or returned no route.
    #[error("Routing provider unavailable: {message}")]
    RoutingUnavailable {
        /// A description of the failure.
        message: String,
    },

    /// A travel-distance backfill write failed for a specific day.
    #[error("Failed to submit travel allowance for employee {employee_id} on {date}: {message}")]
    SubmissionFailure {
        /// The employee whose record was being written.
        employee_id: i64,
        /// The day the write was for.
        date: NaiveDate,
        /// A description of the failure.
        message: String,
    },

    /// No routing credential was available when an anomaly resolution run
    /// was requested. The run aborts before any remote mutation.
    #[error("Routing credential missing; anomaly resolution not started")]
    MissingRoutingCredential,

    /// An anomaly resolution run is already in flight for the employee.
    #[error("Anomaly resolution already in progress for employee {employee_id}")]
    ResolutionInFlight {
        /// The employee with a run in flight.
        employee_id: i64,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
