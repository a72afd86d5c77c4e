//! Core data models for the Salary Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod period;
mod travel;

pub use attendance::{AttendanceRow, AttendanceStats};
pub use employee::EmployeeInfo;
pub use period::ReportingPeriod;
pub use travel::{
    DayDetail, GeoPoint, TravelAllowanceRecord, TravelAllowanceUpsert, VehicleType, VisitPoint,
};
