//! Salary Engine for field sales operations
//!
//! This crate computes monthly salary for field officers (pro-rated base salary,
//! travel allowance, dearness allowance and approved expenses) from attendance
//! and travel records fetched from the field-ops service, and detects and
//! repairs travel days that have recorded checkouts but no recorded distance by
//! deriving road distances from an external routing provider.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
