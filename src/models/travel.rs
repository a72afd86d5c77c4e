//! Travel allowance models.
//!
//! This module defines the per-employee travel record for a month window,
//! its per-day details and visit points, and the upsert payload used to
//! backfill corrected distances.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The vehicle a visit was made with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleType {
    /// Visit made by car.
    Car,
    /// Visit made by bike.
    Bike,
}

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// A single visit within a day: arrival coordinates and vehicle tag.
///
/// Coordinates are nullable upstream; a visit missing either coordinate
/// cannot anchor a distance lookup and is skipped by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitPoint {
    /// Latitude recorded at check-in.
    #[serde(default)]
    pub checkin_latitude: Option<f64>,
    /// Longitude recorded at check-in.
    #[serde(default)]
    pub checkin_longitude: Option<f64>,
    /// Vehicle used for the visit. Treated as [`VehicleType::Bike`] when unset.
    #[serde(default)]
    pub vehicle_type: Option<VehicleType>,
}

impl VisitPoint {
    /// The check-in coordinates, if both components were recorded.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.checkin_latitude, self.checkin_longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    /// The vehicle used, defaulting to bike when unset.
    pub fn vehicle(&self) -> VehicleType {
        self.vehicle_type.unwrap_or(VehicleType::Bike)
    }
}

/// Per-day travel detail within a travel allowance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDetail {
    /// The calendar day this detail is for.
    pub date: NaiveDate,
    /// Number of visit checkouts recorded that day.
    pub checkout_count: u32,
    /// Kilometres recorded for the day.
    pub total_distance_travelled: Decimal,
    /// The day's visits in order.
    #[serde(default)]
    pub visit_details: Vec<VisitPoint>,
}

impl DayDetail {
    /// Returns true if travel occurred but no distance was recorded.
    ///
    /// A day is anomalous iff it has at least one checkout and a recorded
    /// distance of exactly zero.
    pub fn is_anomalous(&self) -> bool {
        self.checkout_count > 0 && self.total_distance_travelled == Decimal::ZERO
    }
}

/// Per-employee travel detail for a (year, month) window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelAllowanceRecord {
    /// One entry per calendar day in the window, in order.
    #[serde(default)]
    pub date_details: Vec<DayDetail>,
}

impl TravelAllowanceRecord {
    /// The days with recorded checkouts but zero recorded distance.
    pub fn anomalous_days(&self) -> impl Iterator<Item = &DayDetail> {
        self.date_details.iter().filter(|detail| detail.is_anomalous())
    }

    /// Number of anomalous days, derived fresh from the day details.
    pub fn anomaly_count(&self) -> usize {
        self.anomalous_days().count()
    }
}

/// Upsert payload for backfilling a day's corrected distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelAllowanceUpsert {
    /// The employee the correction is for.
    pub employee_id: i64,
    /// The day the correction is for.
    pub date: NaiveDate,
    /// Corrected kilometres travelled by car.
    pub distance_travelled_by_car: Decimal,
    /// Corrected kilometres travelled by bike.
    pub distance_travelled_by_bike: Decimal,
}
