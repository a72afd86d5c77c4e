//! Travel anomaly detection and distance backfill.
//!
//! A day is anomalous when it has recorded checkouts but zero recorded
//! distance. The [`AnomalyResolver`] repairs such days by walking the
//! day's visits as consecutive pairs, asking the routing provider for the
//! road distance of each pair, accumulating the result into a car or bike
//! bucket by the first visit's vehicle type, and upserting the corrected
//! distances back to the field-ops service. Days are independent failure
//! domains and are resolved concurrently; a single reconciliation fetch
//! after all days have settled replaces the local record with the
//! authoritative one.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use futures::future::join_all;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clients::{FieldOpsClient, RoutingCredential, RoutingProvider};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DayDetail, ReportingPeriod, TravelAllowanceRecord, TravelAllowanceUpsert, VehicleType,
};

/// The outcome of resolving a single anomalous day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayResolution {
    /// The day that was resolved.
    pub date: NaiveDate,
    /// Kilometres accumulated into the car bucket.
    pub car_km: Decimal,
    /// Kilometres accumulated into the bike bucket.
    pub bike_km: Decimal,
    /// Visit pairs whose distance was obtained from the routing provider.
    pub pairs_resolved: u32,
    /// Visit pairs skipped because a coordinate was missing.
    pub pairs_skipped: u32,
    /// Visit pairs that failed the distance lookup and counted as zero.
    pub pairs_failed: u32,
    /// Whether the corrected distances were accepted by the field-ops
    /// service. A failed upsert leaves the day anomalous.
    pub submitted: bool,
}

/// The outcome of a full resolution run for one employee and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionReport {
    /// The employee the run was for.
    pub employee_id: i64,
    /// Anomalous days before the run.
    pub anomalies_before: usize,
    /// Anomalous days after reconciliation. Never exceeds
    /// `anomalies_before` when the upstream record is stable.
    pub anomalies_after: usize,
    /// Per-day outcomes, one per flagged day, in record order.
    pub days: Vec<DayResolution>,
    /// The reconciled record fetched after all submissions settled. For a
    /// run with no flagged days this is the input record, untouched.
    pub record: TravelAllowanceRecord,
}

/// Detects and repairs anomalous travel days for one employee at a time.
///
/// A per-employee in-flight set rejects re-entrant runs; runs for
/// different employees may proceed concurrently.
pub struct AnomalyResolver {
    field_ops: Arc<dyn FieldOpsClient>,
    routing: Arc<dyn RoutingProvider>,
    in_flight: Mutex<HashSet<i64>>,
}

/// Removes the employee from the in-flight set on every exit path.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<i64>>,
    employee_id: i64,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(in_flight: &'a Mutex<HashSet<i64>>, employee_id: i64) -> EngineResult<Self> {
        let mut set = in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !set.insert(employee_id) {
            return Err(EngineError::ResolutionInFlight { employee_id });
        }
        Ok(Self {
            in_flight,
            employee_id,
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.employee_id);
    }
}

impl AnomalyResolver {
    /// Creates a resolver over the given collaborators.
    pub fn new(field_ops: Arc<dyn FieldOpsClient>, routing: Arc<dyn RoutingProvider>) -> Self {
        Self {
            field_ops,
            routing,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Runs one resolution pass for an employee's travel record.
    ///
    /// The run aborts before any remote call when no routing credential is
    /// available or a run for the same employee is already in flight.
    /// With no flagged days it is an immediate no-op success. Otherwise
    /// every flagged day is resolved and submitted independently, and the
    /// authoritative record is re-fetched once all days have settled.
    ///
    /// # Errors
    ///
    /// * [`EngineError::MissingRoutingCredential`] - no credential; nothing
    ///   was mutated
    /// * [`EngineError::ResolutionInFlight`] - another run holds the
    ///   employee; nothing was mutated
    /// * [`EngineError::DataUnavailable`] - the reconciliation fetch
    ///   failed; submitted days keep their corrections upstream
    pub async fn resolve(
        &self,
        employee_id: i64,
        period: ReportingPeriod,
        record: &TravelAllowanceRecord,
        credential: Option<&RoutingCredential>,
    ) -> EngineResult<ResolutionReport> {
        let credential = credential.ok_or(EngineError::MissingRoutingCredential)?;
        let _guard = InFlightGuard::acquire(&self.in_flight, employee_id)?;

        let anomalies_before = record.anomaly_count();
        let flagged: Vec<DayDetail> = record.anomalous_days().cloned().collect();

        if flagged.is_empty() {
            info!(employee_id, "no anomalous days; nothing to resolve");
            return Ok(ResolutionReport {
                employee_id,
                anomalies_before,
                anomalies_after: anomalies_before,
                days: Vec::new(),
                record: record.clone(),
            });
        }

        info!(
            employee_id,
            flagged = flagged.len(),
            "resolving anomalous travel days"
        );

        let days = join_all(
            flagged
                .into_iter()
                .map(|day| self.resolve_day(employee_id, day, credential)),
        )
        .await;

        // Single synchronization point: the authoritative record is
        // fetched only after every per-day submission has settled.
        let record = self
            .field_ops
            .travel_allowance(employee_id, period.first_day(), period.last_day())
            .await?;
        let anomalies_after = record.anomaly_count();

        info!(
            employee_id,
            anomalies_before, anomalies_after, "resolution run complete"
        );

        Ok(ResolutionReport {
            employee_id,
            anomalies_before,
            anomalies_after,
            days,
            record,
        })
    }

    /// Resolves and submits one flagged day. Never fails the run: lookup
    /// failures count the pair as zero and a failed upsert is reported in
    /// the outcome.
    async fn resolve_day(
        &self,
        employee_id: i64,
        day: DayDetail,
        credential: &RoutingCredential,
    ) -> DayResolution {
        let mut car_km = Decimal::ZERO;
        let mut bike_km = Decimal::ZERO;
        let mut pairs_resolved = 0;
        let mut pairs_skipped = 0;
        let mut pairs_failed = 0;

        for pair in day.visit_details.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            let (Some(origin), Some(destination)) = (current.coordinates(), next.coordinates())
            else {
                pairs_skipped += 1;
                continue;
            };

            match self
                .routing
                .road_distance_km(origin, destination, credential)
                .await
            {
                Ok(km) => {
                    pairs_resolved += 1;
                    match current.vehicle() {
                        VehicleType::Car => car_km += km,
                        VehicleType::Bike => bike_km += km,
                    }
                }
                Err(error) => {
                    // Lossy fallback: the pair contributes zero distance.
                    pairs_failed += 1;
                    warn!(
                        employee_id,
                        date = %day.date,
                        %error,
                        "distance lookup failed; counting zero for pair"
                    );
                }
            }
        }

        let upsert = TravelAllowanceUpsert {
            employee_id,
            date: day.date,
            distance_travelled_by_car: car_km,
            distance_travelled_by_bike: bike_km,
        };

        let submitted = match self.field_ops.submit_travel_allowance(&upsert).await {
            Ok(()) => true,
            Err(error) => {
                warn!(employee_id, date = %day.date, %error, "backfill upsert failed");
                false
            }
        };

        DayResolution {
            date: day.date,
            car_km,
            bike_km,
            pairs_resolved,
            pairs_skipped,
            pairs_failed,
            submitted,
        }
    }
}
