//! Reporting period model.
//!
//! This module contains the [`ReportingPeriod`] type that identifies the
//! (year, month) window a salary calculation or anomaly resolution run
//! operates over, together with its calendar utilities.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month selected for salary reporting.
///
/// The period is validated on construction, so every method on a value of
/// this type is infallible.
///
/// # Example
///
/// ```
/// use salary_engine::models::ReportingPeriod;
/// use chrono::NaiveDate;
///
/// let period = ReportingPeriod::new(2025, 6).unwrap();
/// assert_eq!(period.days_in_month(), 30);
/// assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
/// assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod", into = "RawPeriod")]
pub struct ReportingPeriod {
    year: i32,
    month: u32,
}

/// Serde surface for [`ReportingPeriod`]; validation runs on deserialize.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for ReportingPeriod {
    type Error = EngineError;

    fn try_from(raw: RawPeriod) -> EngineResult<Self> {
        ReportingPeriod::new(raw.year, raw.month)
    }
}

impl From<ReportingPeriod> for RawPeriod {
    fn from(period: ReportingPeriod) -> Self {
        RawPeriod {
            year: period.year,
            month: period.month,
        }
    }
}

impl ReportingPeriod {
    /// Creates a validated reporting period.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] if `month` is outside `1..=12`
    /// or the year is outside the representable calendar range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        // from_ymd_opt rejects both out-of-range months and absurd years
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    /// The calendar year of this period.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month of this period (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The number of calendar days in this month, respecting leap years.
    pub fn days_in_month(&self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() {
                    29
                } else {
                    28
                }
            }
        }
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Validated in new(), so the date exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.days_in_month())
            .unwrap_or(NaiveDate::MIN)
    }

    /// Returns true if `date` falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns true if `today` falls within this month, i.e. the month is
    /// still in progress.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.contains(today)
    }

    /// The number of fully elapsed days to count toward pro-ration.
    ///
    /// For the month `today` falls in, only days up to and including
    /// yesterday have fully elapsed, so the cutoff is `today.day - 1`
    /// (zero on the first of the month). For any other month the whole
    /// month has elapsed and the cutoff is [`days_in_month`].
    ///
    /// [`days_in_month`]: ReportingPeriod::days_in_month
    pub fn effective_day_cutoff(&self, today: NaiveDate) -> u32 {
        if self.is_current(today) {
            today.day() - 1
        } else {
            self.days_in_month()
        }
    }
}
