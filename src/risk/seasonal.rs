//! Seasonal risk interpolation over the known locations
//!
//! Monthly risk labels are a step function over the calendar; interpolation
//! smooths them by blending the current and next month's ordinal, weighted
//! by how far the day sits inside the month. Small linear corrections for
//! elevation and water proximity are applied on top, and the result is
//! clamped back into the ordinal range.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::instrument;

use crate::dataset::LocationDataset;
use crate::error::RiskMapError;
use crate::models::RiskEstimate;
use crate::risk::parse_date;

/// Risk decreases slightly with elevation
const ELEVATION_COEFFICIENT: f64 = -0.0001;
/// Risk increases slightly with distance from water
const WATER_DISTANCE_COEFFICIENT: f64 = 0.00001;

/// Lower bound of the ordinal risk range
pub const RISK_MIN: f64 = 1.0;
/// Upper bound of the ordinal risk range
pub const RISK_MAX: f64 = 3.0;

/// Computes a seasonal risk estimate for every known location on a date
#[derive(Debug, Clone)]
pub struct SeasonalInterpolator {
    dataset: Arc<LocationDataset>,
}

impl SeasonalInterpolator {
    #[must_use]
    pub fn new(dataset: Arc<LocationDataset>) -> Self {
        Self { dataset }
    }

    /// One estimate per dataset record for an ISO `YYYY-MM-DD` date
    #[instrument(skip(self))]
    pub fn interpolate(&self, date: &str) -> Result<Vec<RiskEstimate>, RiskMapError> {
        Ok(self.interpolate_on(parse_date(date)?))
    }

    /// One estimate per dataset record for an already-parsed date.
    ///
    /// Pure over the dataset: each call builds a fresh result vector and
    /// never writes back into the shared table.
    #[must_use]
    pub fn interpolate_on(&self, date: NaiveDate) -> Vec<RiskEstimate> {
        let month = date.month();
        let next_month = if month == 12 { 1 } else { month + 1 };
        let (weight_current, weight_next) = month_weights(date);

        self.dataset
            .records()
            .iter()
            .map(|record| {
                let raw = weight_current * record.risk_for_month(month).value()
                    + weight_next * record.risk_for_month(next_month).value()
                    + ELEVATION_COEFFICIENT * record.elevation
                    + WATER_DISTANCE_COEFFICIENT * record.water_distance;

                RiskEstimate {
                    location_name: Some(record.name.clone()),
                    risk: raw.clamp(RISK_MIN, RISK_MAX),
                    latitude: record.latitude,
                    longitude: record.longitude,
                }
            })
            .collect()
    }
}

/// Complementary weights for the current and next calendar month.
///
/// Day 1 leans almost fully on the current month; the last day leans almost
/// fully on the next. The weights always sum to 1.
#[must_use]
pub fn month_weights(date: NaiveDate) -> (f64, f64) {
    let days = f64::from(days_in_month(date));
    let day = f64::from(date.day());
    ((days - day) / days, day / days)
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = date
        .with_day(1)
        .expect("day 1 exists in every month");
    let next_first = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
    .expect("first day of the following month exists");
    (next_first - first).num_days() as u32
}
