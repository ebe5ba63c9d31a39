//! Daily risk trend over a date range
//!
//! Iterates the point predictor over every day between two dates so the map
//! UI can chart how risk develops at a pinned marker. Purely derived from
//! the predictor; no extra state.

use tracing::instrument;

use crate::error::RiskMapError;
use crate::models::{RiskTrend, TrendPoint};
use crate::risk::parse_date;
use crate::risk::predictor::PointRiskPredictor;

/// Default upper bound on the number of days in one trend request
pub const DEFAULT_MAX_TREND_DAYS: usize = 366;

/// Produces per-day risk series for a fixed point
pub struct RiskTimeSeries<'a> {
    predictor: &'a PointRiskPredictor,
    max_days: usize,
}

impl<'a> RiskTimeSeries<'a> {
    #[must_use]
    pub fn new(predictor: &'a PointRiskPredictor) -> Self {
        Self {
            predictor,
            max_days: DEFAULT_MAX_TREND_DAYS,
        }
    }

    /// Override the range cap (from configuration)
    #[must_use]
    pub fn with_max_days(mut self, max_days: usize) -> Self {
        self.max_days = max_days;
        self
    }

    /// Risk for every day in `[start, end]` plus the mean over the range
    #[instrument(skip(self))]
    pub fn trend(
        &self,
        start: &str,
        end: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<RiskTrend, RiskMapError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;

        if end < start {
            return Err(RiskMapError::invalid_date(format!(
                "range end {end} precedes start {start}"
            )));
        }

        let days = (end - start).num_days() as usize + 1;
        if days > self.max_days {
            return Err(RiskMapError::invalid_date(format!(
                "range spans {days} days, the maximum is {}",
                self.max_days
            )));
        }

        let mut points = Vec::with_capacity(days);
        for date in start.iter_days().take(days) {
            let risk = self
                .predictor
                .predict_on(date, latitude, longitude, None, None)?;
            points.push(TrendPoint { date, risk });
        }

        let mean_risk = points.iter().map(|p| p.risk).sum::<f64>() / points.len() as f64;
        Ok(RiskTrend { points, mean_risk })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LocationDataset;
    use crate::models::{FeatureVector, LocationRecord, RiskLevel};
    use crate::risk::classifier::PointClassifier;
    use crate::risk::imputer::FeatureImputer;
    use std::sync::Arc;

    /// Risk equals the month index, making series easy to reason about
    struct MonthClassifier;

    impl PointClassifier for MonthClassifier {
        fn predict(&self, features: &FeatureVector) -> f64 {
            f64::from(features.month)
        }
    }

    fn predictor() -> PointRiskPredictor {
        let records: Vec<LocationRecord> = (0..5)
            .map(|i| LocationRecord {
                name: format!("P{i}"),
                latitude: 46.0 + 0.01 * f64::from(i),
                longitude: 8.0,
                elevation: 100.0,
                water_distance: 1000.0,
                monthly_risk: [RiskLevel::Low; 12],
            })
            .collect();
        let dataset = LocationDataset::from_records(records).unwrap();
        PointRiskPredictor::new(
            FeatureImputer::new(&dataset).unwrap(),
            Arc::new(MonthClassifier),
        )
    }

    #[test]
    fn test_trend_covers_range_inclusive() {
        let predictor = predictor();
        let series = RiskTimeSeries::new(&predictor);

        let trend = series.trend("2023-01-30", "2023-02-02", 46.0, 8.0).unwrap();

        assert_eq!(trend.points.len(), 4);
        assert_eq!(trend.points[0].date.to_string(), "2023-01-30");
        assert_eq!(trend.points[3].date.to_string(), "2023-02-02");

        // Two January days at 1.0 and two February days at 2.0
        assert!((trend.mean_risk - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_day_trend() {
        let predictor = predictor();
        let series = RiskTimeSeries::new(&predictor);

        let trend = series.trend("2023-06-10", "2023-06-10", 46.0, 8.0).unwrap();
        assert_eq!(trend.points.len(), 1);
        assert_eq!(trend.mean_risk, 6.0);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let predictor = predictor();
        let series = RiskTimeSeries::new(&predictor);

        let err = series
            .trend("2023-06-10", "2023-06-01", 46.0, 8.0)
            .unwrap_err();
        assert!(matches!(err, RiskMapError::InvalidDate { .. }));
    }

    #[test]
    fn test_oversized_range_rejected() {
        let predictor = predictor();
        let series = RiskTimeSeries::new(&predictor).with_max_days(7);

        let err = series
            .trend("2023-06-01", "2023-06-30", 46.0, 8.0)
            .unwrap_err();
        assert!(matches!(err, RiskMapError::InvalidDate { .. }));
    }
}
