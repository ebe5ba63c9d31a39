//! Point risk prediction for arbitrary coordinates
//!
//! Builds the classifier's feature vector for a (date, point) query,
//! imputing elevation and water-distance when the caller does not supply
//! them, and returns the classifier's scalar output. Unlike the seasonal
//! path this output is NOT clamped to the ordinal range; the two paths
//! intentionally differ (see DESIGN.md).

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, instrument};

use crate::error::RiskMapError;
use crate::models::FeatureVector;
use crate::risk::classifier::PointClassifier;
use crate::risk::imputer::FeatureImputer;
use crate::risk::{parse_date, validate_coordinates};

/// Classifier-backed predictor for arbitrary map points
pub struct PointRiskPredictor {
    imputer: FeatureImputer,
    classifier: Arc<dyn PointClassifier>,
}

impl PointRiskPredictor {
    #[must_use]
    pub fn new(imputer: FeatureImputer, classifier: Arc<dyn PointClassifier>) -> Self {
        Self {
            imputer,
            classifier,
        }
    }

    /// Predict risk for an ISO `YYYY-MM-DD` date and a coordinate pair.
    ///
    /// `elevation` and `water_distance` override the imputed values when
    /// supplied; either may be given independently of the other.
    #[instrument(skip(self))]
    pub fn predict(
        &self,
        date: &str,
        latitude: f64,
        longitude: f64,
        elevation: Option<f64>,
        water_distance: Option<f64>,
    ) -> Result<f64, RiskMapError> {
        let date = parse_date(date)?;
        self.predict_on(date, latitude, longitude, elevation, water_distance)
    }

    /// Predict risk for an already-parsed date
    pub fn predict_on(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        elevation: Option<f64>,
        water_distance: Option<f64>,
    ) -> Result<f64, RiskMapError> {
        validate_coordinates(latitude, longitude)?;

        let (elevation, water_distance) = match (elevation, water_distance) {
            (Some(elevation), Some(water_distance)) => (elevation, water_distance),
            (given_elevation, given_water) => {
                let (imputed_elevation, imputed_water) =
                    self.imputer.estimate(latitude, longitude)?;
                (
                    given_elevation.unwrap_or(imputed_elevation),
                    given_water.unwrap_or(imputed_water),
                )
            }
        };

        let features = FeatureVector {
            latitude,
            longitude,
            month: date.month(),
            elevation,
            water_distance,
        };

        let risk = self.classifier.predict(&features);
        debug!(
            "Predicted risk {risk:.3} at ({latitude:.4}, {longitude:.4}) for month {}",
            features.month
        );
        Ok(risk)
    }
}
