//! Risk estimation engine
//!
//! This module contains the algorithmic heart of the application:
//! - Seasonal interpolation of monthly risk over the known locations
//! - Nearest-neighbor imputation of terrain features for arbitrary points
//! - Classifier-backed point prediction and trend series
//!
//! All state is built once at startup from the dataset and model artifacts;
//! every call afterwards is a bounded, read-only computation.

pub mod classifier;
pub mod imputer;
pub mod predictor;
pub mod seasonal;
pub mod trend;

// Re-export commonly used types from submodules
pub use classifier::{DecisionTreeModel, PointClassifier};
pub use imputer::{FeatureImputer, KnnRegressor};
pub use predictor::PointRiskPredictor;
pub use seasonal::SeasonalInterpolator;
pub use trend::RiskTimeSeries;

use chrono::NaiveDate;

use crate::error::RiskMapError;

/// Date format required at every engine boundary
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date string
pub fn parse_date(input: &str) -> Result<NaiveDate, RiskMapError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|e| RiskMapError::invalid_date(format!("'{input}': {e}")))
}

/// Validate latitude/longitude ranges for request input
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), RiskMapError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(RiskMapError::invalid_coordinate(format!(
            "latitude must be between -90 and 90, got: {latitude}"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(RiskMapError::invalid_coordinate(format!(
            "longitude must be between -180 and 180, got: {longitude}"
        )));
    }
    Ok(())
}
