//! Risk estimate results returned by the engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single risk estimate for a point on the map
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RiskEstimate {
    /// Name of the known location, absent for arbitrary points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    /// Continuous risk value; seasonal estimates lie in [1.0, 3.0]
    pub risk: f64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// Feature vector handed to the trained classifier.
///
/// Column order is a strict contract with the training pipeline:
/// `[latitude, longitude, month, elevation, water_distance]`. Reordering the
/// columns silently degrades every prediction, so the conversion to a raw
/// slice lives here and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub latitude: f64,
    pub longitude: f64,
    /// Calendar month, 1-based (January = 1)
    pub month: u32,
    pub elevation: f64,
    pub water_distance: f64,
}

impl FeatureVector {
    /// Names of the columns in contract order, as recorded in model artifacts
    pub const COLUMNS: [&'static str; 5] =
        ["latitude", "longitude", "month", "elevation", "water_distance"];

    /// Flatten into the column order the classifier was trained on
    #[must_use]
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.latitude,
            self.longitude,
            f64::from(self.month),
            self.elevation,
            self.water_distance,
        ]
    }
}

/// Daily risk series over a date range, for trend charts in the map UI
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RiskTrend {
    /// One entry per day, inclusive of both endpoints
    pub points: Vec<TrendPoint>,
    /// Arithmetic mean of the daily risk values
    pub mean_risk: f64,
}

/// A single day in a risk trend
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub risk: f64,
}
