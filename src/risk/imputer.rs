//! Nearest-neighbor imputation of terrain features
//!
//! Arbitrary map points carry no elevation or water-distance of their own,
//! so both are estimated as the mean over the k nearest known locations.
//! Distance is plain Euclidean in raw lat/lon space, matching how the
//! upstream regressors were fit; see DESIGN.md for the geodesic question.

use tracing::instrument;

use crate::dataset::LocationDataset;
use crate::error::RiskMapError;

/// Number of neighbors averaged per estimate
pub const NEIGHBOR_COUNT: usize = 5;

/// k-nearest-neighbor regressor over (latitude, longitude) points.
///
/// "Fitting" memorizes the training points; prediction averages the target
/// values of the k nearest. Ties on distance are broken by insertion order,
/// which keeps estimates deterministic for a fixed dataset.
#[derive(Debug, Clone)]
pub struct KnnRegressor {
    points: Vec<[f64; 2]>,
    values: Vec<f64>,
    k: usize,
}

impl KnnRegressor {
    /// Memorize training points and their target values
    pub fn fit(points: Vec<[f64; 2]>, values: Vec<f64>, k: usize) -> Result<Self, RiskMapError> {
        if points.len() != values.len() {
            return Err(RiskMapError::insufficient_data(format!(
                "{} points but {} target values",
                points.len(),
                values.len()
            )));
        }
        if k == 0 {
            return Err(RiskMapError::insufficient_data(
                "neighbor count must be at least 1",
            ));
        }
        Ok(Self { points, values, k })
    }

    /// Mean target value of the k nearest training points
    pub fn predict(&self, latitude: f64, longitude: f64) -> Result<f64, RiskMapError> {
        if self.points.len() < self.k {
            return Err(RiskMapError::insufficient_data(format!(
                "{} known points, need at least {}",
                self.points.len(),
                self.k
            )));
        }

        let mut neighbors: Vec<(f64, usize)> = self
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let dx = point[0] - latitude;
                let dy = point[1] - longitude;
                (dx * dx + dy * dy, index)
            })
            .collect();
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let sum: f64 = neighbors
            .iter()
            .take(self.k)
            .map(|&(_, index)| self.values[index])
            .sum();
        Ok(sum / self.k as f64)
    }
}

/// Estimates elevation and water-distance for arbitrary coordinates
#[derive(Debug, Clone)]
pub struct FeatureImputer {
    elevation: KnnRegressor,
    water_distance: KnnRegressor,
}

impl FeatureImputer {
    /// Build both regressors from the dataset's coordinate and feature columns
    pub fn new(dataset: &LocationDataset) -> Result<Self, RiskMapError> {
        Self::with_neighbors(dataset, NEIGHBOR_COUNT)
    }

    /// Build with an explicit neighbor count
    pub fn with_neighbors(dataset: &LocationDataset, k: usize) -> Result<Self, RiskMapError> {
        let training = dataset.feature_points();
        let points: Vec<[f64; 2]> = training.iter().map(|(point, _, _)| *point).collect();
        let elevations: Vec<f64> = training.iter().map(|(_, elevation, _)| *elevation).collect();
        let water_distances: Vec<f64> = training.iter().map(|(_, _, water)| *water).collect();

        Ok(Self {
            elevation: KnnRegressor::fit(points.clone(), elevations, k)?,
            water_distance: KnnRegressor::fit(points, water_distances, k)?,
        })
    }

    /// Estimate (elevation, water_distance) for a point
    #[instrument(skip(self))]
    pub fn estimate(&self, latitude: f64, longitude: f64) -> Result<(f64, f64), RiskMapError> {
        let elevation = self.elevation.predict(latitude, longitude)?;
        let water_distance = self.water_distance.predict(latitude, longitude)?;
        Ok((elevation, water_distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocationRecord, RiskLevel};

    fn record(name: &str, lat: f64, lon: f64, elevation: f64, water: f64) -> LocationRecord {
        LocationRecord {
            name: name.to_string(),
            latitude: lat,
            longitude: lon,
            elevation,
            water_distance: water,
            monthly_risk: [RiskLevel::Low; 12],
        }
    }

    fn grid_dataset() -> LocationDataset {
        LocationDataset::from_records(vec![
            record("A", 46.0, 8.0, 100.0, 1000.0),
            record("B", 46.1, 8.0, 200.0, 2000.0),
            record("C", 46.0, 8.1, 300.0, 3000.0),
            record("D", 46.1, 8.1, 400.0, 4000.0),
            record("E", 46.05, 8.05, 500.0, 5000.0),
            record("F", 49.0, 11.0, 900.0, 9000.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_estimate_averages_nearest_neighbors() {
        let imputer = FeatureImputer::new(&grid_dataset()).unwrap();

        // The five clustered records are all closer than the outlier F,
        // so the estimate is the mean over A..=E.
        let (elevation, water) = imputer.estimate(46.05, 8.05).unwrap();
        assert!((elevation - 300.0).abs() < 1e-9);
        assert!((water - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let imputer = FeatureImputer::new(&grid_dataset()).unwrap();

        let first = imputer.estimate(46.02, 8.03).unwrap();
        for _ in 0..10 {
            assert_eq!(imputer.estimate(46.02, 8.03).unwrap(), first);
        }
    }

    #[test]
    fn test_small_dataset_fails_on_estimate() {
        let dataset = LocationDataset::from_records(vec![
            record("A", 46.0, 8.0, 100.0, 1000.0),
            record("B", 46.1, 8.0, 200.0, 2000.0),
            record("C", 46.0, 8.1, 300.0, 3000.0),
        ])
        .unwrap();

        let imputer = FeatureImputer::new(&dataset).unwrap();
        let err = imputer.estimate(46.05, 8.05).unwrap_err();
        assert!(matches!(err, RiskMapError::InsufficientData { .. }));
    }

    #[test]
    fn test_distance_ties_resolve_by_dataset_order() {
        // Two points equidistant from the query; with k=1 the earlier
        // record must win every time.
        let regressor = KnnRegressor::fit(
            vec![[46.0, 8.0], [46.0, 8.2]],
            vec![10.0, 20.0],
            1,
        )
        .unwrap();

        assert_eq!(regressor.predict(46.0, 8.1).unwrap(), 10.0);
    }

    #[test]
    fn test_mismatched_fit_inputs_rejected() {
        let err = KnnRegressor::fit(vec![[46.0, 8.0]], vec![], 1).unwrap_err();
        assert!(matches!(err, RiskMapError::InsufficientData { .. }));
    }
}
