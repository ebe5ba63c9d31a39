//! End-to-end engine tests against the shipped dataset and model artifact

use std::sync::Arc;

use riskmap::config::EngineConfig;
use riskmap::risk::RiskTimeSeries;
use riskmap::{
    DecisionTreeModel, FeatureImputer, LocationDataset, PointClassifier, PointRiskPredictor,
    RiskMapError, SeasonalInterpolator,
};

fn load_dataset() -> LocationDataset {
    LocationDataset::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/locations.csv"))
        .expect("shipped dataset loads")
}

fn load_classifier() -> DecisionTreeModel {
    DecisionTreeModel::load(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/models/classifier.json"
    ))
    .expect("shipped classifier loads")
}

fn build_predictor() -> PointRiskPredictor {
    let dataset = load_dataset();
    let imputer = FeatureImputer::new(&dataset).expect("imputer builds");
    PointRiskPredictor::new(imputer, Arc::new(load_classifier()))
}

#[test]
fn shipped_dataset_loads_and_validates() {
    let dataset = load_dataset();
    assert!(dataset.len() >= EngineConfig::default().neighbors);

    let lakeside = dataset.get("Lakeside").expect("Lakeside is present");
    assert_eq!(lakeside.elevation, 10.0);
    assert_eq!(lakeside.water_distance, 5000.0);
}

#[test]
fn seasonal_estimates_cover_every_location_and_stay_in_range() {
    let dataset = Arc::new(load_dataset());
    let interpolator = SeasonalInterpolator::new(Arc::clone(&dataset));

    for date in ["2023-01-01", "2023-06-15", "2023-12-31", "2024-02-29"] {
        let estimates = interpolator.interpolate(date).unwrap();
        assert_eq!(estimates.len(), dataset.len());
        for estimate in &estimates {
            assert!(
                (1.0..=3.0).contains(&estimate.risk),
                "{date}: {:?} out of range",
                estimate
            );
            assert!(estimate.location_name.is_some());
        }
    }
}

#[test]
fn lakeside_mid_january_matches_hand_computation() {
    let dataset = Arc::new(load_dataset());
    let interpolator = SeasonalInterpolator::new(dataset);

    let estimates = interpolator.interpolate("2023-01-16").unwrap();
    let lakeside = estimates
        .iter()
        .find(|e| e.location_name.as_deref() == Some("Lakeside"))
        .unwrap();

    // (15/31)*Low + (16/31)*Low - 0.0001*10 + 0.00001*5000; January and
    // February are both Low for Lakeside, so the blend stays at 1.0 and
    // only the terrain corrections move it.
    let expected = 1.0 - 0.001 + 0.05;
    assert!((lakeside.risk - expected).abs() < 1e-12);
}

#[test]
fn point_prediction_uses_the_shipped_artifact() {
    let predictor = build_predictor();

    // Mid-summer at a low, water-adjacent point: the tree's wet-season
    // branch applies.
    let summer = predictor
        .predict("2023-07-15", 45.93, 8.08, Some(6.0), Some(30.0))
        .unwrap();
    assert_eq!(summer, 2.9);

    // Same point in winter falls onto the dry-season branch.
    let winter = predictor
        .predict("2023-01-15", 45.93, 8.08, Some(6.0), Some(30.0))
        .unwrap();
    assert_eq!(winter, 1.7);

    assert!(summer > winter);
}

#[test]
fn imputation_fills_missing_features_from_neighbors() {
    let predictor = build_predictor();

    let with_imputed = predictor.predict("2023-07-15", 46.02, 8.11, None, None).unwrap();
    let repeated = predictor.predict("2023-07-15", 46.02, 8.11, None, None).unwrap();
    assert_eq!(with_imputed, repeated);
}

#[test]
fn trend_mean_sits_between_extremes() {
    let predictor = build_predictor();
    let series = RiskTimeSeries::new(&predictor);

    let trend = series.trend("2023-06-20", "2023-07-10", 46.02, 8.11).unwrap();
    assert_eq!(trend.points.len(), 21);

    let min = trend.points.iter().map(|p| p.risk).fold(f64::INFINITY, f64::min);
    let max = trend
        .points
        .iter()
        .map(|p| p.risk)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(trend.mean_risk >= min && trend.mean_risk <= max);
}

#[test]
fn unknown_location_lookup_fails_cleanly() {
    let err = load_dataset().get("Nonexistent").unwrap_err();
    assert!(matches!(err, RiskMapError::NotFound { .. }));
}

#[test]
fn classifier_artifact_is_order_checked() {
    // The engine trusts the artifact's declared column order; a tampered
    // artifact must be refused, not silently misread.
    let tampered = serde_json::json!({
        "feature_order": ["longitude", "latitude", "month", "elevation", "water_distance"],
        "tree": { "kind": "leaf", "value": 2.0 }
    })
    .to_string();

    let err = DecisionTreeModel::from_json(&tampered).unwrap_err();
    assert!(matches!(err, RiskMapError::ModelUnavailable { .. }));
}

#[test]
fn engine_handles_are_shareable_across_threads() {
    // One loaded artifact serves every request handler concurrently.
    let classifier: Arc<dyn PointClassifier> = Arc::new(load_classifier());
    let dataset = load_dataset();
    let predictor = Arc::new(PointRiskPredictor::new(
        FeatureImputer::new(&dataset).unwrap(),
        classifier,
    ));

    std::thread::scope(|scope| {
        for i in 0..4 {
            let predictor = Arc::clone(&predictor);
            scope.spawn(move || {
                let lat = 46.0 + 0.01 * f64::from(i);
                predictor
                    .predict("2023-07-15", lat, 8.1, None, None)
                    .unwrap();
            });
        }
    });
}
