//! `RiskMap` - Mosquito-borne disease risk estimation and mapping
//!
//! This library provides the core functionality for seasonal risk
//! interpolation over known locations, nearest-neighbor feature imputation,
//! and classifier-backed risk prediction for arbitrary map points.

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod risk;
pub mod web;

// Re-export core types for public API
pub use config::RiskMapConfig;
pub use dataset::LocationDataset;
pub use error::RiskMapError;
pub use models::{FeatureVector, LocationRecord, RiskEstimate, RiskLevel, RiskTrend};
pub use risk::{
    DecisionTreeModel, FeatureImputer, PointClassifier, PointRiskPredictor, RiskTimeSeries,
    SeasonalInterpolator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RiskMapError>;
