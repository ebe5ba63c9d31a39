//! Data models for the `RiskMap` application
//!
//! This module contains the core domain models organized by concern:
//! - Location: named locations with static features and monthly risk
//! - Estimate: risk estimates, feature vectors, and trend series

pub mod estimate;
pub mod location;

// Re-export all public types for convenient access
pub use estimate::{FeatureVector, RiskEstimate, RiskTrend, TrendPoint};
pub use location::{LocationRecord, RiskLevel};
