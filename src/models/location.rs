//! Location records and ordinal risk levels

use serde::{Deserialize, Serialize};

use crate::error::RiskMapError;

/// Ordinal mosquito risk level for a calendar month
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    /// Low risk (ordinal 1)
    Low,
    /// Moderate risk (ordinal 2)
    Moderate,
    /// High risk (ordinal 3)
    High,
}

impl RiskLevel {
    /// Numeric ordinal used by the interpolation math
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            RiskLevel::Low => 1.0,
            RiskLevel::Moderate => 2.0,
            RiskLevel::High => 3.0,
        }
    }

    /// Parse a dataset label like "Low" into a risk level
    pub fn parse_label(label: &str) -> Result<Self, RiskMapError> {
        match label.trim() {
            "Low" => Ok(RiskLevel::Low),
            "Moderate" => Ok(RiskLevel::Moderate),
            "High" => Ok(RiskLevel::High),
            other => Err(RiskMapError::data_load(format!(
                "unrecognized risk label '{other}' (expected Low, Moderate, or High)"
            ))),
        }
    }
}

/// A named location with its static features and monthly risk profile
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationRecord {
    /// Location name (unique within the dataset)
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Elevation in meters above sea level
    pub elevation: f64,
    /// Distance to the nearest body of water in meters
    pub water_distance: f64,
    /// Ordinal risk per calendar month, January first
    pub monthly_risk: [RiskLevel; 12],
}

impl LocationRecord {
    /// Risk level for a 1-based month index
    ///
    /// # Panics
    /// Panics if `month` is outside 1..=12; callers extract the index from a
    /// parsed calendar date, which cannot produce anything else.
    #[must_use]
    pub fn risk_for_month(&self, month: u32) -> RiskLevel {
        assert!((1..=12).contains(&month), "month index {month} out of range");
        self.monthly_risk[(month - 1) as usize]
    }

    /// Validate coordinate ranges
    pub fn validate(&self) -> Result<(), RiskMapError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(RiskMapError::data_load(format!(
                "location '{}' has latitude {} outside [-90, 90]",
                self.name, self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(RiskMapError::data_load(format!(
                "location '{}' has longitude {} outside [-180, 180]",
                self.name, self.longitude
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at(lat: f64, lon: f64) -> LocationRecord {
        LocationRecord {
            name: "Test".to_string(),
            latitude: lat,
            longitude: lon,
            elevation: 10.0,
            water_distance: 100.0,
            monthly_risk: [RiskLevel::Low; 12],
        }
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(RiskLevel::parse_label("Low").unwrap(), RiskLevel::Low);
        assert_eq!(
            RiskLevel::parse_label(" Moderate ").unwrap(),
            RiskLevel::Moderate
        );
        assert_eq!(RiskLevel::parse_label("High").unwrap(), RiskLevel::High);
        assert!(RiskLevel::parse_label("Extreme").is_err());
    }

    #[test]
    fn test_risk_values_are_ordered() {
        assert!(RiskLevel::Low.value() < RiskLevel::Moderate.value());
        assert!(RiskLevel::Moderate.value() < RiskLevel::High.value());
    }

    #[test]
    fn test_risk_for_month_wraps_calendar() {
        let mut monthly = [RiskLevel::Low; 12];
        monthly[0] = RiskLevel::High; // January
        monthly[11] = RiskLevel::Moderate; // December
        let record = LocationRecord {
            monthly_risk: monthly,
            ..record_at(46.0, 8.0)
        };

        assert_eq!(record.risk_for_month(1), RiskLevel::High);
        assert_eq!(record.risk_for_month(12), RiskLevel::Moderate);
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(record_at(46.0, 8.0).validate().is_ok());
        assert!(record_at(91.0, 8.0).validate().is_err());
        assert!(record_at(46.0, -181.0).validate().is_err());
    }
}
