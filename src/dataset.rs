//! Location dataset loading and access
//!
//! The dataset is a CSV table of named locations with coordinates, static
//! terrain features, and one ordinal risk label per calendar month. It is
//! loaded once at startup, validated, and shared read-only for the life of
//! the process.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::RiskMapError;
use crate::models::{LocationRecord, RiskLevel};

/// Raw CSV row as exported by the upstream data pipeline.
///
/// Column names match the export format: `location`, capitalized coordinate
/// columns, `dist_from_water`, and one lowercase month column per calendar
/// month carrying a `Low`/`Moderate`/`High` label.
#[derive(Debug, Deserialize)]
struct RawRow {
    location: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    elevation: f64,
    dist_from_water: f64,
    january: String,
    february: String,
    march: String,
    april: String,
    may: String,
    june: String,
    july: String,
    august: String,
    september: String,
    october: String,
    november: String,
    december: String,
}

impl RawRow {
    fn into_record(self) -> Result<LocationRecord, RiskMapError> {
        let labels = [
            &self.january,
            &self.february,
            &self.march,
            &self.april,
            &self.may,
            &self.june,
            &self.july,
            &self.august,
            &self.september,
            &self.october,
            &self.november,
            &self.december,
        ];

        let mut monthly_risk = [RiskLevel::Low; 12];
        for (slot, label) in monthly_risk.iter_mut().zip(labels) {
            *slot = RiskLevel::parse_label(label).map_err(|e| {
                RiskMapError::data_load(format!("location '{}': {e}", self.location))
            })?;
        }

        let record = LocationRecord {
            name: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            elevation: self.elevation,
            water_distance: self.dist_from_water,
            monthly_risk,
        };
        record.validate()?;
        Ok(record)
    }
}

/// Validated in-memory table of known locations
#[derive(Debug, Clone)]
pub struct LocationDataset {
    records: Vec<LocationRecord>,
}

impl LocationDataset {
    /// Load and validate the dataset from a CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RiskMapError> {
        let path = path.as_ref();
        info!("Loading location dataset from {}", path.display());

        let file = File::open(path).map_err(|e| {
            RiskMapError::data_load(format!("failed to open {}: {e}", path.display()))
        })?;
        Self::from_reader(file)
    }

    /// Load and validate the dataset from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RiskMapError> {
        let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let mut records = Vec::new();
        for (index, row) in csv_reader.deserialize::<RawRow>().enumerate() {
            let raw = row.map_err(|e| {
                RiskMapError::data_load(format!("row {}: {e}", index + 1))
            })?;
            records.push(raw.into_record()?);
        }

        if records.is_empty() {
            return Err(RiskMapError::data_load("dataset contains no locations"));
        }

        debug!("Loaded {} location records", records.len());
        Ok(Self { records })
    }

    /// Build a dataset from already-parsed records (used by tests and tooling)
    pub fn from_records(records: Vec<LocationRecord>) -> Result<Self, RiskMapError> {
        if records.is_empty() {
            return Err(RiskMapError::data_load("dataset contains no locations"));
        }
        for record in &records {
            record.validate()?;
        }
        Ok(Self { records })
    }

    /// All records, in dataset order
    #[must_use]
    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    /// Number of known locations
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Coordinate and feature columns used as imputation training data
    #[must_use]
    pub fn feature_points(&self) -> Vec<([f64; 2], f64, f64)> {
        self.records
            .iter()
            .map(|record| {
                (
                    [record.latitude, record.longitude],
                    record.elevation,
                    record.water_distance,
                )
            })
            .collect()
    }

    /// Look up a record by exact name match
    pub fn get(&self, name: &str) -> Result<&LocationRecord, RiskMapError> {
        self.records
            .iter()
            .find(|record| record.name == name)
            .ok_or_else(|| RiskMapError::not_found(name))
    }
}
