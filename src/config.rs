//! Configuration management for the `RiskMap` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::RiskMapError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `RiskMap` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RiskMapConfig {
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Dataset and model artifact locations
    #[serde(default)]
    pub data: DataConfig,
    /// Engine tuning knobs
    #[serde(default)]
    pub engine: EngineConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Web server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// TCP port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with the built map frontend
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

/// Dataset and model artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV table of known locations
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,
    /// Trained classifier artifact (JSON)
    #[serde(default = "default_classifier_path")]
    pub classifier_path: String,
}

/// Engine tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Neighbor count for feature imputation
    #[serde(default = "default_neighbors")]
    pub neighbors: usize,
    /// Maximum number of days in one trend request
    #[serde(default = "default_max_trend_days")]
    pub max_trend_days: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_frontend_dir() -> String {
    "frontend/dist".to_string()
}

fn default_dataset_path() -> String {
    "data/locations.csv".to_string()
}

fn default_classifier_path() -> String {
    "models/classifier.json".to_string()
}

fn default_neighbors() -> usize {
    5
}

fn default_max_trend_days() -> usize {
    366
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            frontend_dir: default_frontend_dir(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            classifier_path: default_classifier_path(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neighbors: default_neighbors(),
            max_trend_days: default_max_trend_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl RiskMapConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config/default.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with RISKMAP_ prefix
        builder = builder.add_source(
            Environment::with_prefix("RISKMAP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: RiskMapConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("riskmap").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.engine.neighbors == 0 {
            return Err(RiskMapError::config("Neighbor count must be at least 1").into());
        }

        if self.engine.neighbors > 100 {
            return Err(RiskMapError::config("Neighbor count cannot exceed 100").into());
        }

        if self.engine.max_trend_days == 0 {
            return Err(RiskMapError::config("Trend range must allow at least 1 day").into());
        }

        if self.engine.max_trend_days > 3660 {
            return Err(
                RiskMapError::config("Trend range cannot exceed 3660 days (10 years)").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(RiskMapError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        if self.data.dataset_path.is_empty() {
            return Err(RiskMapError::config("Dataset path cannot be empty").into());
        }

        if self.data.classifier_path.is_empty() {
            return Err(RiskMapError::config("Classifier path cannot be empty").into());
        }

        Ok(())
    }
}
