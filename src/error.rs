//! Error types and handling for the `RiskMap` application

use thiserror::Error;

/// Main error type for the `RiskMap` application
#[derive(Error, Debug)]
pub enum RiskMapError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Dataset could not be loaded or failed validation
    #[error("Dataset error: {message}")]
    DataLoad { message: String },

    /// Date input that is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date: {message}")]
    InvalidDate { message: String },

    /// Coordinates outside the valid latitude/longitude ranges
    #[error("Invalid coordinates: {message}")]
    InvalidCoordinate { message: String },

    /// Dataset too small for the configured neighbor search
    #[error("Insufficient data: {message}")]
    InsufficientData { message: String },

    /// Model artifact missing, corrupt, or incompatible
    #[error("Model unavailable: {message}")]
    ModelUnavailable { message: String },

    /// Unknown location name
    #[error("Location not found: {name}")]
    NotFound { name: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl RiskMapError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new dataset error
    pub fn data_load<S: Into<String>>(message: S) -> Self {
        Self::DataLoad {
            message: message.into(),
        }
    }

    /// Create a new invalid-date error
    pub fn invalid_date<S: Into<String>>(message: S) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Create a new invalid-coordinate error
    pub fn invalid_coordinate<S: Into<String>>(message: S) -> Self {
        Self::InvalidCoordinate {
            message: message.into(),
        }
    }

    /// Create a new insufficient-data error
    pub fn insufficient_data<S: Into<String>>(message: S) -> Self {
        Self::InsufficientData {
            message: message.into(),
        }
    }

    /// Create a new model-unavailable error
    pub fn model_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ModelUnavailable {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RiskMapError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            RiskMapError::DataLoad { .. } => {
                "The location dataset could not be loaded. Please check the dataset file."
                    .to_string()
            }
            RiskMapError::InvalidDate { message } => {
                format!("Invalid date: {message}")
            }
            RiskMapError::InvalidCoordinate { message } => {
                format!("Invalid coordinates: {message}")
            }
            RiskMapError::InsufficientData { .. } => {
                "The dataset is too small for neighbor-based estimation.".to_string()
            }
            RiskMapError::ModelUnavailable { .. } => {
                "The trained risk model is unavailable. Point predictions are disabled until it is restored."
                    .to_string()
            }
            RiskMapError::NotFound { name } => {
                format!("No location named '{name}' is known")
            }
            RiskMapError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
