//! Error types for the demand_forecast crate

use crate::data::SeriesKey;
use demand_math::MathError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No observations exist for the requested (item, store) pair
    #[error("No data available{}", describe_series(.0))]
    EmptyHistory(Option<SeriesKey>),

    /// The dataset lacks columns the feature schema requires
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingFeature(Vec<String>),

    /// No trained model exists for the requested pair
    #[error("No model found for {0}")]
    ModelNotFound(SeriesKey),

    /// The regressor failed or returned an unusable value
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error reading or parsing configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error (de)serializing model files
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error writing CSV output
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from feature math
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

fn describe_series(key: &Option<SeriesKey>) -> String {
    key.as_ref()
        .map(|key| format!(" for {}", key))
        .unwrap_or_default()
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::Config(err.to_string())
    }
}
