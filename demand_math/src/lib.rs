//! # Demand Math
//!
//! Numeric building blocks for monthly demand forecasting.
//! This crate provides the lag, rolling-window and log-scale calculations
//! that feature construction and model post-processing rely on.

use thiserror::Error;

pub mod moving_averages;
pub mod statistics;
pub mod transforms;

pub use moving_averages::SimpleMovingAverage;
pub use statistics::{lag_or_mean, mean, trailing_mean};
pub use transforms::{absolute_percentage_error, expm1};

/// Errors that can occur in demand calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for demand math operations
pub type Result<T> = std::result::Result<T, MathError>;
