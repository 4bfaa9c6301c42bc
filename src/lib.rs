//! # Demand Forecast Workspace
//!
//! Umbrella crate re-exporting the forecasting crates of this workspace.
//!
//! ## Example
//!
//! ```
//! use demand_forecast_workspace::forecast::{FeatureBuilder, Observation};
//!
//! let history: Vec<Observation> = [4.0, 6.0].iter().map(|&s| Observation::with_sales(s)).collect();
//! let features = FeatureBuilder::default().build(&history).unwrap();
//! assert_eq!(features.lag_1, 6.0);
//! assert_eq!(features.active_month(), Some(5));
//! ```

/// Dataset loading, feature construction, models and reports
pub use demand_forecast as forecast;

/// Lag, rolling mean and log transform helpers
pub use demand_math as math;
