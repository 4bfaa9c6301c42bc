//! # Demand Forecast
//!
//! Monthly demand forecasting for (product, store) pairs from historical
//! sales and a pre-trained regressor per pair.
//!
//! ## Features
//!
//! - Sales dataset loading and per-pair history extraction (CSV via polars)
//! - Feature construction: sales lags with mean fallback, rolling mean,
//!   one-hot target month
//! - Per-pair model discovery and cached loading
//! - Single-pair prediction and batch reports with CSV export
//! - Explicit session context and TOML configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use demand_forecast::{DataLoader, FeatureBuilder, ModelStore, SeriesKey, TargetPeriod};
//! use demand_forecast::prediction::predict_demand;
//!
//! fn main() -> demand_forecast::Result<()> {
//!     let dataset = DataLoader::from_csv("data/sales.csv")?;
//!     let mut models = ModelStore::open("models")?;
//!
//!     let key = SeriesKey::new("FOODS_3_090", "CA_1");
//!     let history = dataset.history(&key)?;
//!     let model = models.get(&key)?;
//!
//!     let builder = FeatureBuilder::new(TargetPeriod::new(2016, 5)?);
//!     let result = predict_demand(&history, model.as_ref(), &builder)?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod models;
pub mod prediction;
pub mod report;
pub mod session;
pub mod stores;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, Observation, SalesDataset, SeriesKey};
pub use crate::error::{ForecastError, Result};
pub use crate::features::{FeatureBuilder, FeatureVector, TargetPeriod};
pub use crate::models::{LinearRegressor, ModelRegistry, ModelStore, Regressor};
pub use crate::prediction::PredictionResult;
pub use crate::session::SessionContext;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
