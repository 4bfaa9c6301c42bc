//! Single-pair demand prediction

use crate::data::Observation;
use crate::error::{ForecastError, Result};
use crate::features::{FeatureBuilder, FeatureVector};
use crate::models::Regressor;
use demand_math::{absolute_percentage_error, expm1};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Real vs predicted demand for one (item, store) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Last observed sales
    pub real_demand: f64,
    /// Model output mapped back from the log scale
    pub predicted_demand: f64,
    /// Absolute error as a percentage of `real_demand`, 0 when it is 0
    pub error_percent: f64,
}

impl PredictionResult {
    pub fn new(real_demand: f64, predicted_demand: f64) -> Self {
        Self {
            real_demand,
            predicted_demand,
            error_percent: error_percent(real_demand, predicted_demand),
        }
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Demand Prediction:")?;
        writeln!(f, "  Real:      {:.2}", self.real_demand)?;
        writeln!(f, "  Predicted: {:.2}", self.predicted_demand)?;
        writeln!(f, "  Error:     {:.2}%", self.error_percent)?;
        Ok(())
    }
}

/// Turn a log1p-scale model output into units
pub fn inverse_log_transform(predicted_log: f64) -> f64 {
    expm1(predicted_log)
}

/// `|real - predicted| / real * 100`, defined as 0 when `real` is 0
pub fn error_percent(real_demand: f64, predicted_demand: f64) -> f64 {
    absolute_percentage_error(real_demand, predicted_demand)
}

/// Run a regressor on prepared features and map the output to units
pub fn predict_from_features<R: Regressor + ?Sized>(
    regressor: &R,
    features: &FeatureVector,
) -> Result<f64> {
    let predicted_log = regressor.predict(features).map_err(|err| match err {
        ForecastError::Prediction(msg) => ForecastError::Prediction(msg),
        other => ForecastError::Prediction(format!("{} failed: {}", regressor.name(), other)),
    })?;

    Ok(inverse_log_transform(predicted_log))
}

/// Build features from `history`, predict, and compare with the last sale
pub fn predict_demand<R: Regressor + ?Sized>(
    history: &[Observation],
    regressor: &R,
    builder: &FeatureBuilder,
) -> Result<PredictionResult> {
    let features = builder.build(history)?;
    let predicted_demand = predict_from_features(regressor, &features)?;
    let real_demand = history
        .last()
        .map(|obs| obs.sales)
        .ok_or(ForecastError::EmptyHistory(None))?;

    debug!(
        model = regressor.name(),
        period = %builder.period(),
        real_demand,
        predicted_demand,
        "Predicted demand"
    );

    Ok(PredictionResult::new(real_demand, predicted_demand))
}
