//! Linear regressor stored as JSON

use crate::error::{ForecastError, Result};
use crate::features::{FeatureValue, FeatureVector, FEATURE_COLUMNS};
use crate::models::Regressor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Weighted sum of the numeric features plus a per-event offset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    /// Name of the model
    #[serde(default)]
    pub name: String,
    /// Constant term
    #[serde(default)]
    pub intercept: f64,
    /// Weight per numeric feature name; absent features weigh 0
    #[serde(default)]
    pub weights: HashMap<String, f64>,
    /// Offset per `event_name_1` label; unknown labels and no event add 0
    #[serde(default)]
    pub event_weights: HashMap<String, f64>,
}

impl LinearRegressor {
    /// Create a regressor with only an intercept
    pub fn new(name: impl Into<String>, intercept: f64) -> Self {
        Self {
            name: name.into(),
            intercept,
            ..Self::default()
        }
    }

    /// Set the weight of one feature
    pub fn with_weight(mut self, feature: &str, weight: f64) -> Result<Self> {
        if feature == FEATURE_COLUMNS[0] || !FEATURE_COLUMNS.contains(&feature) {
            return Err(ForecastError::InvalidParameter(format!(
                "'{}' is not a numeric feature",
                feature
            )));
        }
        self.weights.insert(feature.to_string(), weight);
        Ok(self)
    }

    /// Set the offset of one event label
    pub fn with_event_weight(mut self, event: &str, weight: f64) -> Self {
        self.event_weights.insert(event.to_string(), weight);
        self
    }

    /// Load a regressor from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a regressor from JSON, rejecting unknown feature names
    pub fn from_json(content: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(content)?;

        if let Some(unknown) = model
            .weights
            .keys()
            .find(|name| !FEATURE_COLUMNS[1..].contains(&name.as_str()))
        {
            return Err(ForecastError::InvalidParameter(format!(
                "Model '{}' weighs unknown feature '{}'",
                model.name, unknown
            )));
        }

        Ok(model)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let mut total = self.intercept;

        for (name, value) in features.fields() {
            total += match value {
                FeatureValue::Number(x) => self.weights.get(name).copied().unwrap_or(0.0) * x,
                FeatureValue::Category(Some(label)) => {
                    self.event_weights.get(label).copied().unwrap_or(0.0)
                }
                FeatureValue::Category(None) => 0.0,
            };
        }

        if !total.is_finite() {
            return Err(ForecastError::Prediction(format!(
                "Model '{}' produced a non-finite value",
                self.name
            )));
        }

        Ok(total)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
