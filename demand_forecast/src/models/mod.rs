//! Trained demand regressors
//!
//! A regressor maps a [`FeatureVector`] to a demand estimate on the log1p
//! scale. Training happens elsewhere; this module only loads and applies
//! already-fitted models.

use crate::error::Result;
use crate::features::FeatureVector;
use std::fmt::Debug;

/// A fitted model predicting log-scale demand
pub trait Regressor: Debug {
    /// Predict `ln(1 + demand)` for one feature vector
    fn predict(&self, features: &FeatureVector) -> Result<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

impl<R: Regressor + ?Sized> Regressor for Box<R> {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        (**self).predict(features)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

pub mod linear;
pub mod registry;

pub use linear::LinearRegressor;
pub use registry::{ModelRegistry, ModelStore};
