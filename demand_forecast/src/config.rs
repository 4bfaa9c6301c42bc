//! Runtime configuration

use crate::error::{ForecastError, Result};
use crate::features::TargetPeriod;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where to find data and models, and which month to forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// CSV with the historical observations
    pub data_path: PathBuf,
    /// Directory holding `model_<item>_<store>.json` files
    pub models_dir: PathBuf,
    pub target_year: i32,
    pub target_month: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        let period = TargetPeriod::default();
        Self {
            data_path: PathBuf::from("data/sales.csv"),
            models_dir: PathBuf::from("models"),
            target_year: period.year(),
            target_month: period.month(),
        }
    }
}

impl ForecastConfig {
    /// Read a TOML config file; missing keys take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.target_period()?;
        Ok(config)
    }

    /// The configured target month, validated
    pub fn target_period(&self) -> Result<TargetPeriod> {
        TargetPeriod::new(self.target_year, self.target_month)
            .map_err(|err| ForecastError::Config(err.to_string()))
    }
}
