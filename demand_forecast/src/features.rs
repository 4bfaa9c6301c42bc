//! Feature construction for the monthly demand regressors
//!
//! Every model is trained on the same 22-field schema: context copied from
//! the latest observation, sales lags, a short rolling mean, the target year
//! and a one-hot encoding of the target month.

use crate::data::Observation;
use crate::error::{ForecastError, Result};
use demand_math::{lag_or_mean, trailing_mean};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field names in the order the regressors consume them
pub const FEATURE_COLUMNS: [&str; 22] = [
    "event_name_1",
    "snap",
    "sell_price",
    "lag_1",
    "lag_2",
    "lag_3",
    "lag_6",
    "lag_12",
    "rolling_mean_3",
    "year",
    "month_1",
    "month_2",
    "month_3",
    "month_4",
    "month_5",
    "month_6",
    "month_7",
    "month_8",
    "month_9",
    "month_10",
    "month_11",
    "month_12",
];

/// Lag offsets, counted back from the most recent observation
pub const LAG_OFFSETS: [usize; 5] = [1, 2, 3, 6, 12];

/// Window of the rolling sales mean
pub const ROLLING_WINDOW: usize = 3;

/// The month a feature vector is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TargetPeriod {
    year: i32,
    month: u32,
}

impl TargetPeriod {
    /// Create a target period, month in 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidParameter(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }

        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl Default for TargetPeriod {
    /// May 2016, the month the published models forecast
    fn default() -> Self {
        Self {
            year: 2016,
            month: 5,
        }
    }
}

impl fmt::Display for TargetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// A single field value handed to a regressor
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue<'a> {
    Number(f64),
    Category(Option<&'a str>),
}

/// Inputs for one regressor call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub event_name_1: Option<String>,
    pub snap: bool,
    pub sell_price: f64,
    pub lag_1: f64,
    pub lag_2: f64,
    pub lag_3: f64,
    pub lag_6: f64,
    pub lag_12: f64,
    pub rolling_mean_3: f64,
    pub year: i32,
    /// One-hot month indicators, index 0 is January
    pub months: [u8; 12],
}

impl FeatureVector {
    /// Fields paired with their names, in schema order
    pub fn fields(&self) -> Vec<(&'static str, FeatureValue<'_>)> {
        let mut fields = Vec::with_capacity(FEATURE_COLUMNS.len());
        fields.push((
            FEATURE_COLUMNS[0],
            FeatureValue::Category(self.event_name_1.as_deref()),
        ));

        let numeric = [
            if self.snap { 1.0 } else { 0.0 },
            self.sell_price,
            self.lag_1,
            self.lag_2,
            self.lag_3,
            self.lag_6,
            self.lag_12,
            self.rolling_mean_3,
            self.year as f64,
        ];
        let months = self.months.iter().map(|&flag| flag as f64);

        for (name, value) in FEATURE_COLUMNS[1..]
            .iter()
            .zip(numeric.into_iter().chain(months))
        {
            fields.push((*name, FeatureValue::Number(value)));
        }

        fields
    }

    /// Value of a lag field by offset
    pub fn lag(&self, offset: usize) -> Option<f64> {
        match offset {
            1 => Some(self.lag_1),
            2 => Some(self.lag_2),
            3 => Some(self.lag_3),
            6 => Some(self.lag_6),
            12 => Some(self.lag_12),
            _ => None,
        }
    }

    /// Month whose indicator is set
    pub fn active_month(&self) -> Option<u32> {
        self.months
            .iter()
            .position(|&flag| flag == 1)
            .map(|index| index as u32 + 1)
    }
}

/// Builds feature vectors from ordered sales histories
#[derive(Debug, Clone, Default)]
pub struct FeatureBuilder {
    period: TargetPeriod,
}

impl FeatureBuilder {
    pub fn new(period: TargetPeriod) -> Self {
        Self { period }
    }

    pub fn period(&self) -> TargetPeriod {
        self.period
    }

    /// Build the feature vector for the configured period.
    ///
    /// `observations` must be ordered oldest to newest. A lag whose offset
    /// reaches past the start of the history takes the mean of all sales
    /// instead; callers that need strictly causal lags must check the
    /// history length themselves.
    pub fn build(&self, observations: &[Observation]) -> Result<FeatureVector> {
        let latest = observations
            .last()
            .ok_or(ForecastError::EmptyHistory(None))?;

        let sales: Vec<f64> = observations.iter().map(|obs| obs.sales).collect();
        let lag = |offset| lag_or_mean(&sales, offset);

        let mut months = [0u8; 12];
        months[self.period.month() as usize - 1] = 1;

        Ok(FeatureVector {
            event_name_1: latest.event_name_1.clone(),
            snap: latest.snap,
            sell_price: latest.sell_price,
            lag_1: lag(1)?,
            lag_2: lag(2)?,
            lag_3: lag(3)?,
            lag_6: lag(6)?,
            lag_12: lag(12)?,
            rolling_mean_3: trailing_mean(&sales, ROLLING_WINDOW)?,
            year: self.period.year(),
            months,
        })
    }
}
