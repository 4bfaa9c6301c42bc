//! Summary statistics over ordered sales histories
//!
//! All functions treat the slice as ordered oldest to newest.

use crate::moving_averages::SimpleMovingAverage;
use crate::{MathError, Result};

/// Arithmetic mean of the whole slice
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the mean of an empty series".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of the last `min(window, values.len())` values.
///
/// Short series degrade to fewer terms instead of failing.
pub fn trailing_mean(values: &[f64], window: usize) -> Result<f64> {
    let mut sma = SimpleMovingAverage::new(window)?;
    for &value in values {
        sma.update(value);
    }
    sma.partial_value()
}

/// The value `offset` positions from the end, counting the last value as 1.
///
/// `offset = 1` is the most recent value, `offset = 2` the one before it.
/// When the series holds fewer than `offset` values the mean of the whole
/// series is returned instead. This fallback is not causal: it mixes the
/// full history into a single lag slot.
pub fn lag_or_mean(values: &[f64], offset: usize) -> Result<f64> {
    if offset == 0 {
        return Err(MathError::InvalidInput(
            "Lag offset must be at least 1".to_string(),
        ));
    }

    if values.len() >= offset {
        Ok(values[values.len() - offset])
    } else {
        mean(values)
    }
}
