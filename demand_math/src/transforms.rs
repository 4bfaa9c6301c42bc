//! Inverse of the log1p scale the regressors predict on, and forecast error

/// `exp(y) - 1`, turning a log-scale prediction back into units sold
pub fn expm1(log_value: f64) -> f64 {
    log_value.exp_m1()
}

/// Absolute percentage error of `predicted` against `actual`.
///
/// Returns 0 when `actual` is 0. This is a reporting policy, the error is
/// undefined there.
pub fn absolute_percentage_error(actual: f64, predicted: f64) -> f64 {
    if actual == 0.0 {
        return 0.0;
    }

    (actual - predicted).abs() / actual * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_expm1_inverts_log1p() {
        for value in [0.0_f64, 1.0, 12.5, 300.0] {
            assert_relative_eq!(expm1(value.ln_1p()), value, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_expm1_zero_and_monotone() {
        assert_eq!(expm1(0.0), 0.0);
        let mut previous = expm1(-5.0);
        for step in -49..50 {
            let current = expm1(step as f64 / 10.0);
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn test_percentage_error() {
        assert_relative_eq!(absolute_percentage_error(20.0, 15.0), 25.0);
        assert_relative_eq!(absolute_percentage_error(20.0, 25.0), 25.0);
        assert_eq!(absolute_percentage_error(0.0, 42.0), 0.0);
        assert_eq!(absolute_percentage_error(0.0, 0.0), 0.0);
    }
}
