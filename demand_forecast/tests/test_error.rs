use demand_forecast::{ForecastError, SeriesKey};
use demand_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    // Test IO error conversion
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    // Test JSON error conversion
    let json_error = serde_json::from_str::<f64>("nope").unwrap_err();
    let forecast_error = ForecastError::from(json_error);
    assert!(matches!(forecast_error, ForecastError::Serialization(_)));

    // Test math error conversion
    let math_error = MathError::InsufficientData("empty".to_string());
    let forecast_error = ForecastError::from(math_error);
    assert!(matches!(forecast_error, ForecastError::Math(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::MissingFeature(vec!["snap".to_string(), "month".to_string()]);
    assert_eq!(error.to_string(), "Missing required columns: snap, month");

    let error = ForecastError::EmptyHistory(Some(SeriesKey::new("FOODS_1", "CA_1")));
    assert_eq!(error.to_string(), "No data available for FOODS_1@CA_1");

    let error = ForecastError::EmptyHistory(None);
    assert_eq!(error.to_string(), "No data available");

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}
