use approx::assert_relative_eq;
use demand_forecast::features::{FeatureBuilder, TargetPeriod, FEATURE_COLUMNS, LAG_OFFSETS};
use demand_forecast::Observation;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn history(sales: &[f64]) -> Vec<Observation> {
    sales.iter().map(|&s| Observation::with_sales(s)).collect()
}

fn may_2016() -> FeatureBuilder {
    FeatureBuilder::new(TargetPeriod::new(2016, 5).unwrap())
}

#[test]
fn test_thirteen_month_history() {
    let sales = [
        10.0, 12.0, 9.0, 11.0, 8.0, 7.0, 15.0, 14.0, 13.0, 12.0, 11.0, 10.0, 20.0,
    ];
    let features = may_2016().build(&history(&sales)).unwrap();

    assert_eq!(features.lag_1, 20.0);
    assert_eq!(features.lag_2, 10.0);
    assert_eq!(features.lag_3, 11.0);
    // sixth value from the end
    assert_eq!(features.lag_6, 14.0);
    assert_eq!(features.lag_12, 12.0);
    assert_relative_eq!(features.rolling_mean_3, 41.0 / 3.0);
    assert_eq!(features.year, 2016);
    assert_eq!(features.months, [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_single_observation() {
    let features = may_2016().build(&history(&[5.0])).unwrap();

    for offset in LAG_OFFSETS {
        assert_eq!(features.lag(offset), Some(5.0), "lag_{}", offset);
    }
    assert_eq!(features.rolling_mean_3, 5.0);
}

#[rstest]
#[case(&[3.0])]
#[case(&[0.0])]
#[case(&[7.5])]
fn test_short_history_lags_use_full_mean(#[case] sales: &[f64]) {
    let features = may_2016().build(&history(sales)).unwrap();
    let mean = sales.iter().sum::<f64>() / sales.len() as f64;

    for offset in [2, 3, 6, 12] {
        assert_eq!(features.lag(offset), Some(mean));
    }
}

#[test]
fn test_each_lag_falls_back_independently() {
    // Four points: lag_2 and lag_3 exist, lag_6 and lag_12 fall back
    let features = may_2016().build(&history(&[2.0, 4.0, 6.0, 8.0])).unwrap();

    assert_eq!(features.lag_1, 8.0);
    assert_eq!(features.lag_2, 6.0);
    assert_eq!(features.lag_3, 4.0);
    assert_eq!(features.lag_6, 5.0);
    assert_eq!(features.lag_12, 5.0);
}

#[test]
fn test_twelve_points_reach_lag_12() {
    let sales: Vec<f64> = (1..=12).map(f64::from).collect();
    let features = may_2016().build(&history(&sales)).unwrap();
    assert_eq!(features.lag_12, 1.0);
    assert_eq!(features.lag_6, 7.0);
}

#[rstest]
fn test_lag_12_without_fallback(#[values(13, 14, 20, 36)] n: usize) {
    let sales: Vec<f64> = (0..n).map(|i| (i * i) as f64).collect();
    let features = may_2016().build(&history(&sales)).unwrap();
    assert_eq!(features.lag_12, sales[n - 12]);
}

#[rstest]
fn test_rolling_mean_over_last_three(#[values(1, 2, 3, 4, 9)] n: usize) {
    let sales: Vec<f64> = (0..n).map(|i| 1.5 * i as f64 + 2.0).collect();
    let features = may_2016().build(&history(&sales)).unwrap();

    let tail = &sales[n.saturating_sub(3)..];
    let expected = tail.iter().sum::<f64>() / tail.len() as f64;
    assert_relative_eq!(features.rolling_mean_3, expected);
}

#[rstest]
fn test_exactly_one_month_indicator(
    #[values(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12)] month: u32,
) {
    let builder = FeatureBuilder::new(TargetPeriod::new(2017, month).unwrap());
    let features = builder.build(&history(&[1.0, 2.0])).unwrap();

    assert_eq!(features.months.iter().filter(|&&flag| flag == 1).count(), 1);
    assert_eq!(features.months.iter().filter(|&&flag| flag == 0).count(), 11);
    assert_eq!(features.active_month(), Some(month));
    assert_eq!(features.year, 2017);

    let fields = features.fields();
    assert_eq!(fields.len(), FEATURE_COLUMNS.len());
    assert_eq!(fields[9 + month as usize].0, format!("month_{}", month));
}

#[test]
fn test_input_is_not_modified() {
    let observations = history(&[1.0, 2.0, 3.0]);
    let before = observations.clone();
    may_2016().build(&observations).unwrap();
    assert_eq!(observations, before);
}
