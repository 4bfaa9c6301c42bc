use demand_forecast::features::FeatureBuilder;
use demand_forecast::prediction::predict_demand;
use demand_forecast::{LinearRegressor, Observation, TargetPeriod};

fn main() -> demand_forecast::Result<()> {
    // Thirteen months of sales for one product in one store, oldest first
    let sales = [
        10.0, 12.0, 9.0, 11.0, 8.0, 7.0, 15.0, 14.0, 13.0, 12.0, 11.0, 10.0, 20.0,
    ];
    let history: Vec<Observation> = sales.iter().map(|&s| Observation::with_sales(s)).collect();

    let builder = FeatureBuilder::new(TargetPeriod::new(2016, 5)?);
    let features = builder.build(&history)?;
    println!("Features for {}:", builder.period());
    for (name, value) in features.fields() {
        println!("  {:<15} {:?}", name, value);
    }

    // A toy model: log1p of a blend of the latest sale and the rolling mean
    let model = LinearRegressor::new("toy", 0.3)
        .with_weight("lag_1", 0.05)?
        .with_weight("rolling_mean_3", 0.1)?;

    let result = predict_demand(&history, &model, &builder)?;
    print!("{}", result);
    Ok(())
}
