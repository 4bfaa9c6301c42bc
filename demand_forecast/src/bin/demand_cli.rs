use clap::{Parser, Subcommand};
use demand_forecast::features::LAG_OFFSETS;
use demand_forecast::prediction::predict_demand;
use demand_forecast::report::{build_report, ReportRequest};
use demand_forecast::stores::{state_code, state_name, StoreId};
use demand_forecast::{
    DataLoader, FeatureBuilder, ForecastConfig, ForecastError, ModelStore, Result, SeriesKey,
    SessionContext,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "demand_cli", about = "Monthly demand predictions per product and store")]
struct Cli {
    /// TOML config file; defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List products and the stores they have models for
    Models,
    /// List the (product, store) series in the dataset
    Series,
    /// Predict demand for one product in one store
    Predict {
        #[arg(long)]
        item: String,
        #[arg(long)]
        store: StoreId,
    },
    /// Predict many pairs in one state and export a CSV table
    Report {
        /// State code (CA) or name (California)
        #[arg(long)]
        state: String,
        #[arg(long, value_delimiter = ',', required = true)]
        stores: Vec<StoreId>,
        #[arg(long, value_delimiter = ',', required = true)]
        items: Vec<String>,
        /// Output file; a timestamped name is used when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        /// Name recorded in the report
        #[arg(long)]
        user: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ForecastConfig::from_file(path)?,
        None => ForecastConfig::default(),
    };
    let builder = FeatureBuilder::new(config.target_period()?);
    let mut models = ModelStore::open(&config.models_dir)?;

    match cli.command {
        Command::Models => {
            if models.registry().is_empty() {
                println!("No models found in {}", config.models_dir.display());
            }
            for item in models.registry().items() {
                let stores: Vec<String> = models
                    .registry()
                    .stores_for(item)
                    .iter()
                    .map(|store| format!("{} ({})", store, store.state_name()))
                    .collect();
                println!("{}: {}", item, stores.join(", "));
            }
        }
        Command::Series => {
            let dataset = DataLoader::from_csv(&config.data_path)?;
            for key in dataset.keys()? {
                let modelled = StoreId::parse(&key.store_id)
                    .map(|store| models.registry().contains(&key.item_id, &store))
                    .unwrap_or(false);
                let marker = if modelled { "" } else { " (no model)" };
                println!("{} / {}{}", key.item_id, key.store_id, marker);
            }
        }
        Command::Predict { item, store } => {
            let dataset = DataLoader::from_csv(&config.data_path)?;
            let key = SeriesKey::new(item, store.as_str());
            let model = models.get(&key)?;
            let history = dataset.history(&key)?;
            let features = builder.build(&history)?;
            let lags: Vec<String> = LAG_OFFSETS
                .iter()
                .filter_map(|&offset| {
                    features
                        .lag(offset)
                        .map(|value| format!("lag_{}={:.2}", offset, value))
                })
                .collect();
            let result = predict_demand(&history, model.as_ref(), &builder)?;

            println!(
                "{} / {} ({}) for {}",
                key.item_id,
                store.label(),
                store.state_name(),
                builder.period()
            );
            println!(
                "{}, rolling_mean_3={:.2}",
                lags.join(", "),
                features.rolling_mean_3
            );
            print!("{}", result);
        }
        Command::Report {
            state,
            stores,
            items,
            out,
            user,
        } => {
            let code = resolve_state(&state)?;
            let mut session = SessionContext::new();
            if let Some(user) = user {
                session.login(&user)?;
                session.select_state(state_name(&code))?;
                if let Some(welcome) = session.welcome_message() {
                    println!("{}", welcome);
                }
            }

            let dataset = DataLoader::from_csv(&config.data_path)?;
            let request = ReportRequest::new(code, stores, items);
            let report = build_report(&request, &dataset, &mut models, &builder, Some(&session))?;

            if report.is_empty() {
                println!("No valid data for the selected combinations");
                return Ok(());
            }

            let path = out.unwrap_or_else(|| PathBuf::from(report.file_name()));
            report.to_csv_file(&path)?;
            println!(
                "Wrote {} rows to {} ({} skipped)",
                report.rows.len(),
                path.display(),
                report.skipped.len()
            );
        }
    }

    Ok(())
}

fn resolve_state(input: &str) -> Result<String> {
    let upper = input.to_ascii_uppercase();
    if state_name(&upper) != "Unknown" {
        return Ok(upper);
    }
    state_code(input)
        .map(str::to_string)
        .ok_or_else(|| ForecastError::InvalidParameter(format!("Unknown state '{}'", input)))
}
