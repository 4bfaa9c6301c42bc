//! Batch prediction reports
//!
//! A report covers every (item, store) combination of a request. A pair that
//! cannot be predicted is recorded as skipped; it never aborts the report.

use crate::data::{SalesDataset, SeriesKey};
use crate::error::{ForecastError, Result};
use crate::features::FeatureBuilder;
use crate::models::ModelStore;
use crate::prediction::{predict_demand, PredictionResult};
use crate::session::SessionContext;
use crate::stores::{state_name, StoreId};
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Column headers of the exported table
pub const REPORT_HEADERS: [&str; 6] = [
    "Product",
    "State",
    "Store",
    "Real demand",
    "Predicted demand",
    "% Error",
];

/// Which pairs to report on
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub state_code: String,
    pub stores: Vec<StoreId>,
    pub items: Vec<String>,
}

impl ReportRequest {
    pub fn new(state_code: impl Into<String>, stores: Vec<StoreId>, items: Vec<String>) -> Self {
        Self {
            state_code: state_code.into(),
            stores,
            items,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.state_code.is_empty() || self.stores.is_empty() || self.items.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Select a state, at least one store and at least one product".to_string(),
            ));
        }
        Ok(())
    }
}

/// One line of the report table
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub item_id: String,
    pub state: String,
    pub store: StoreId,
    pub prediction: PredictionResult,
}

impl ReportRow {
    fn record(&self) -> [String; 6] {
        [
            self.item_id.clone(),
            self.state.clone(),
            self.store.label(),
            format!("{:.2}", self.prediction.real_demand),
            format!("{:.2}", self.prediction.predicted_demand),
            format!("{:.2}%", self.prediction.error_percent),
        ]
    }
}

/// A pair that was eligible but could not be predicted
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPair {
    pub key: SeriesKey,
    pub reason: String,
}

/// Outcome of a report run
#[derive(Debug, Clone)]
pub struct Report {
    pub generated_at: DateTime<Local>,
    pub username: Option<String>,
    pub rows: Vec<ReportRow>,
    pub skipped: Vec<SkippedPair>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Suggested export file name, stamped with the generation time
    pub fn file_name(&self) -> String {
        format!(
            "prediction_report_{}.csv",
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }

    /// Write the table as CSV, preceded by `#` lines with the generation
    /// time and the user, when one was logged in
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(
            writer,
            "# Generated at: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        if let Some(username) = &self.username {
            writeln!(writer, "# User: {}", username)?;
        }

        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(REPORT_HEADERS)?;
        for row in &self.rows {
            csv.write_record(row.record())?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the table to a CSV file
    pub fn to_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(file)
    }
}

/// Predict every eligible pair of the request
pub fn build_report(
    request: &ReportRequest,
    dataset: &SalesDataset,
    models: &mut ModelStore,
    builder: &FeatureBuilder,
    session: Option<&SessionContext>,
) -> Result<Report> {
    request.validate()?;

    let state = state_name(&request.state_code).to_string();
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for item_id in &request.items {
        for store in &request.stores {
            if !models.registry().contains(item_id, store) {
                debug!(item = %item_id, store = %store, "No model for combination");
                continue;
            }
            if !store.in_state(&request.state_code) {
                debug!(item = %item_id, store = %store, "Store outside requested state");
                continue;
            }

            let key = SeriesKey::new(item_id.clone(), store.as_str());
            match predict_pair(&key, dataset, models, builder) {
                Ok(prediction) => rows.push(ReportRow {
                    item_id: item_id.clone(),
                    state: state.clone(),
                    store: store.clone(),
                    prediction,
                }),
                Err(err) => {
                    warn!(series = %key, error = %err, "Skipping pair");
                    skipped.push(SkippedPair {
                        key,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    info!(
        rows = rows.len(),
        skipped = skipped.len(),
        state = %state,
        "Built prediction report"
    );

    Ok(Report {
        generated_at: Local::now(),
        username: session.and_then(|s| s.username().map(str::to_string)),
        rows,
        skipped,
    })
}

fn predict_pair(
    key: &SeriesKey,
    dataset: &SalesDataset,
    models: &mut ModelStore,
    builder: &FeatureBuilder,
) -> Result<PredictionResult> {
    let model = models.get(key)?;
    let history = dataset.history(key)?;
    predict_demand(&history, model.as_ref(), builder)
}
