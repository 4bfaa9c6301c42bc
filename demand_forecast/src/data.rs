//! Historical sales data handling
//!
//! The dataset is a CSV with one row per (item, store, month). Rows for a
//! given pair are expected in chronological order; that order is kept as-is
//! when a history is extracted.

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Columns the dataset must carry to build feature vectors
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "store_id",
    "item_id",
    "sales",
    "sell_price",
    "event_name_1",
    "snap",
    "month",
];

/// One historical record for a fixed (item, store) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Units sold
    pub sales: f64,
    /// Selling price
    pub sell_price: f64,
    /// Event label, `None` when the row has no event
    pub event_name_1: Option<String>,
    /// SNAP purchase day flag
    pub snap: bool,
    /// Month of year, 1 to 12
    pub month: u32,
    /// Calendar year, when the dataset carries it
    pub year: Option<i32>,
}

impl Observation {
    /// Observation with only sales set, the rest neutral
    pub fn with_sales(sales: f64) -> Self {
        Self {
            sales,
            sell_price: 0.0,
            event_name_1: None,
            snap: false,
            month: 1,
            year: None,
        }
    }
}

/// Exact-match key of a sales series
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesKey {
    pub item_id: String,
    pub store_id: String,
}

impl SeriesKey {
    pub fn new(item_id: impl Into<String>, store_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            store_id: store_id.into(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.item_id, self.store_id)
    }
}

/// Data loader for historical sales data
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a sales dataset from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<SalesDataset> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        info!(path = %path.display(), rows = df.height(), "Loaded sales dataset");
        SalesDataset::from_dataframe(df)
    }
}

/// A validated table of observations keyed by (item, store)
#[derive(Debug, Clone)]
pub struct SalesDataset {
    df: DataFrame,
}

impl SalesDataset {
    /// Wrap a DataFrame, checking it carries every required column
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        let present: HashSet<&str> = df.get_column_names().into_iter().collect();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !present.contains(*column))
            .map(|column| column.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ForecastError::MissingFeature(missing));
        }

        Ok(Self { df })
    }

    /// Number of rows across all series
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Distinct series keys in first-seen order
    pub fn keys(&self) -> Result<Vec<SeriesKey>> {
        let items = string_column(&self.df, "item_id")?;
        let stores = string_column(&self.df, "store_id")?;

        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        for (item, store) in items.into_iter().zip(stores) {
            if let (Some(item), Some(store)) = (item, store) {
                let key = SeriesKey::new(item, store);
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
        }

        Ok(keys)
    }

    /// Observations for one (item, store) pair, in file order
    pub fn history(&self, key: &SeriesKey) -> Result<Vec<Observation>> {
        let filtered = self
            .df
            .clone()
            .lazy()
            .filter(
                col("store_id")
                    .eq(lit(key.store_id.as_str()))
                    .and(col("item_id").eq(lit(key.item_id.as_str()))),
            )
            .collect()?;

        debug!(series = %key, rows = filtered.height(), "Filtered sales history");

        if filtered.height() == 0 {
            return Err(ForecastError::EmptyHistory(Some(key.clone())));
        }

        observations_from_frame(&filtered)
    }
}

/// Convert every row of a frame into an observation
fn observations_from_frame(df: &DataFrame) -> Result<Vec<Observation>> {
    let sales = float_column(df, "sales")?;
    let prices = float_column(df, "sell_price")?;
    let snaps = float_column(df, "snap")?;
    let events = string_column(df, "event_name_1")?;
    let (months, date_years) = month_column(df)?;

    let years: Vec<Option<i32>> = if df.get_column_names().contains(&"year") {
        let series = df.column("year")?.cast(&DataType::Int64)?;
        series
            .i64()?
            .into_iter()
            .map(|year| year.map(|y| y as i32))
            .collect()
    } else {
        date_years
    };

    let mut observations = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        if !sales[row].is_finite() || sales[row] < 0.0 {
            return Err(ForecastError::DataError(format!(
                "Invalid sales value {} at row {}",
                sales[row], row
            )));
        }

        observations.push(Observation {
            sales: sales[row],
            sell_price: prices[row],
            event_name_1: events[row].clone().filter(|event| !event.trim().is_empty()),
            snap: snaps[row] != 0.0,
            month: months[row],
            year: years[row],
        });
    }

    Ok(observations)
}

/// Column as f64 values, rejecting nulls
fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df.column(name)?.cast(&DataType::Float64)?;
    series
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| {
                ForecastError::DataError(format!("Column '{}' is empty at row {}", name, row))
            })
        })
        .collect()
}

/// Column as optional strings
fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df.column(name)?.cast(&DataType::Utf8)?;
    Ok(series
        .utf8()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Month numbers, plus years when the month column holds dates
fn month_column(df: &DataFrame) -> Result<(Vec<u32>, Vec<Option<i32>>)> {
    let column = df.column("month")?;

    if column.dtype().is_numeric() {
        let series = column.cast(&DataType::Int64)?;
        let months = series
            .i64()?
            .into_iter()
            .enumerate()
            .map(|(row, month)| match month {
                Some(m) if (1..=12).contains(&m) => Ok(m as u32),
                other => Err(ForecastError::DataError(format!(
                    "Invalid month {:?} at row {}",
                    other, row
                ))),
            })
            .collect::<Result<Vec<u32>>>()?;
        let years = vec![None; months.len()];
        return Ok((months, years));
    }

    let mut months = Vec::with_capacity(df.height());
    let mut years = Vec::with_capacity(df.height());
    for (row, raw) in string_column(df, "month")?.into_iter().enumerate() {
        let date = raw.as_deref().and_then(parse_date).ok_or_else(|| {
            ForecastError::DataError(format!("Unparseable month {:?} at row {}", raw, row))
        })?;
        months.push(date.month());
        years.push(Some(date.year()));
    }

    Ok((months, years))
}

/// Parse the date part of `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
