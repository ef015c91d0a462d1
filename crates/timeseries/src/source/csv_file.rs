//! CSV-backed data source
//!
//! One file per identifier, `<root>/<identifier>.csv`, with a header row
//! naming at least `date` and `value` columns. Other columns are ignored.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use common::TimeSeriesPoint;
use serde::Deserialize;
use server::{HealthProbe, ProbeStatus};
use std::io;
use std::path::PathBuf;
use tracing::{debug, instrument};

use super::{select_range, DataSource};
use crate::error::{Result, TimeSeriesError};
use crate::request::check_identifier;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    value: Option<f64>,
}

/// Reads `<root>/<identifier>.csv` on every call
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    root: PathBuf,
}

impl CsvDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File backing an identifier
    pub fn path_for(&self, identifier: &str) -> PathBuf {
        self.root.join(format!("{}.csv", identifier))
    }
}

#[async_trait]
impl DataSource for CsvDataSource {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn load(
        &self,
        identifier: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TimeSeriesPoint>> {
        check_identifier(identifier)?;

        let path = self.path_for(identifier);
        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TimeSeriesError::NotFound(identifier.to_string()),
            _ => TimeSeriesError::Io {
                identifier: identifier.to_string(),
                source: e,
            },
        })?;

        let points = parse_csv(identifier, &bytes)?;
        let total = points.len();
        let selected = select_range(points, start, end);

        debug!(total, selected = selected.len(), "Loaded series from CSV");
        Ok(selected)
    }
}

impl HealthProbe for CsvDataSource {
    fn check(&self) -> ProbeStatus {
        let healthy = self.root.is_dir();
        ProbeStatus {
            name: "mock_data".to_string(),
            healthy,
            detail: (!healthy).then(|| format!("{} is not a directory", self.root.display())),
        }
    }
}

const REQUIRED_COLUMNS: [&str; 2] = ["date", "value"];

/// Parse every row of a dataset
///
/// The header must name both `date` and `value`. Rows with an empty value
/// are skipped. Header problems are reported as row 0.
pub fn parse_csv(identifier: &str, bytes: &[u8]) -> Result<Vec<TimeSeriesPoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers().map_err(|e| TimeSeriesError::Malformed {
        identifier: identifier.to_string(),
        row: 0,
        message: e.to_string(),
    })?;
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(TimeSeriesError::Malformed {
            identifier: identifier.to_string(),
            row: 0,
            message: format!("missing '{}' column", missing),
        });
    }

    let mut points = Vec::new();
    for (idx, record) in reader.deserialize::<CsvRow>().enumerate() {
        let row = idx as u64 + 1;
        let record = record.map_err(|e| TimeSeriesError::Malformed {
            identifier: identifier.to_string(),
            row,
            message: e.to_string(),
        })?;

        let date = parse_date(&record.date).ok_or_else(|| TimeSeriesError::Malformed {
            identifier: identifier.to_string(),
            row,
            message: format!("unrecognised date '{}'", record.date),
        })?;

        match record.value {
            Some(value) => points.push(TimeSeriesPoint::new(date, value)),
            None => debug!(identifier, row, "Skipping row without a value"),
        }
    }

    Ok(points)
}

/// Parse a calendar date, accepting plain dates and date-times
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
