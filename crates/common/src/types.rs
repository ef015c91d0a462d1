//! Common types used across the Time Series API
//!
//! This module provides the fundamental data types shared by the data
//! source, the aligner and the HTTP layer.

use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Name of the leading column of every [`WideTable`]
pub const DATE_COLUMN: &str = "date";

/// A single daily observation of a time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Observed value
    pub value: f64,
}

impl TimeSeriesPoint {
    /// Create a new point
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Identifier → series mapping that keeps the order identifiers were requested in
///
/// Serializes as a JSON object whose keys appear in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    entries: Vec<(String, Vec<TimeSeriesPoint>)>,
}

impl SeriesSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the series for an identifier
    pub fn insert(&mut self, identifier: impl Into<String>, points: Vec<TimeSeriesPoint>) {
        self.entries.push((identifier.into(), points));
    }

    /// Look up the series of an identifier
    pub fn get(&self, identifier: &str) -> Option<&[TimeSeriesPoint]> {
        self.entries
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, points)| points.as_slice())
    }

    /// Identifiers in insertion order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Iterate over `(identifier, points)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TimeSeriesPoint])> {
        self.entries
            .iter()
            .map(|(id, points)| (id.as_str(), points.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<TimeSeriesPoint>)> for SeriesSet {
    fn from_iter<I: IntoIterator<Item = (String, Vec<TimeSeriesPoint>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for SeriesSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (identifier, points) in &self.entries {
            map.serialize_entry(identifier, points)?;
        }
        map.end()
    }
}

/// A single cell of a [`WideTable`] row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// The date column
    Date(NaiveDate),
    /// An observed value
    Number(f64),
    /// No observation for this identifier on this date
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric value, if this cell holds one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Number)
    }
}

/// One record of a [`WideTable`], keyed by column name
///
/// Serializes as a JSON object with keys in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    cells: Vec<(String, CellValue)>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.push((column.into(), value));
    }

    /// Value of a column, `None` when the column does not exist
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Date of the row
    pub fn date(&self) -> Option<NaiveDate> {
        match self.get(DATE_COLUMN) {
            Some(CellValue::Date(date)) => Some(*date),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for TableRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Date-keyed table with one value column per identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WideTable {
    /// Number of rows (distinct dates)
    #[serde(rename = "number_of_rows")]
    pub row_count: usize,
    /// `date` followed by the identifiers in request order
    pub columns: Vec<String>,
    /// Rows sorted by date ascending
    pub rows: Vec<TableRow>,
}

impl WideTable {
    /// Table with only the date column and no rows
    pub fn empty() -> Self {
        Self {
            row_count: 0,
            columns: vec![DATE_COLUMN.to_string()],
            rows: Vec::new(),
        }
    }
}

impl Default for WideTable {
    fn default() -> Self {
        Self::empty()
    }
}
