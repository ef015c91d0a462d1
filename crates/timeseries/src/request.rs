//! Request shape shared by the chart and table endpoints

use chrono::NaiveDate;
use common::DATE_COLUMN;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, TimeSeriesError};

/// Identifiers plus an inclusive date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub data_identifiers: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Request body of the multi-line chart endpoint
pub type MultiLinesChartRequest = SeriesRequest;

/// Request body of the multi-series table endpoint
pub type MultiTimeSeriesTableRequest = SeriesRequest;

impl SeriesRequest {
    pub fn new(
        data_identifiers: impl IntoIterator<Item = impl Into<String>>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            data_identifiers: data_identifiers.into_iter().map(Into::into).collect(),
            start_date,
            end_date,
        }
    }

    /// Check identifier rules before any data is touched
    ///
    /// Identifiers must be present, unique and usable as dataset names.
    /// `date` is reserved for the leading table column.
    /// The date range is taken as given; an inverted range selects nothing.
    pub fn validate(&self) -> Result<()> {
        if self.data_identifiers.is_empty() {
            return Err(TimeSeriesError::validation(
                "data_identifiers",
                "at least one identifier is required",
            ));
        }

        let mut seen = HashSet::with_capacity(self.data_identifiers.len());
        for identifier in &self.data_identifiers {
            check_identifier(identifier)?;
            if identifier == DATE_COLUMN {
                return Err(TimeSeriesError::validation(
                    "data_identifiers",
                    format!("'{}' is reserved for the date column", DATE_COLUMN),
                ));
            }
            if !seen.insert(identifier.as_str()) {
                return Err(TimeSeriesError::validation(
                    "data_identifiers",
                    format!("must contain unique values, '{}' is repeated", identifier),
                ));
            }
        }

        Ok(())
    }
}

/// Reject identifiers that cannot name a dataset file
pub fn check_identifier(identifier: &str) -> Result<()> {
    let reason = if identifier.trim().is_empty() {
        Some("identifiers must not be blank")
    } else if identifier.starts_with('.') {
        Some("identifiers must not start with '.'")
    } else if identifier.contains(['/', '\\']) {
        Some("identifiers must not contain path separators")
    } else if identifier.chars().any(char::is_control) {
        Some("identifiers must not contain control characters")
    } else {
        None
    };

    match reason {
        Some(message) => Err(TimeSeriesError::validation(
            "data_identifiers",
            format!("{} (got '{}')", message, identifier.escape_default()),
        )),
        None => Ok(()),
    }
}
