//! API response models.

use chrono::NaiveDate;
use common::{SeriesSet, WideTable};
use serde::Serialize;

/// Response of `POST /charts/multi-lines`
#[derive(Debug, Serialize)]
pub struct MultiLinesChartResponse {
    pub data: SeriesSet,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Response of `POST /tables/multi-time-series`
#[derive(Debug, Serialize)]
pub struct MultiTimeSeriesTableResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data: WideTable,
}

/// Error detail
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.error.details = Some(details);
        self
    }
}
