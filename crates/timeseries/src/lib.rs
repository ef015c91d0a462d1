//! Time series charts and tables
//!
//! Loads per-identifier series from a [`DataSource`] and shapes them either
//! as independent lines for a chart or as a single date-aligned wide table.
//!
//! # Architecture
//!
//! ```text
//! HTTP (api) -> TimeSeriesService -> DataSource (CSV / memory)
//!                      |
//!                      +-> responders -> align
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use timeseries::{create_router, CsvDataSource, TimeSeriesApiState, TimeSeriesService};
//!
//! let service = TimeSeriesService::new(Arc::new(CsvDataSource::new("mock_data")));
//! let router = create_router(Arc::new(TimeSeriesApiState::new(service)));
//! ```

pub mod align;
pub mod api;
pub mod error;
pub mod request;
pub mod responders;
pub mod service;
pub mod source;

pub use align::align;
pub use api::{create_router, TimeSeriesApiState, MULTI_LINES_CHART_PATH, MULTI_TIME_SERIES_TABLE_PATH};
pub use error::{ErrorKind, Result, TimeSeriesError};
pub use request::{MultiLinesChartRequest, MultiTimeSeriesTableRequest, SeriesRequest};
pub use responders::{build_chart, build_table};
pub use service::TimeSeriesService;
pub use source::{CsvDataSource, DataSource, InMemoryDataSource};
