//! HTTP API for charts and tables.
//!
//! ## Modules
//!
//! - `handlers` - Axum handlers and the shared API state
//! - `routes` - Router wiring
//! - `models` - Response and error bodies

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::TimeSeriesApiState;
pub use routes::{create_router, MULTI_LINES_CHART_PATH, MULTI_TIME_SERIES_TABLE_PATH};
