//! Axum route definitions for the chart and table API.

use crate::api::handlers::{self, TimeSeriesApiState};
use axum::routing::post;
use axum::Router;
use std::sync::Arc;

pub const MULTI_LINES_CHART_PATH: &str = "/charts/multi-lines";
pub const MULTI_TIME_SERIES_TABLE_PATH: &str = "/tables/multi-time-series";

/// Create all API routes.
///
/// # Routes
///
/// - `POST /charts/multi-lines` - Per-identifier series for a line chart
/// - `POST /tables/multi-time-series` - Date-aligned wide table
pub fn create_router(state: Arc<TimeSeriesApiState>) -> Router {
    Router::new()
        .route(MULTI_LINES_CHART_PATH, post(handlers::multi_lines_chart))
        .route(
            MULTI_TIME_SERIES_TABLE_PATH,
            post(handlers::multi_time_series_table),
        )
        .with_state(state)
}
