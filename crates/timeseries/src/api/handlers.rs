//! HTTP request handlers for the chart and table API.

use crate::api::models::*;
use crate::error::{ErrorKind, TimeSeriesError};
use crate::request::SeriesRequest;
use crate::service::TimeSeriesService;
use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, State};
use axum::http::{Method, StatusCode};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared state for the API handlers.
pub struct TimeSeriesApiState {
    pub service: Arc<TimeSeriesService>,
}

impl TimeSeriesApiState {
    pub fn new(service: TimeSeriesService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// POST /charts/multi-lines
pub async fn multi_lines_chart(
    State(state): State<Arc<TimeSeriesApiState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<SeriesRequest>, JsonRejection>,
) -> Result<Json<MultiLinesChartResponse>, ApiError> {
    let Json(request) = body.map_err(rejection_response)?;
    info!(
        identifiers = ?request.data_identifiers,
        start = %request.start_date,
        end = %request.end_date,
        "Multi-lines chart requested"
    );

    let data = state
        .service
        .multi_lines_chart(&request)
        .await
        .map_err(|e| error_response(&method, uri.path(), e))?;

    Ok(Json(MultiLinesChartResponse {
        data,
        start_date: request.start_date,
        end_date: request.end_date,
    }))
}

/// POST /tables/multi-time-series
pub async fn multi_time_series_table(
    State(state): State<Arc<TimeSeriesApiState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<SeriesRequest>, JsonRejection>,
) -> Result<Json<MultiTimeSeriesTableResponse>, ApiError> {
    let Json(request) = body.map_err(rejection_response)?;
    info!(
        identifiers = ?request.data_identifiers,
        start = %request.start_date,
        end = %request.end_date,
        "Multi-series table requested"
    );

    let data = state
        .service
        .multi_time_series_table(&request)
        .await
        .map_err(|e| error_response(&method, uri.path(), e))?;

    Ok(Json(MultiTimeSeriesTableResponse {
        start_date: request.start_date,
        end_date: request.end_date,
        data,
    }))
}

/// HTTP status for an error class
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(method: &Method, path: &str, err: TimeSeriesError) -> ApiError {
    let kind = err.kind();
    let message = err.to_string();

    match kind {
        ErrorKind::Unexpected => {
            error!(%path, %method, kind = kind.as_str(), %message, "Request failed")
        }
        _ => warn!(%path, %method, kind = kind.as_str(), %message, "Request rejected"),
    }

    let mut body = ErrorResponse::new(kind.as_str(), message);
    if let TimeSeriesError::Validation { field, .. } = &err {
        body = body.with_details(json!({ "field": field }));
    }

    (status_for(kind), Json(body))
}

/// Body rejections are validation failures: bad JSON, wrong types, bad dates
fn rejection_response(rejection: JsonRejection) -> ApiError {
    let message = rejection.body_text();
    warn!(status = %rejection.status(), %message, "Rejected request body");

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::new(ErrorKind::Validation.as_str(), message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::Unexpected), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_error_names_field() {
        let (status, Json(body)) = error_response(
            &Method::POST,
            "/charts/multi-lines",
            TimeSeriesError::validation("data_identifiers", "must contain unique values"),
        );
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error.code, "ValidationError");
        assert_eq!(body.error.details, Some(json!({ "field": "data_identifiers" })));
    }

    #[test]
    fn test_unexpected_error_has_no_details() {
        let (status, Json(body)) = error_response(
            &Method::POST,
            "/tables/multi-time-series",
            TimeSeriesError::Internal("boom".to_string()),
        );
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "UnexpectedError");
        assert!(body.error.details.is_none());
        assert!(!body.success);
    }
}
