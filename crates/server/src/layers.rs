//! Tower layers shared by every API router
//!
//! Request tracing, CORS, a request timeout and, optionally, per-route
//! Prometheus metrics.

use axum::{
    extract::{MatchedPath, Request, State},
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    Router,
};
use observability::ApiMetrics;
use std::time::Instant;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::HttpLayerConfig;

/// Wrap a router with the standard API layers
pub fn apply_http_layers(
    router: Router,
    config: &HttpLayerConfig,
    metrics: Option<ApiMetrics>,
) -> Router {
    let router = match metrics {
        Some(metrics) => router.route_layer(middleware::from_fn_with_state(metrics, track_metrics)),
        None => router,
    };

    router
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(&config.allow_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy for the configured origins
///
/// `*` allows every origin, method and header.
pub fn cors_layer(allow_origins: &[String]) -> CorsLayer {
    if allow_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allow_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn track_metrics(State(metrics): State<ApiMetrics>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let response = next.run(req).await;

    metrics.record_request(&method, &route, response.status().as_u16(), start.elapsed());
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::get};
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_router() -> Router {
        Router::new()
            .route("/fast", get(|| async { "ok" }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
    }

    #[tokio::test]
    async fn test_timeout_layer_answers_408() {
        let config = HttpLayerConfig {
            request_timeout: Duration::from_millis(50),
            ..HttpLayerConfig::default()
        };
        let app = apply_http_layers(test_router(), &config, None);

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_permissive_cors_header() {
        let app = apply_http_layers(
            test_router(),
            &HttpLayerConfig::default(),
            Some(ApiMetrics::new("test")),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/fast")
                    .header("origin", "https://dashboard.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_explicit_cors_origin() {
        let config = HttpLayerConfig {
            allow_origins: vec!["https://dashboard.example.com".to_string()],
            ..HttpLayerConfig::default()
        };
        let app = apply_http_layers(test_router(), &config, None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/fast")
                    .header("origin", "https://dashboard.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "https://dashboard.example.com"
        );
    }
}
