//! Prometheus metrics infrastructure
//!
//! Installs the Prometheus exporter and records per-route API metrics.

use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Initialize the Prometheus metrics exporter
///
/// Starts an HTTP listener that exposes metrics at `/metrics`.
pub fn init_metrics(host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// Request metrics for one API service
///
/// # Metrics
///
/// * `api_requests_total` - Requests by route, method and status
/// * `api_request_duration_seconds` - Request duration by route
/// * `api_request_errors_total` - Requests answered with a 4xx/5xx status
///
/// Recording is a no-op when no exporter has been installed.
#[derive(Debug, Clone)]
pub struct ApiMetrics {
    service: String,
}

impl ApiMetrics {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Record a completed request
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        counter!(
            "api_requests_total",
            "service" => self.service.clone(),
            "method" => method.to_string(),
            "route" => route.to_string(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            "api_request_duration_seconds",
            "service" => self.service.clone(),
            "route" => route.to_string()
        )
        .record(duration.as_secs_f64());

        if status >= 400 {
            counter!(
                "api_request_errors_total",
                "service" => self.service.clone(),
                "route" => route.to_string()
            )
            .increment(1);
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_exporter() {
        let metrics = ApiMetrics::new("test");
        metrics.record_request("POST", "/tables/multi-time-series", 200, Duration::from_millis(3));
        metrics.record_request("POST", "/charts/multi-lines", 404, Duration::from_millis(1));
        assert_eq!(metrics.service(), "test");
    }

    #[test]
    fn test_init_metrics_rejects_bad_host() {
        assert!(init_metrics("not a host", 9090).is_err());
    }
}
