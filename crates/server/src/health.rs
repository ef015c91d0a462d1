//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

/// Outcome of a single dependency probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeStatus {
    pub name: String,
    pub healthy: bool,
    pub detail: Option<String>,
}

/// Something the service depends on whose availability can be checked
pub trait HealthProbe: Send + Sync {
    fn check(&self) -> ProbeStatus;
}

/// Shared state for health checks
#[derive(Clone)]
pub struct HealthState {
    pub service_name: String,
    pub start_time: Instant,
    probes: Vec<Arc<dyn HealthProbe>>,
}

impl HealthState {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            start_time: Instant::now(),
            probes: Vec::new(),
        }
    }

    /// Register a dependency probe reported by `/health/detailed`
    pub fn with_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.push(probe);
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn run_probes(&self) -> Vec<ProbeStatus> {
        self.probes.iter().map(|p| p.check()).collect()
    }
}

/// Liveness: answers as long as the process serves requests
pub async fn health_handler(State(state): State<Arc<HealthState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.service_name,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
    }))
}

/// Simple health handler without state
pub async fn simple_health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Readiness: 503 when any dependency probe fails
pub async fn detailed_health_handler(
    State(state): State<Arc<HealthState>>,
) -> (StatusCode, Json<Value>) {
    let probes = state.run_probes();
    let all_healthy = probes.iter().all(|p| p.healthy);
    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let health = json!({
        "status": if all_healthy { "healthy" } else { "degraded" },
        "service": state.service_name,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
        "dependencies": probes,
        "healthy": all_healthy,
    });

    (status_code, Json(health))
}

/// Create health check router
pub fn health_routes(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/health/detailed", get(detailed_health_handler))
        .with_state(state)
}
