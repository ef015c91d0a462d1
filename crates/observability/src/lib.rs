//! Observability infrastructure for the Time Series API
//!
//! This crate provides:
//! - Structured logging via tracing
//! - Prometheus metrics for API requests
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("timeseries-api", LogFormat::Pretty)?;
//!
//! // Optional
//! observability::init_metrics("0.0.0.0", 9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use self::metrics::{init_metrics, ApiMetrics};
