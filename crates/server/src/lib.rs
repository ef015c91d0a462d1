//! Server infrastructure for the Time Series API
//!
//! Provides the HTTP server, its lifecycle management and the tower layers
//! shared by every API router.
//!
//! # Architecture
//!
//! Servers implement the [`Server`] trait; [`ServerExt`] adds `spawn()` and
//! `run_with_ctrl_c()`. Shutdown uses `CancellationToken` from `tokio_util`,
//! so cancelling a parent token cancels every child token.
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{HttpServer, ServerConfig, ServerExt};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = HttpServer::new(ServerConfig::new("0.0.0.0", 8000), router);
//!     server.run_with_ctrl_c().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod layers;
pub mod port_validator;
pub mod shutdown;
pub mod traits;

pub use config::{HttpLayerConfig, ServerConfig, DEFAULT_HTTP_PORT};
pub use error::{Result, ServerError};
pub use health::{health_routes, HealthProbe, HealthState, ProbeStatus};
pub use http::HttpServer;
pub use layers::{apply_http_layers, cors_layer};
pub use port_validator::validate_port_available;
pub use shutdown::ShutdownController;
pub use traits::{Server, ServerExt};
