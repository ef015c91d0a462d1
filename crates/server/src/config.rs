//! Server configuration

use crate::error::{Result, ServerError};
use std::net::SocketAddr;
use std::time::Duration;

/// Default HTTP port of the API
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Bind configuration for the HTTP server
///
/// # Example
///
/// ```
/// use server::config::ServerConfig;
///
/// let config = ServerConfig::new("127.0.0.1", 8000);
/// assert_eq!(config.addr().unwrap().port(), 8000);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// HTTP port; 0 binds an ephemeral port
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Socket address to bind
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", DEFAULT_HTTP_PORT)
    }
}

/// Settings for the tower layers wrapped around every API router
#[derive(Debug, Clone)]
pub struct HttpLayerConfig {
    /// Requests running longer than this are answered with 408
    pub request_timeout: Duration,
    /// Allowed CORS origins; `*` allows any origin
    pub allow_origins: Vec<String>,
}

impl Default for HttpLayerConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            allow_origins: vec!["*".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_addr() {
        let config = ServerConfig::new("127.0.0.1", 8080);
        let addr = config.addr().unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_server_config_invalid_host() {
        let config = ServerConfig::new("not an ip", 8080);
        assert!(matches!(config.addr(), Err(ServerError::InvalidAddress(_))));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ServerConfig::default().port, DEFAULT_HTTP_PORT);
        let layers = HttpLayerConfig::default();
        assert_eq!(layers.request_timeout, Duration::from_secs(30));
        assert_eq!(layers.allow_origins, vec!["*".to_string()]);
    }
}
