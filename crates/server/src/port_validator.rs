//! Port validation utilities
//!
//! Checking a port before binding is racy: another process may take it in
//! between. The check only gives early feedback; the bind is authoritative.

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Validate that the configured HTTP port can be bound
pub async fn validate_port_available(config: &ServerConfig) -> Result<()> {
    validate_port_range(config.port)?;

    let addr = format!("{}:{}", config.host, config.port);
    debug!("Checking HTTP port {}", config.port);

    match TcpListener::bind(&addr).await {
        Ok(listener) => {
            let local_addr = listener
                .local_addr()
                .map_err(|e| ServerError::bind(addr.clone(), e))?;
            drop(listener);

            info!("HTTP port {} is available ({})", config.port, local_addr);
            Ok(())
        }
        Err(e) => {
            error!("HTTP port {} is NOT available: {}", config.port, e);
            Err(ServerError::port_in_use(config.port, e.to_string()))
        }
    }
}

/// Returns `true` if the port appears to be in use
pub async fn is_port_in_use(host: &str, port: u16) -> bool {
    let addr = format!("{}:{}", host, port);
    TcpListener::bind(&addr).await.is_err()
}

/// Reject port 0 and warn on privileged ports
pub fn validate_port_range(port: u16) -> Result<()> {
    if port == 0 {
        return Err(ServerError::ConfigError(
            "Port cannot be 0 (ephemeral port assignment not supported for explicit binding)"
                .to_string(),
        ));
    }
    if port < 1024 {
        warn!(
            "Port {} is a privileged port (requires root/admin privileges)",
            port
        );
    }
    Ok(())
}
