//! Time Series API CLI and Server Binary
//!
//! Entry point for the `tsapi` command: initializes, validates and starts
//! the chart/table HTTP API.

use anyhow::{Context, Result};
use axum::Router;
use cli::{Cli, Commands, LogFormatArg};
use config::{generate_default_config, load_config, save_config, validate_config, AppConfig};
use observability::{init_logging, init_metrics, ApiMetrics, LogFormat};
use server::{
    apply_http_layers, health_routes, validate_port_available, HealthState, HttpLayerConfig,
    HttpServer, ServerConfig, ServerExt,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use timeseries::{create_router, CsvDataSource, TimeSeriesApiState, TimeSeriesService};
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start {
            config,
            host,
            port,
            data_dir,
            log_format,
        } => start_command(config, host, port, data_dir, log_format).await,
        Commands::Validate { config } => {
            init_logging("tsapi", LogFormat::Pretty)?;
            info!("Executing 'validate' command");
            validate_command(config).await
        }
        Commands::Init { output } => {
            init_logging("tsapi", LogFormat::Pretty)?;
            info!("Executing 'init' command");
            init_command(output).await
        }
    }
}

async fn start_command(
    config_path: PathBuf,
    host: Option<String>,
    port: Option<u16>,
    data_dir: Option<PathBuf>,
    log_format: Option<LogFormatArg>,
) -> Result<()> {
    // Config first: it decides the log format
    let config_found = config_path.exists();
    let mut config = if config_found {
        load_config(&config_path)?
    } else {
        generate_default_config()
    };

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(dir) = data_dir {
        config.data.mock_data_dir = dir;
    }
    if let Some(format) = log_format {
        config.logging.format = format.as_str().to_string();
    }

    let format = LogFormat::parse(&config.logging.format).unwrap_or_default();
    init_logging(&config.service.name, format)?;

    if config_found {
        info!(path = ?config_path, "Configuration loaded");
    } else {
        warn!(path = ?config_path, "Configuration file not found, using defaults");
    }

    let report = validate_config(&config);
    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message, "Configuration warning");
    }
    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start server due to configuration errors");
    }

    let metrics = if config.metrics.enabled {
        init_metrics(&config.server.host, config.metrics.port)?;
        Some(ApiMetrics::new(&config.service.name))
    } else {
        None
    };

    let app = build_app(&config, metrics);

    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port);
    validate_port_available(&server_config).await?;

    info!(
        service = %config.service.name,
        version = %config.service.version,
        host = %server_config.host,
        port = server_config.port,
        data_dir = ?config.data.mock_data_dir,
        "Starting Time Series API"
    );

    HttpServer::new(server_config, app).run_with_ctrl_c().await?;
    Ok(())
}

/// Wire the data source, API routes, health checks and HTTP layers
fn build_app(config: &AppConfig, metrics: Option<ApiMetrics>) -> Router {
    let source = Arc::new(CsvDataSource::new(&config.data.mock_data_dir));
    let service = TimeSeriesService::new(source.clone());
    let api = create_router(Arc::new(TimeSeriesApiState::new(service)));

    let health = Arc::new(HealthState::new(&config.service.name).with_probe(source));
    let router = api.merge(health_routes(health));

    let layers = HttpLayerConfig {
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        allow_origins: config.server.cors.allow_origins.clone(),
    };
    debug!(?layers, "Applying HTTP layers");

    apply_http_layers(router, &layers, metrics)
}

async fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Service: {} {}", config.service.name, config.service.version);
    println!("Listen: {}:{}", config.server.host, config.server.port);
    println!("Data directory: {}", config.data.mock_data_dir.display());
    println!("Log format: {}", config.logging.format);
    if config.metrics.enabled {
        println!("Metrics port: {}", config.metrics.port);
    }

    Ok(())
}

async fn init_command<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!(?output_path, "Initializing new configuration file");

    let config = generate_default_config();

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Point data.mock_data_dir at a directory of <identifier>.csv files");
    println!(
        "  2. Run 'tsapi validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'tsapi start --config {:?}' to start the API",
        output_path
    );

    Ok(())
}
