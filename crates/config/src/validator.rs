use crate::*;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Service name is required")]
    MissingServiceName,

    #[error("Invalid version format: {0}. Must be in format X.Y.Z (e.g., 1.0.0)")]
    InvalidVersionFormat(String),

    #[error("Server host is required")]
    MissingHost,

    #[error("{field} must be a non-zero port")]
    InvalidPort { field: String },

    #[error("Metrics port {port} conflicts with the HTTP port")]
    PortConflict { port: u16 },

    #[error("{field} must be a positive integer")]
    InvalidPositiveInteger { field: String },

    #[error("Data directory is required")]
    MissingDataDir,

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("CORS: at least one allowed origin is required")]
    NoCorsOrigins,

    #[error("Environment variable '{var}' is missing or invalid: {message}")]
    InvalidEnvVar { var: String, message: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            defaults_applied: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_config(config: &AppConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_service(&config.service, &mut report);
    validate_server(&config.server, &mut report);
    validate_data(&config.data, &mut report);
    validate_logging(&config.logging, &mut report);
    validate_metrics(&config.metrics, config.server.port, &mut report);

    report
}

fn validate_service(service: &ServiceInfo, report: &mut ValidationReport) {
    if service.name.trim().is_empty() {
        report.add_error(ValidationError::MissingServiceName);
    }

    let version_ok = Regex::new(r"^\d+\.\d+\.\d+$")
        .map(|re| re.is_match(&service.version))
        .unwrap_or(false);
    if !version_ok {
        report.add_error(ValidationError::InvalidVersionFormat(service.version.clone()));
    }
}

fn validate_server(server: &HttpConfig, report: &mut ValidationReport) {
    if server.host.trim().is_empty() {
        report.add_error(ValidationError::MissingHost);
    } else if has_unresolved_env_vars(&server.host) {
        report.add_error(ValidationError::InvalidEnvVar {
            var: server.host.clone(),
            message: "server.host references an unset variable".to_string(),
        });
    }

    if server.port == 0 {
        report.add_error(ValidationError::InvalidPort {
            field: "server.port".to_string(),
        });
    }

    if server.request_timeout_secs == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "server.request_timeout_secs".to_string(),
        });
    }

    let origins = &server.cors.allow_origins;
    if origins.is_empty() {
        report.add_error(ValidationError::NoCorsOrigins);
    } else if server.cors.allows_any_origin() && origins.len() > 1 {
        report.add_warning(
            "server.cors.allow_origins",
            "'*' accepts every origin; the other entries have no effect",
        );
    }
}

fn validate_data(data: &DataConfig, report: &mut ValidationReport) {
    let dir = data.mock_data_dir.to_string_lossy();
    if dir.trim().is_empty() {
        report.add_error(ValidationError::MissingDataDir);
        return;
    }

    if has_unresolved_env_vars(&dir) {
        report.add_error(ValidationError::InvalidEnvVar {
            var: dir.to_string(),
            message: "data.mock_data_dir references an unset variable".to_string(),
        });
        return;
    }

    if !data.mock_data_dir.is_dir() {
        report.add_warning(
            "data.mock_data_dir",
            &format!("Directory {} does not exist; every request will fail with not found", dir),
        );
    }
}

fn validate_logging(logging: &LoggingConfig, report: &mut ValidationReport) {
    let valid_formats = ["pretty", "json", "compact"];
    if !valid_formats.contains(&logging.format.to_lowercase().as_str()) {
        report.add_error(ValidationError::InvalidLogFormat(logging.format.clone()));
    }
}

fn validate_metrics(metrics: &MetricsConfig, http_port: u16, report: &mut ValidationReport) {
    if !metrics.enabled {
        return;
    }

    if metrics.port == 0 {
        report.add_error(ValidationError::InvalidPort {
            field: "metrics.port".to_string(),
        });
    } else if metrics.port == http_port {
        report.add_error(ValidationError::PortConflict { port: metrics.port });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn valid_config() -> AppConfig {
        let mut config = generate_default_config();
        config.data.mock_data_dir = std::env::temp_dir();
        config
    }

    #[test]
    fn test_default_config_is_valid() {
        let report = validate_config(&valid_config());
        assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_invalid_version() {
        let mut config = valid_config();
        config.service.version = "1.0".to_string();

        let report = validate_config(&config);
        assert_matches!(report.errors.as_slice(), [ValidationError::InvalidVersionFormat(v)] if v == "1.0");
    }

    #[test]
    fn test_zero_port_and_timeout() {
        let mut config = valid_config();
        config.server.port = 0;
        config.server.request_timeout_secs = 0;

        let report = validate_config(&config);
        assert_eq!(report.errors.len(), 2);
        assert_matches!(&report.errors[0], ValidationError::InvalidPort { field } if field == "server.port");
        assert_matches!(&report.errors[1], ValidationError::InvalidPositiveInteger { .. });
    }

    #[test]
    fn test_metrics_port_conflict() {
        let mut config = valid_config();
        config.metrics.enabled = true;
        config.metrics.port = config.server.port;

        let report = validate_config(&config);
        assert_matches!(report.errors.as_slice(), [ValidationError::PortConflict { .. }]);
    }

    #[test]
    fn test_unknown_log_format() {
        let mut config = valid_config();
        config.logging.format = "xml".to_string();

        let report = validate_config(&config);
        assert_matches!(report.errors.as_slice(), [ValidationError::InvalidLogFormat(_)]);
    }

    #[test]
    fn test_missing_data_dir_is_warning() {
        let mut config = valid_config();
        config.data.mock_data_dir = "/no/such/mock_data".into();

        let report = validate_config(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field, "data.mock_data_dir");
    }

    #[test]
    fn test_cors_rules() {
        let mut config = valid_config();
        config.server.cors.allow_origins.clear();
        assert_matches!(
            validate_config(&config).errors.as_slice(),
            [ValidationError::NoCorsOrigins]
        );

        config.server.cors.allow_origins = vec!["*".into(), "https://a.example".into()];
        let report = validate_config(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].field, "server.cors.allow_origins");
    }
}
