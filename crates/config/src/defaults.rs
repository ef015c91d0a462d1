use std::path::PathBuf;

pub fn default_version() -> String {
    "0.1.0".to_string()
}

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_http_port() -> u16 {
    8000
}

pub fn default_request_timeout_secs() -> u64 {
    30
}

pub fn default_allow_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn default_mock_data_dir() -> PathBuf {
    PathBuf::from("mock_data")
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}

pub fn default_metrics_port() -> u16 {
    9090
}
