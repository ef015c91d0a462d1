//! Time series error types

use std::io;
use thiserror::Error;

/// Errors raised while validating a request or loading its series
#[derive(Error, Debug)]
pub enum TimeSeriesError {
    /// The request breaks a validation rule
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// No dataset exists for the identifier
    #[error("No data found for identifier '{0}'")]
    NotFound(String),

    /// The dataset exists but could not be read
    #[error("Failed to read data for '{identifier}': {source}")]
    Io {
        identifier: String,
        #[source]
        source: io::Error,
    },

    /// The dataset could not be parsed
    #[error("Malformed data for '{identifier}' at row {row}: {message}")]
    Malformed {
        identifier: String,
        row: u64,
        message: String,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse error class surfaced at the HTTP boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Unexpected => "UnexpectedError",
        }
    }
}

impl TimeSeriesError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Io { .. } | Self::Malformed { .. } | Self::Internal(_) => ErrorKind::Unexpected,
        }
    }
}

/// Result type for time series operations
pub type Result<T> = std::result::Result<T, TimeSeriesError>;
