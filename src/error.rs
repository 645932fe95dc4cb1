//! Error types for the usage cluster service
//!
//! Startup failures (artifacts, configuration) and per-request failures
//! (encoding, coercion, dimensions) share one enum. [`Error::kind`] tells the
//! HTTP layer which side of the boundary an error belongs to.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for the service
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Artifact Errors
    // =========================================================================
    #[error("Failed to read artifact {}: {source}", path.display())]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {}: {source}", path.display())]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact {artifact}: {reason}")]
    ArtifactInvalid { artifact: String, reason: String },

    // =========================================================================
    // Request Errors
    // =========================================================================
    #[error("Unknown category for {field}: {value:?}")]
    UnknownCategory { field: String, value: String },

    #[error("Field {field} must be numeric, got {value:?}")]
    NonNumericField { field: String, value: String },

    #[error("Feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    // =========================================================================
    // Metrics Errors
    // =========================================================================
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Which side of the service an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Process cannot start serving
    Startup,
    /// Caller submitted something the pipeline cannot use
    Client,
    /// Request failed for reasons the caller cannot fix
    Server,
}

impl ErrorKind {
    /// Label used for metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Startup => "startup",
            ErrorKind::Client => "client",
            ErrorKind::Server => "server",
        }
    }
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_)
            | Error::ArtifactIo { .. }
            | Error::ArtifactParse { .. }
            | Error::ArtifactInvalid { .. }
            | Error::YamlParse(_) => ErrorKind::Startup,

            Error::UnknownCategory { .. } | Error::NonNumericField { .. } => ErrorKind::Client,

            Error::DimensionMismatch { .. } | Error::Internal(_) | Error::Metrics(_) => {
                ErrorKind::Server
            }
        }
    }

    /// Short machine-readable code for API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Error::Internal(_) => "internal_error",
            Error::Metrics(_) => "metrics_error",
            Error::Configuration(_) | Error::YamlParse(_) => "configuration_error",
            Error::ArtifactIo { .. } | Error::ArtifactParse { .. } | Error::ArtifactInvalid { .. } => {
                "artifact_error"
            }
            Error::UnknownCategory { .. } => "unknown_category",
            Error::NonNumericField { .. } => "non_numeric_field",
            Error::DimensionMismatch { .. } => "dimension_mismatch",
        }
    }

    /// Check if the caller caused this error
    pub fn is_client_error(&self) -> bool {
        self.kind() == ErrorKind::Client
    }
}

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, Error>;
