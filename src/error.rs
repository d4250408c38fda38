//! Error types for portscout.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-port network
//! failures never appear here: the engine folds them into "not open".

use crate::types::PortError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scanning operations.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid port range: {0}")]
    InvalidRange(#[from] PortError),

    #[error("failed to resolve host '{host}': {reason}")]
    Resolution { host: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("probe task failed: {0}")]
    TaskFailed(String),
}

/// Errors raised while loading application settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),
}

/// Errors raised while writing the scan report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<PortError> for CliError {
    fn from(err: PortError) -> Self {
        Self::Scan(ScanError::InvalidRange(err))
    }
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
