//! Error types for the rtc-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to read tools config: {0}")]
    Xml(String),

    #[error("Conversion failed: {0}")]
    Conversion(String),

    #[error("Control group not found: {0}")]
    GroupNotFound(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Failed to write report file: {path}")]
    ReportFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rtc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<rtc_config::ConfigError> for AppError {
    fn from(err: rtc_config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<rtc_xml::XmlError> for AppError {
    fn from(err: rtc_xml::XmlError) -> Self {
        AppError::Xml(err.to_string())
    }
}

impl From<rtc_core::RtcError> for AppError {
    fn from(err: rtc_core::RtcError) -> Self {
        AppError::Conversion(err.to_string())
    }
}
