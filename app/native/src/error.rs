//! Error types for Bento.
//!
//! `BentoError` is what the CLI surfaces. Engine and configuration errors are
//! folded into it with their messages kept, so the value can be printed or
//! serialized as JSON.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::modules::grid::LayoutError;

/// Errors that can occur during application execution.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum BentoError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// The layout engine rejected an event.
    #[error("Layout error: {0}")]
    LayoutError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for BentoError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for BentoError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<ConfigError> for BentoError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<LayoutError> for BentoError {
    fn from(err: LayoutError) -> Self { Self::LayoutError(err.to_string()) }
}

impl From<String> for BentoError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for BentoError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::grid::TileId;

    #[test]
    fn test_invalid_arguments_display() {
        let err = BentoError::InvalidArguments("Unknown edge 'x'".to_string());
        assert_eq!(err.to_string(), "Unknown edge 'x'");
    }

    #[test]
    fn test_config_error_display() {
        let err: BentoError = ConfigError::NotFound.into();
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("No configuration file found"));
    }

    #[test]
    fn test_layout_error_from_conversion() {
        let err: BentoError = LayoutError::DragInProgress(TileId::new("photos")).into();
        assert!(matches!(err, BentoError::LayoutError(_)));
        assert!(err.to_string().contains("photos"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: BentoError = io_err.into();
        assert!(matches!(err, BentoError::IoError(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_from_string() {
        let err: BentoError = "test error".into();
        assert!(matches!(err, BentoError::CommandError(_)));
    }

    #[test]
    fn test_error_serializes_with_kind() {
        let err = BentoError::LayoutError("unknown tile 'x'".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"kind":"LayoutError","message":"unknown tile 'x'"}"#);
    }
}
