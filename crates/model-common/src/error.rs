//! Error types for model initialization.
//!
//! Only initialization can fail. Per-point lookups never produce an error:
//! a point without data is answered with [`PropertySample::NO_DATA`].
//!
//! [`PropertySample::NO_DATA`]: crate::PropertySample::NO_DATA

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ModelError.
pub type ModelResult<T> = Result<T, ModelError>;

/// Primary error type for model setup.
#[derive(Debug, Error)]
pub enum ModelError {
    // === Configuration Errors ===
    #[error("Configuration file {path} could not be read: {source}")]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration parameter not specified: {0}")]
    ConfigIncomplete(String),

    #[error("Invalid configuration value for '{key}': {message}")]
    ConfigInvalid { key: String, message: String },

    // === Setup Errors ===
    #[error("Projection could not be set up: {0}")]
    ProjectionSetupFailed(String),

    #[error("No model file was found to read from in {0}")]
    NoBackingData(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    /// Create a ConfigIncomplete error for a missing key.
    pub fn config_incomplete(key: impl Into<String>) -> Self {
        Self::ConfigIncomplete(key.into())
    }

    /// Create a ConfigInvalid error.
    pub fn config_invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a ProjectionSetupFailed error.
    pub fn projection_setup_failed(msg: impl Into<String>) -> Self {
        Self::ProjectionSetupFailed(msg.into())
    }

    /// Whether this error came from reading or validating the configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ModelError::ConfigUnreadable { .. }
                | ModelError::ConfigIncomplete(_)
                | ModelError::ConfigInvalid { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_classification() {
        assert!(ModelError::config_incomplete("nx").is_config_error());
        assert!(ModelError::config_invalid("seek_axis", "bad").is_config_error());
        assert!(!ModelError::projection_setup_failed("zone 0").is_config_error());
        assert!(!ModelError::NoBackingData(PathBuf::from("/tmp")).is_config_error());
    }

    #[test]
    fn test_error_messages() {
        let err = ModelError::config_invalid("nx", "must be > 0");
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'nx': must be > 0"
        );
        let err = ModelError::config_incomplete("utm_zone");
        assert_eq!(err.to_string(), "Configuration parameter not specified: utm_zone");
    }
}
