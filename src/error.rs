//! Error types for Lingobot
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Lingobot operations
///
/// Startup failures (configuration, channel selection, model loading) are
/// fatal. Persistence failures are logged and degraded by their callers.
#[derive(Error, Debug)]
pub enum LingobotError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported input channel requested on the command line
    #[error("Unrecognised channel input value: {channel}. Must be one of: {accepted}")]
    Channel {
        /// The channel that was requested
        channel: String,
        /// Comma separated list of supported channels
        accepted: String,
    },

    /// A per-language classifier could not be created
    #[error("Error with creating classifier for {language}: {message}")]
    ModelLoad {
        /// Language code of the failing model
        language: String,
        /// What went wrong
        message: String,
    },

    /// Profile persistence errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Logging could not be initialised or reconfigured
    #[error("Logging error: {0}")]
    Logging(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for Lingobot operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = LingobotError::Config("missing [bot] section".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: missing [bot] section"
        );
    }

    #[test]
    fn test_channel_error_display() {
        let error = LingobotError::Channel {
            channel: "slack".to_string(),
            accepted: "screen".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unrecognised channel input value: slack. Must be one of: screen"
        );
    }

    #[test]
    fn test_model_load_error_display() {
        let error = LingobotError::ModelLoad {
            language: "fr".to_string(),
            message: "model.json not found".to_string(),
        };
        let s = error.to_string();
        assert!(s.contains("fr"));
        assert!(s.contains("model.json not found"));
    }

    #[test]
    fn test_persistence_error_display() {
        let error = LingobotError::Persistence("disk full".to_string());
        assert_eq!(error.to_string(), "Persistence error: disk full");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: LingobotError = io_error.into();
        assert!(matches!(error, LingobotError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: LingobotError = json_error.into();
        assert!(matches!(error, LingobotError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Table>("[bot\nname = ").unwrap_err();
        let error: LingobotError = toml_error.into();
        assert!(matches!(error, LingobotError::Toml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LingobotError>();
    }
}
