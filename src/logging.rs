//! Logging setup with runtime-adjustable verbosity
//!
//! The subscriber is a `tracing_subscriber` registry with an `EnvFilter`
//! wrapped in a reload layer, so the REPL can switch between DEBUG, INFO and
//! WARN while running. `RUST_LOG` takes precedence over the initial level.

use crate::error::{LingobotError, Result};
use std::fmt;
use tracing_subscriber::{
    fmt as tracing_fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Verbosity levels selectable from the command line and the REPL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything, including per-input tracing
    Debug,
    /// Startup progress and setting changes
    Info,
    /// Only problems
    Warn,
}

impl LogLevel {
    /// Parse a level name, case-insensitive
    ///
    /// # Examples
    ///
    /// ```
    /// use lingobot::logging::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse_str(" Debug ").unwrap(), LogLevel::Debug);
    /// assert!(LogLevel::parse_str("verbose").is_err());
    /// ```
    pub fn parse_str(s: &str) -> std::result::Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }

    /// Resolve the `--loglvl` argument
    ///
    /// An empty value means INFO. The second element is `false` when the
    /// value was not recognised and INFO was used instead.
    pub fn from_cli(s: &str) -> (Self, bool) {
        if s.trim().is_empty() {
            return (Self::Info, true);
        }
        match Self::parse_str(s) {
            Ok(level) => (level, true),
            Err(_) => (Self::Info, false),
        }
    }

    fn directive(&self) -> String {
        let level = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        };
        format!("lingobot={}", level)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
        }
    }
}

/// Handle for changing the log level after initialisation
///
/// A disabled control (no subscriber installed, as in tests) reports every
/// change as a `LingobotError::Logging` so callers can fall back to plain
/// output.
#[derive(Clone)]
pub struct LogControl {
    handle: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogControl {
    /// A control that is not connected to any subscriber
    pub fn disabled() -> Self {
        Self { handle: None }
    }

    /// Whether a subscriber is installed
    pub fn is_enabled(&self) -> bool {
        self.handle.is_some()
    }

    /// Switch the active level
    ///
    /// # Errors
    ///
    /// Returns `LingobotError::Logging` if logging is not initialised or the
    /// subscriber has gone away.
    pub fn set_level(&self, level: LogLevel) -> Result<()> {
        let handle = self
            .handle
            .as_ref()
            .ok_or_else(|| LingobotError::Logging("logger was not found".to_string()))?;
        handle
            .reload(EnvFilter::new(level.directive()))
            .map_err(|e| LingobotError::Logging(e.to_string()))?;
        Ok(())
    }
}

impl fmt::Debug for LogControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogControl")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Install the global subscriber
///
/// # Arguments
///
/// * `level` - Initial level, unless `RUST_LOG` is set
///
/// # Errors
///
/// Returns `LingobotError::Logging` if a global subscriber is already set.
pub fn init_logging(level: LogLevel) -> Result<LogControl> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));
    let (filter_layer, handle) = reload::Layer::new(env_filter);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            tracing_fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| LingobotError::Logging(e.to_string()))?;

    Ok(LogControl {
        handle: Some(handle),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels_case_insensitive() {
        assert_eq!(LogLevel::parse_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::parse_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::parse_str("warn").unwrap(), LogLevel::Warn);
    }

    #[test]
    fn test_parse_invalid_level() {
        assert!(LogLevel::parse_str("trace").is_err());
    }

    #[test]
    fn test_from_cli_empty_is_info() {
        assert_eq!(LogLevel::from_cli(""), (LogLevel::Info, true));
    }

    #[test]
    fn test_from_cli_unrecognised_falls_back_to_info() {
        assert_eq!(LogLevel::from_cli("loud"), (LogLevel::Info, false));
    }

    #[test]
    fn test_from_cli_recognised() {
        assert_eq!(LogLevel::from_cli("WARN"), (LogLevel::Warn, true));
    }

    #[test]
    fn test_display() {
        assert_eq!(LogLevel::Debug.to_string(), "DEBUG");
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
    }

    #[test]
    fn test_directive_targets_crate() {
        assert_eq!(LogLevel::Info.directive(), "lingobot=info");
    }

    #[test]
    fn test_disabled_control_reports_error() {
        let control = LogControl::disabled();
        assert!(!control.is_enabled());
        let err = control.set_level(LogLevel::Debug).unwrap_err();
        assert!(err.to_string().contains("logger was not found"));
    }
}
