//! Command-line interface definition for Lingobot
//!
//! This module defines the CLI structure using clap's derive API. The bot
//! has a single interactive mode, so there are no subcommands: only the
//! input channel, the config file location and the log level.

use crate::error::LingobotError;
use clap::Parser;
use std::fmt;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/lingobot.toml";

/// Lingobot: a simple multi-lingual bot that can respond to questions on
/// academic subjects
#[derive(Parser, Debug, Clone)]
#[command(name = "lingobot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The input channel. Only `screen` is supported
    #[arg(long, default_value = "screen")]
    pub channel: String,

    /// Path to configuration file
    #[arg(short, long, env = "LINGOBOT_CONFIG")]
    pub config: Option<String>,

    /// The level at which logging is done (DEBUG / INFO / WARN). Not case
    /// sensitive. Default level is INFO
    #[arg(long, default_value = "")]
    pub loglvl: String,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Config file path, honouring the override when one was given
    pub fn config_path(&self) -> &str {
        match self.config.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => path,
            _ => DEFAULT_CONFIG_PATH,
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            channel: "screen".to_string(),
            config: None,
            loglvl: String::new(),
        }
    }
}

/// Input channels the bot can read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Local terminal input and output
    Screen,
}

impl Channel {
    /// All channels currently accepted on the command line
    pub const ACCEPTED: &'static [Channel] = &[Channel::Screen];

    /// Parse a channel name
    ///
    /// # Errors
    ///
    /// Returns `LingobotError::Channel` for anything but a supported channel.
    ///
    /// # Examples
    ///
    /// ```
    /// use lingobot::cli::Channel;
    ///
    /// assert_eq!(Channel::parse_str("screen").unwrap(), Channel::Screen);
    /// assert!(Channel::parse_str("telegram").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, LingobotError> {
        match s.trim() {
            "screen" => Ok(Self::Screen),
            other => Err(LingobotError::Channel {
                channel: other.to_string(),
                accepted: Self::ACCEPTED
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Screen => write!(f, "screen"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.channel, "screen");
        assert_eq!(cli.config, None);
        assert_eq!(cli.config_path(), DEFAULT_CONFIG_PATH);
        assert!(cli.loglvl.is_empty());
    }

    #[test]
    fn test_cli_parse_no_arguments() {
        let cli = Cli::try_parse_from(["lingobot"]).unwrap();
        assert_eq!(cli.channel, "screen");
        assert!(cli.loglvl.is_empty());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::try_parse_from(["lingobot", "--config", "custom.toml"]).unwrap();
        assert_eq!(cli.config_path(), "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_short_config() {
        let cli = Cli::try_parse_from(["lingobot", "-c", "other.toml"]).unwrap();
        assert_eq!(cli.config, Some("other.toml".to_string()));
    }

    #[test]
    fn test_cli_blank_config_falls_back_to_default() {
        let cli = Cli::try_parse_from(["lingobot", "--config", "  "]).unwrap();
        assert_eq!(cli.config_path(), DEFAULT_CONFIG_PATH);
    }

    #[test]
    fn test_cli_parse_loglvl() {
        let cli = Cli::try_parse_from(["lingobot", "--loglvl", "DEBUG"]).unwrap();
        assert_eq!(cli.loglvl, "DEBUG");
    }

    #[test]
    fn test_cli_parse_channel() {
        let cli = Cli::try_parse_from(["lingobot", "--channel", "slack"]).unwrap();
        assert_eq!(cli.channel, "slack");
        assert!(Channel::parse_str(&cli.channel).is_err());
    }

    #[test]
    fn test_cli_parse_invalid_flag() {
        assert!(Cli::try_parse_from(["lingobot", "--unknown"]).is_err());
    }

    #[test]
    fn test_channel_parse_screen() {
        assert_eq!(Channel::parse_str(" screen ").unwrap(), Channel::Screen);
    }

    #[test]
    fn test_channel_error_lists_accepted() {
        let err = Channel::parse_str("web").unwrap_err();
        assert!(err.to_string().contains("screen"));
        assert!(err.to_string().contains("web"));
    }
}
