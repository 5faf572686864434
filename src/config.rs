//! Configuration management for Lingobot
//!
//! This module handles loading, parsing and validating the INI-style
//! configuration file. The `[bot]` and `[files]` sections are required; the
//! remaining sections fall back to defaults.
//!
//! ```toml
//! [bot]
//! name = "Lingobot"
//! subject = "academic subjects"
//!
//! [files]
//! history_file = "data/history.txt"
//! profile_file = "data/profiles.json"
//!
//! [session]
//! timeout_minutes = 10
//!
//! [languages]
//! default = "en"
//!
//! [languages.supported]
//! en = "English"
//! fr = "French"
//! ```

use crate::error::{LingobotError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main configuration structure for Lingobot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bot identity
    pub bot: BotConfig,
    /// Files read at startup and written at shutdown
    pub files: FilesConfig,
    /// Session bookkeeping settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Supported languages
    #[serde(default)]
    pub languages: LanguagesConfig,
    /// Locations of the per-language classifier models
    #[serde(default)]
    pub models: ModelsConfig,
}

/// Bot identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Display name of the bot
    pub name: String,
    /// What the bot can talk about
    pub subject: String,
}

/// File locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Line editor history
    pub history_file: PathBuf,
    /// Persisted user profiles
    pub profile_file: PathBuf,
}

/// Session bookkeeping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Minutes of silence after which the next input starts a new session
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: u32,

    /// Identifier of the local user
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_timeout_minutes() -> u32 {
    10
}

fn default_user_id() -> String {
    "1234".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: default_timeout_minutes(),
            user_id: default_user_id(),
        }
    }
}

impl SessionConfig {
    /// Session timeout as a duration
    pub fn timeout(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.timeout_minutes))
    }
}

/// Supported languages, keyed by language code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesConfig {
    /// Language used when detection finds nothing configured
    #[serde(default = "default_language")]
    pub default: String,

    /// Language code to display name
    #[serde(default = "default_supported_languages")]
    pub supported: BTreeMap<String, String>,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_supported_languages() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("en".to_string(), "English".to_string()),
        ("fr".to_string(), "French".to_string()),
    ])
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            default: default_language(),
            supported: default_supported_languages(),
        }
    }
}

impl LanguagesConfig {
    /// Display name for a language code, falling back to the code itself
    ///
    /// # Examples
    ///
    /// ```
    /// use lingobot::config::LanguagesConfig;
    ///
    /// let languages = LanguagesConfig::default();
    /// assert_eq!(languages.display_name("fr"), "French");
    /// assert_eq!(languages.display_name("xx"), "xx");
    /// ```
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.supported
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }
}

/// Classifier model locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Directory holding one `current_<code>` model directory per language
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,

    /// Directory holding the per-language classifier config files
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// File name prefix of the per-language config files
    #[serde(default = "default_config_prefix")]
    pub config_prefix: String,
}

fn default_project_dir() -> PathBuf {
    PathBuf::from("projects/default")
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("config")
}

fn default_config_prefix() -> String {
    "lingobot".to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            project_dir: default_project_dir(),
            config_dir: default_config_dir(),
            config_prefix: default_config_prefix(),
        }
    }
}

impl ModelsConfig {
    /// Trained model directory for a language
    pub fn model_dir(&self, code: &str) -> PathBuf {
        self.project_dir.join(format!("current_{}", code))
    }

    /// Classifier config file for a language
    pub fn config_file(&self, code: &str) -> PathBuf {
        self.config_dir
            .join(format!("{}_{}.json", self.config_prefix, code))
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, cannot be parsed, or lacks
    /// one of the required `[bot]` / `[files]` keys. All of these are fatal
    /// at startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LingobotError::Config(format!(
                "Unable to open config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&contents).map_err(|e| {
            LingobotError::Config(format!("Error with config file {}: {}", path.display(), e))
                .into()
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, LingobotError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `LingobotError::Config` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.bot.name.trim().is_empty() {
            return Err(LingobotError::Config("bot.name cannot be empty".to_string()).into());
        }

        if self.files.history_file.as_os_str().is_empty() {
            return Err(
                LingobotError::Config("files.history_file cannot be empty".to_string()).into(),
            );
        }

        if self.files.profile_file.as_os_str().is_empty() {
            return Err(
                LingobotError::Config("files.profile_file cannot be empty".to_string()).into(),
            );
        }

        if self.session.timeout_minutes == 0 {
            return Err(LingobotError::Config(
                "session.timeout_minutes must be greater than 0".to_string(),
            )
            .into());
        }

        if self.session.user_id.trim().is_empty() {
            return Err(
                LingobotError::Config("session.user_id cannot be empty".to_string()).into(),
            );
        }

        if self.languages.supported.is_empty() {
            return Err(LingobotError::Config(
                "languages.supported must list at least one language".to_string(),
            )
            .into());
        }

        if !self
            .languages
            .supported
            .contains_key(&self.languages.default)
        {
            return Err(LingobotError::Config(format!(
                "Default language {} is not one of: {}",
                self.languages.default,
                self.languages
                    .supported
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "Lingobot".to_string(),
                subject: "academic subjects".to_string(),
            },
            files: FilesConfig {
                history_file: PathBuf::from("data/history.txt"),
                profile_file: PathBuf::from("data/profiles.json"),
            },
            session: SessionConfig::default(),
            languages: LanguagesConfig::default(),
            models: ModelsConfig::default(),
        }
    }
}
