//! Configuration loading utilities

use crate::schema::BotConfig;
use crate::validator::ConfigValidator;
use herald_common::{HeraldError, UserId};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "HERALD_CONFIG_PATH";

const CANDIDATE_FILES: [&str; 3] = ["config.yaml", "config.yml", "config.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration file '{0}': expected .yaml, .yml or .toml")]
    UnsupportedFormat(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Invalid(#[from] HeraldError),
}

impl From<ConfigError> for HeraldError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source("Configuration loading error", err)
    }
}

/// Serialization format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// YAML document
    Yaml,
    /// TOML document
    Toml,
}

impl FileFormat {
    /// Detects the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the environment-selected file, a default file
    /// in the working directory, or defaults, then apply environment overrides
    /// and validate.
    pub fn load() -> Result<BotConfig, ConfigError> {
        let mut config = match Self::locate() {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration file");
                Self::read_file(&path)?
            }
            None => {
                info!("No configuration file found, using defaults");
                BotConfig::default()
            }
        };

        Self::apply_overrides(&mut config, |var| env::var(var).ok())?;
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a specific file with environment overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<BotConfig, ConfigError> {
        let mut config = Self::read_file(path.as_ref())?;
        Self::apply_overrides(&mut config, |var| env::var(var).ok())?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Read and parse a configuration file without overrides or validation
    pub fn read_file(path: &Path) -> Result<BotConfig, ConfigError> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(&content, format)
    }

    /// Parse configuration text in the given format
    pub fn parse_str(content: &str, format: FileFormat) -> Result<BotConfig, ConfigError> {
        let config = match format {
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Apply overrides read through `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(config: &mut BotConfig, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            config.discord.token = token;
        }

        if let Some(prefix) = lookup("HERALD_DEFAULT_PREFIX") {
            config.discord.default_prefix = prefix;
        }

        if let Some(blocked) = lookup("HERALD_BLOCKED_USERS") {
            config.discord.blocked_users = blocked
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<UserId>().map_err(|e| ConfigError::EnvParseError {
                        var: "HERALD_BLOCKED_USERS".to_string(),
                        source: Box::new(e),
                    })
                })
                .collect::<Result<_, _>>()?;
        }

        if let Some(level) = lookup("HERALD_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(format) = lookup("HERALD_LOG_FORMAT") {
            config.logging.format = format.parse().map_err(|e| ConfigError::EnvParseError {
                var: "HERALD_LOG_FORMAT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(file) = lookup("HERALD_LOG_FILE") {
            config.logging.file_path = Some(file).filter(|f| !f.is_empty());
        }

        debug!("Applied environment overrides to configuration");
        Ok(())
    }

    fn locate() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        CANDIDATE_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}
