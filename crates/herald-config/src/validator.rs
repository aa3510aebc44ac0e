//! Runtime validation of loaded configuration.

use crate::guild::GuildConfig;
use crate::schema::BotConfig;
use herald_common::{HeraldError, Result};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the bot configuration.
    pub fn validate(config: &BotConfig) -> Result<()> {
        if config.discord.token.trim().is_empty() {
            return Err(HeraldError::config("Discord token cannot be empty"));
        }

        Self::validate_prefix(&config.discord.default_prefix)?;

        if config.cooldowns.sweep_interval_seconds == 0 {
            return Err(HeraldError::config(
                "Cooldown sweep interval must be at least one second",
            ));
        }

        if config.logging.level.trim().is_empty() {
            return Err(HeraldError::config("Log level cannot be empty"));
        }

        Ok(())
    }

    /// Validates guild settings before they are stored.
    pub fn validate_guild(config: &GuildConfig) -> Result<()> {
        Self::validate_prefix(&config.prefix)?;

        if let Some((alias, _)) = config
            .aliases
            .iter()
            .find(|(alias, target)| alias.is_empty() || target.is_empty())
        {
            return Err(HeraldError::config(format!(
                "Alias '{alias}' must name a command"
            )));
        }

        if let Some(alias) = config
            .aliases
            .keys()
            .find(|alias| alias.chars().any(|c| c.is_whitespace() || c.is_uppercase()))
        {
            return Err(HeraldError::config(format!(
                "Alias '{alias}' must be a single lower-case word"
            )));
        }

        Ok(())
    }

    fn validate_prefix(prefix: &str) -> Result<()> {
        if prefix.is_empty() {
            return Err(HeraldError::config("Command prefix cannot be empty"));
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(HeraldError::config(format!(
                "Command prefix '{prefix}' cannot contain whitespace"
            )));
        }
        Ok(())
    }
}
