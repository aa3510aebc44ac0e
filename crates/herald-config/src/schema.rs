//! Configuration schema definitions.

use herald_common::{LoggingConfig, UserId};
use serde::{Deserialize, Serialize};

/// Main configuration structure for the Herald bot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Cooldown housekeeping configuration.
    pub cooldowns: CooldownSettings,
}

/// Discord bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Prefix assigned to guilds that have not configured their own.
    pub default_prefix: String,
    /// Users whose messages are never dispatched.
    pub blocked_users: Vec<UserId>,
}

/// Cooldown housekeeping configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownSettings {
    /// Interval of the background sweep that drops expired cooldowns.
    pub sweep_interval_seconds: u64,
}
