//! Default values for configuration sections.

use crate::schema::{CooldownSettings, DiscordConfig};

/// Prefix used when neither the bot configuration nor a guild sets one.
pub const DEFAULT_PREFIX: &str = "!";

/// Default interval of the cooldown sweep.
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 300;

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            default_prefix: DEFAULT_PREFIX.to_string(),
            blocked_users: Vec::new(),
        }
    }
}

impl Default for CooldownSettings {
    fn default() -> Self {
        Self {
            sweep_interval_seconds: DEFAULT_SWEEP_INTERVAL_SECONDS,
        }
    }
}
