//! Live bot configuration shared by the gateway handler and start-up code.
//!
//! Readers take an `Arc` snapshot per event, so a replacement published while
//! a message is being dispatched only affects the next one.

use crate::schema::BotConfig;
use crate::validator::ConfigValidator;
use arc_swap::ArcSwap;
use herald_common::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The bot's current [`BotConfig`].
#[derive(Debug)]
pub struct ConfigCache {
    current: ArcSwap<BotConfig>,
}

impl ConfigCache {
    /// Wraps a configuration that has already been loaded.
    #[must_use]
    pub fn new(config: BotConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Snapshot of the current configuration.
    pub fn get(&self) -> Arc<BotConfig> {
        self.current.load_full()
    }

    /// Validates `config` and publishes it, returning the configuration it
    /// replaced. An invalid configuration leaves the current one in place.
    pub fn replace(&self, config: BotConfig) -> Result<Arc<BotConfig>> {
        ConfigValidator::validate(&config)?;
        let previous = self.current.swap(Arc::new(config));
        info!("Published new bot configuration");
        Ok(previous)
    }

    /// Prefix handed to guilds that have not chosen their own.
    #[must_use]
    pub fn default_prefix(&self) -> String {
        self.current.load().discord.default_prefix.clone()
    }

    /// Period of the expired-cooldown sweep.
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.current.load().cooldowns.sweep_interval_seconds)
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}
