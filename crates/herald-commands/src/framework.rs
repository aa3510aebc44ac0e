//! Registry and dispatcher setup used at start-up.

use crate::cooldown::CooldownManager;
use crate::dispatcher::Dispatcher;
use crate::help::Help;
use crate::ping::Ping;
use crate::registry::{CommandRegistry, RegistryError};
use crate::uptime::Uptime;
use chrono::{DateTime, Utc};
use herald_config::BotConfig;
use std::sync::Arc;
use tracing::info;

/// Creates a registry holding the built-in commands.
pub fn create_registry(started_at: DateTime<Utc>) -> Result<CommandRegistry, RegistryError> {
    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(Ping::new()))?;
    registry.register(Arc::new(Uptime::new(started_at)))?;
    registry.register(Arc::new(Help::new()))?;
    Ok(registry)
}

/// Creates a dispatcher over `registry`, seeded with the configured block list.
#[must_use]
pub fn create_dispatcher(config: &BotConfig, registry: CommandRegistry) -> Dispatcher {
    info!(commands = registry.len(), "Command registry ready");
    let dispatcher = Dispatcher::new(Arc::new(registry), Arc::new(CooldownManager::new()));
    dispatcher.set_blocked_users(config.discord.blocked_users.iter().copied());
    dispatcher
}
