//! Core bot wiring: registry, dispatcher and the serenity client.

use crate::error::BotResult;
use crate::handler::Handler;
use chrono::Utc;
use herald_commands::{create_dispatcher, create_registry};
use herald_config::{BotConfig, ConfigCache, GuildConfigStore};
use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;
use tracing::info;

/// Main bot structure.
pub struct HeraldBot {
    config: Arc<ConfigCache>,
}

impl HeraldBot {
    /// Creates a new bot instance.
    #[must_use]
    pub fn new(config: BotConfig) -> Self {
        Self {
            config: Arc::new(ConfigCache::new(config)),
        }
    }

    /// Gateway intents the bot subscribes to.
    ///
    /// Message content and member intents are privileged and must be enabled
    /// for the application.
    #[must_use]
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MEMBERS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    /// Builds the event handler with the built-in commands registered.
    pub fn handler(&self) -> BotResult<Handler> {
        let config = self.config.get();
        let registry = create_registry(Utc::now())?;
        let dispatcher = Arc::new(create_dispatcher(&config, registry));
        let guilds = Arc::new(GuildConfigStore::new(config.discord.default_prefix.as_str()));
        Ok(Handler::new(dispatcher, guilds, Arc::clone(&self.config)))
    }

    /// Starts the bot and runs until the gateway connection ends.
    pub async fn start(&self) -> BotResult<()> {
        let handler = self.handler()?;
        let token = self.config.get().discord.token.clone();

        let mut client = Client::builder(&token, Self::intents())
            .event_handler(handler)
            .await?;

        info!("Connecting to Discord");
        client.start().await?;
        Ok(())
    }
}
