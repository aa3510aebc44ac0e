//! Gateway event handling.

use crate::snapshot;
use herald_commands::{spawn_cooldown_sweeper, Dispatcher};
use herald_config::{ConfigCache, GuildConfig, GuildConfigSource, GuildConfigStore};
use serenity::all::{
    Context, CreateMessage, EventHandler, Guild, GuildChannel, GuildId, Message, Ready, Role, RoleId,
    UnavailableGuild,
};
use serenity::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Serenity event handler feeding the dispatcher.
pub struct Handler {
    dispatcher: Arc<Dispatcher>,
    guilds: Arc<GuildConfigStore>,
    config: Arc<ConfigCache>,
    sweeper_started: AtomicBool,
}

impl Handler {
    /// Creates a handler over a dispatcher and the guild settings it reads.
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>, guilds: Arc<GuildConfigStore>, config: Arc<ConfigCache>) -> Self {
        Self {
            dispatcher,
            guilds,
            config,
            sweeper_started: AtomicBool::new(false),
        }
    }

    /// Dispatcher messages are routed through.
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Guild settings store.
    #[must_use]
    pub fn guilds(&self) -> &Arc<GuildConfigStore> {
        &self.guilds
    }

    /// Greeting sent to the owner of a guild that just added the bot.
    #[must_use]
    pub fn welcome_message(&self, guild_name: &str) -> String {
        format!(
            "Thanks for adding me to {guild_name}! My default prefix is '**{}**'.",
            self.config.default_prefix()
        )
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, message: Message) {
        let (inbound, guild) = snapshot::capture(&ctx.cache, &message);
        let config = match inbound.guild_id {
            Some(guild_id) => self.guilds.guild_config(guild_id),
            None => Arc::new(GuildConfig::with_prefix(self.config.default_prefix())),
        };

        let outcome = self.dispatcher.dispatch(&inbound, guild.as_ref(), &config).await;
        if let Some(reply) = outcome.reply() {
            if let Err(error) = message.channel_id.say(&ctx.http, reply).await {
                warn!(channel = %message.channel_id, %error, "Failed to send reply");
            }
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected to Discord");

        if !self.sweeper_started.swap(true, Ordering::SeqCst) {
            let period = self.config.sweep_interval();
            spawn_cooldown_sweeper(Arc::clone(self.dispatcher.cooldowns()), period);
            debug!(?period, "Started cooldown sweeper");
        }
    }

    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        if is_new != Some(true) {
            return;
        }

        info!(guild = %guild.id, name = %guild.name, "Joined guild");
        let greeting = CreateMessage::new().content(self.welcome_message(&guild.name));
        if let Err(error) = guild.owner_id.direct_message(&ctx, greeting).await {
            warn!(guild = %guild.id, %error, "Failed to greet guild owner");
        }
    }

    async fn guild_delete(&self, _ctx: Context, incomplete: UnavailableGuild, _full: Option<Guild>) {
        if incomplete.unavailable {
            return;
        }
        if self.guilds.remove(incomplete.id.get().into()).is_some() {
            info!(guild = %incomplete.id, "Dropped settings of departed guild");
        }
    }

    async fn channel_delete(&self, _ctx: Context, channel: GuildChannel, _messages: Option<Vec<Message>>) {
        self.guilds
            .forget_channel(channel.guild_id.get().into(), channel.id.get().into());
    }

    async fn guild_role_delete(
        &self,
        _ctx: Context,
        guild_id: GuildId,
        removed_role_id: RoleId,
        _removed_role_data_if_in_cache: Option<Role>,
    ) {
        self.guilds
            .forget_role(guild_id.get().into(), removed_role_id.get().into());
    }
}
