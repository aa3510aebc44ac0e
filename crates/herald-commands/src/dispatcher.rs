//! Turns inbound messages into command invocations.
//!
//! [`Dispatcher::dispatch`] runs a fixed sequence of checks and stops at the
//! first one that fails:
//!
//! 1. automated authors, non-text channels and blocked users are ignored
//! 2. the message must start with the guild prefix or a mention of the bot
//! 3. the first word must name a command, directly or through a guild alias
//! 4. muted commands and muted channels are ignored
//! 5. the [`PermissionGate`] must grant the command
//! 6. the [`CooldownManager`] must not be cooling the member down
//! 7. the remaining words must satisfy the command's arguments
//!
//! Ignored messages produce no reply; rejections carry a reply for the
//! channel. A command that fails or panics is logged and reported as
//! [`DispatchOutcome::Failed`] without affecting other dispatches.

use crate::arguments::{validate, Validation, ValidationContext};
use crate::context::{GuildSnapshot, InboundMessage};
use crate::cooldown::{CooldownManager, CooldownScope};
use crate::permissions::{PermissionGate, PermissionOutcome};
use crate::registry::{Command, CommandRegistry, Invocation};
use arc_swap::ArcSwap;
use dashmap::DashMap;
use herald_common::{format_duration, UserId};
use herald_config::GuildConfig;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

/// Why a message was dropped without a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The author is a bot.
    AutomatedAuthor,
    /// The channel is not an ordinary text channel.
    NotTextChannel,
    /// The author is on the block list.
    BlockedAuthor,
    /// The message does not start with a prefix.
    NoPrefix,
    /// Nothing follows the prefix.
    EmptyCommand,
    /// The first word names no command.
    UnknownCommand,
    /// The guild muted the command.
    CommandDisabled,
    /// The guild muted the channel.
    ChannelDisabled,
    /// Arguments were rejected and the failing argument has no prompt.
    NoPrompt,
    /// Guild or member context that should always be present was missing.
    InternalFault,
}

/// Why a command was refused with a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The bot lacks permissions.
    AgentPermissions,
    /// The member lacks permissions.
    ActorPermissions,
    /// The member is cooling down for this long.
    Cooldown(Duration),
    /// An argument is missing or invalid.
    InvalidArguments,
}

/// Terminal state of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Dropped silently.
    Ignored(IgnoreReason),
    /// Refused; `reply` goes back to the channel.
    Rejected {
        /// Which check refused.
        reason: RejectReason,
        /// Text for the channel.
        reply: String,
    },
    /// The command ran to completion.
    Invoked {
        /// Canonical command name.
        command: String,
        /// Text the command asked to send.
        reply: Option<String>,
    },
    /// The command returned an error or panicked.
    Failed {
        /// Canonical command name.
        command: String,
    },
}

impl DispatchOutcome {
    /// Text to send back to the channel, if any.
    #[must_use]
    pub fn reply(&self) -> Option<&str> {
        match self {
            Self::Rejected { reply, .. }
            | Self::Invoked {
                reply: Some(reply), ..
            } => Some(reply),
            _ => None,
        }
    }
}

/// Routes messages to registered commands.
#[derive(Debug)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    cooldowns: Arc<CooldownManager>,
    blocked: ArcSwap<HashSet<UserId>>,
    prefixes: DashMap<(UserId, String), Regex>,
}

impl Dispatcher {
    /// Create a dispatcher over `registry` with an empty block list
    #[must_use]
    pub fn new(registry: Arc<CommandRegistry>, cooldowns: Arc<CooldownManager>) -> Self {
        Self {
            registry,
            cooldowns,
            blocked: ArcSwap::from_pointee(HashSet::new()),
            prefixes: DashMap::new(),
        }
    }

    /// Replaces the block list.
    pub fn set_blocked_users<I>(&self, users: I)
    where
        I: IntoIterator<Item = UserId>,
    {
        let users: HashSet<UserId> = users.into_iter().collect();
        info!(count = users.len(), "Updated blocked users");
        self.blocked.store(Arc::new(users));
    }

    /// Whether `user` is on the block list.
    #[must_use]
    pub fn is_blocked(&self, user: UserId) -> bool {
        self.blocked.load().contains(&user)
    }

    /// Registry commands are resolved from.
    #[must_use]
    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Cooldown ledger shared with the sweeper.
    #[must_use]
    pub fn cooldowns(&self) -> &Arc<CooldownManager> {
        &self.cooldowns
    }

    /// Runs one message through the pipeline.
    ///
    /// `guild` and `config` describe the guild the message was sent in and
    /// are treated as read-only for the whole dispatch.
    pub async fn dispatch(
        &self,
        message: &InboundMessage,
        guild: Option<&GuildSnapshot>,
        config: &GuildConfig,
    ) -> DispatchOutcome {
        let id = Uuid::new_v4();
        let span = info_span!(
            "dispatch",
            %id,
            user = %message.author.id,
            channel = %message.channel_id
        );

        async move {
            match self.prepare(id, message, guild, config) {
                Ok((command, invocation)) => Self::invoke(command, invocation).await,
                Err(outcome) => {
                    debug!(?outcome, "Message not dispatched");
                    outcome
                }
            }
        }
        .instrument(span)
        .await
    }

    fn prepare(
        &self,
        id: Uuid,
        message: &InboundMessage,
        guild: Option<&GuildSnapshot>,
        config: &GuildConfig,
    ) -> Result<(Arc<dyn Command>, Invocation), DispatchOutcome> {
        use DispatchOutcome::Ignored;

        if message.author.bot {
            return Err(Ignored(IgnoreReason::AutomatedAuthor));
        }
        if !message.channel_kind.accepts_commands() {
            return Err(Ignored(IgnoreReason::NotTextChannel));
        }
        if self.is_blocked(message.author.id) {
            return Err(Ignored(IgnoreReason::BlockedAuthor));
        }

        let (Some(guild_id), Some(guild)) = (message.guild_id, guild) else {
            error!("Guild message arrived without guild context");
            return Err(Ignored(IgnoreReason::InternalFault));
        };

        let pattern = self.prefix_pattern(&config.prefix, guild.agent.id).map_err(|error| {
            error!(prefix = %config.prefix, %error, "Failed to build prefix pattern");
            Ignored(IgnoreReason::InternalFault)
        })?;
        let Some(captures) = pattern.captures(&message.content) else {
            return Err(Ignored(IgnoreReason::NoPrefix));
        };
        let prefix = captures.get(1).map_or("", |m| m.as_str()).to_string();
        let rest = captures.get(0).map_or(message.content.as_str(), |m| &message.content[m.end()..]);

        let mut words = rest.split_whitespace();
        let Some(invoked_as) = words.next().map(str::to_lowercase) else {
            return Err(Ignored(IgnoreReason::EmptyCommand));
        };
        let args: Vec<String> = words.map(str::to_string).collect();

        let command = self.registry.get(&invoked_as).or_else(|| {
            config
                .resolve_alias(&invoked_as)
                .and_then(|name| self.registry.get(name))
        });
        let Some(command) = command else {
            return Err(Ignored(IgnoreReason::UnknownCommand));
        };
        let descriptor = command.descriptor();

        if descriptor.can_disable && config.is_command_disabled(&descriptor.name) {
            return Err(Ignored(IgnoreReason::CommandDisabled));
        }
        if config.is_channel_disabled(message.channel_id) {
            return Err(Ignored(IgnoreReason::ChannelDisabled));
        }

        let Some(actor) = guild.member(message.author.id) else {
            error!(guild = %guild_id, "Invoking member missing from guild snapshot");
            return Err(Ignored(IgnoreReason::InternalFault));
        };

        let permissions = PermissionGate::check(descriptor, actor, &guild.agent, config);
        if let Some(reply) = permissions.message(&message.author.name) {
            let reason = match permissions {
                PermissionOutcome::AgentMissing(_) => RejectReason::AgentPermissions,
                _ => RejectReason::ActorPermissions,
            };
            return Err(DispatchOutcome::Rejected { reason, reply });
        }

        let cooldown = CooldownManager::effective_cooldown(descriptor, actor, guild, config);
        let scope = CooldownScope::for_command(descriptor, guild_id);
        if let Some(remaining) = self
            .cooldowns
            .check_and_arm(scope, &descriptor.name, actor.id, cooldown)
        {
            return Err(DispatchOutcome::Rejected {
                reason: RejectReason::Cooldown(remaining),
                reply: format!(
                    "{}, please wait `{}` before using this command again.",
                    message.author.name,
                    format_duration(remaining)
                ),
            });
        }

        let ctx = ValidationContext {
            message,
            guild,
            actor,
        };
        let flags = match validate(&args, &descriptor.arguments, &ctx) {
            Validation::Valid(flags) => flags,
            Validation::Invalid {
                prompt: Some(reply),
            } => {
                return Err(DispatchOutcome::Rejected {
                    reason: RejectReason::InvalidArguments,
                    reply,
                })
            }
            Validation::Invalid { prompt: None } => return Err(Ignored(IgnoreReason::NoPrompt)),
        };

        let invocation = Invocation {
            id,
            command: descriptor.name.clone(),
            invoked_as,
            prefix,
            actor: actor.clone(),
            author_name: message.author.name.clone(),
            guild_id,
            channel_id: message.channel_id,
            args,
            flags,
            registry: Arc::clone(&self.registry),
        };
        Ok((command, invocation))
    }

    async fn invoke(command: Arc<dyn Command>, invocation: Invocation) -> DispatchOutcome {
        let name = invocation.command.clone();
        info!(command = %name, invoked_as = %invocation.invoked_as, "Invoking command");

        let task = tokio::spawn(async move { command.execute(invocation).await }.in_current_span());
        match task.await {
            Ok(Ok(reply)) => DispatchOutcome::Invoked {
                command: name,
                reply,
            },
            Ok(Err(error)) => {
                let error = format!("{error:#}");
                error!(command = %name, %error, "Command failed");
                DispatchOutcome::Failed { command: name }
            }
            Err(error) => {
                error!(command = %name, %error, "Command task aborted");
                DispatchOutcome::Failed { command: name }
            }
        }
    }

    fn prefix_pattern(&self, prefix: &str, agent: UserId) -> Result<Regex, regex::Error> {
        let key = (agent, prefix.to_string());
        if let Some(pattern) = self.prefixes.get(&key) {
            return Ok(pattern.clone());
        }

        let pattern = Regex::new(&format!(r"^(<@!?{agent}>|{})\s*", regex::escape(prefix)))?;
        self.prefixes.insert(key, pattern.clone());
        Ok(pattern)
    }
}
