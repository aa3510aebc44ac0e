//! Immutable metadata describing one command.

use crate::arguments::ArgumentSpec;
use crate::registry::NO_CATEGORY;
use herald_common::PermissionSet;
use std::collections::BTreeSet;
use std::time::Duration;

/// Metadata and argument schema of a registered command.
///
/// Built once at start-up with the chained setters below and never changed
/// afterwards.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    /// Unique, lower-case command name.
    pub name: String,
    /// Alternative lower-case names.
    pub aliases: BTreeSet<String>,
    /// Help category; `None` files the command under [`NO_CATEGORY`].
    pub category: Option<String>,
    /// One-line description for help output.
    pub description: String,
    /// Usage line without prefix, e.g. `ban <member> [reason]`.
    pub usage: String,
    /// Example invocations without prefix.
    pub examples: Vec<String>,
    /// Base cooldown; zero disables rate limiting.
    pub cooldown: Duration,
    /// Whether the cooldown is shared across guilds (the default) or kept per guild.
    pub global_cooldown: bool,
    /// Whether guilds may mute this command.
    pub can_disable: bool,
    /// Permissions the invoking member needs, unless the guild overrides them.
    pub actor_permissions: PermissionSet,
    /// Permissions the bot needs in the channel.
    pub agent_permissions: PermissionSet,
    /// Arguments, in the order users type them.
    pub arguments: Vec<ArgumentSpec>,
}

impl CommandDescriptor {
    /// A descriptor with no cooldown, requirements, or arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            aliases: BTreeSet::new(),
            category: None,
            description: String::new(),
            usage: String::new(),
            examples: Vec::new(),
            cooldown: Duration::ZERO,
            global_cooldown: true,
            can_disable: true,
            actor_permissions: PermissionSet::new(),
            agent_permissions: PermissionSet::new(),
            arguments: Vec::new(),
        }
    }

    /// Adds aliases.
    #[must_use]
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases
            .extend(aliases.into_iter().map(|alias| alias.into().to_lowercase()));
        self
    }

    /// Sets the help category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the usage line.
    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Adds an example invocation.
    #[must_use]
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Sets the base cooldown.
    #[must_use]
    pub const fn cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Keeps cooldowns per guild instead of globally.
    #[must_use]
    pub const fn guild_cooldown(mut self) -> Self {
        self.global_cooldown = false;
        self
    }

    /// Prevents guilds from muting the command.
    #[must_use]
    pub const fn cannot_disable(mut self) -> Self {
        self.can_disable = false;
        self
    }

    /// Sets the permissions the invoking member needs.
    #[must_use]
    pub fn actor_permissions(mut self, permissions: impl Into<PermissionSet>) -> Self {
        self.actor_permissions = permissions.into();
        self
    }

    /// Sets the permissions the bot needs.
    #[must_use]
    pub fn agent_permissions(mut self, permissions: impl Into<PermissionSet>) -> Self {
        self.agent_permissions = permissions.into();
        self
    }

    /// Appends an argument to the schema.
    #[must_use]
    pub fn argument(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Category key used for grouping in help output.
    #[must_use]
    pub fn category_key(&self) -> String {
        self.category
            .as_deref()
            .map_or_else(|| NO_CATEGORY.to_string(), str::to_lowercase)
    }
}
