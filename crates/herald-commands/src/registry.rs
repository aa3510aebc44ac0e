//! Command registry for managing bot commands

use crate::arguments::Flags;
use crate::context::MemberInfo;
use crate::descriptor::CommandDescriptor;
use async_trait::async_trait;
use herald_common::{ChannelId, GuildId};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Category of commands registered without one.
pub const NO_CATEGORY: &str = "no category";

/// A command the dispatcher can invoke.
#[async_trait]
pub trait Command: Send + Sync + 'static {
    /// Metadata and argument schema.
    fn descriptor(&self) -> &CommandDescriptor;

    /// Runs the command. `Ok(Some(text))` is sent back to the channel.
    async fn execute(&self, invocation: Invocation) -> anyhow::Result<Option<String>>;
}

/// Everything a command receives when it is invoked.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Correlates log lines of one dispatch.
    pub id: Uuid,
    /// Canonical name of the command.
    pub command: String,
    /// Name or alias the user typed, lower-cased.
    pub invoked_as: String,
    /// Prefix text the message started with.
    pub prefix: String,
    /// Member who invoked the command.
    pub actor: MemberInfo,
    /// Username of the invoking account.
    pub author_name: String,
    /// Guild of the message.
    pub guild_id: GuildId,
    /// Channel of the message.
    pub channel_id: ChannelId,
    /// All tokens after the command name.
    pub args: Vec<String>,
    /// Validated arguments.
    pub flags: Flags,
    /// The registry the command was resolved from.
    pub registry: Arc<CommandRegistry>,
}

/// Errors raised while registering commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The descriptor has no name.
    #[error("command has no name")]
    EmptyName,
    /// Another command already uses the name.
    #[error("command name '{0}' has already been registered")]
    DuplicateName(String),
}

/// Commands by name, with aliases and help categories.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
    aliases: HashMap<String, String>,
    categories: BTreeMap<String, Vec<String>>,
}

impl CommandRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command.
    ///
    /// Aliases that clash with an existing name or alias are skipped with a
    /// warning; malformed argument declarations are reported here and skipped
    /// at validation time.
    pub fn register(&mut self, command: Arc<dyn Command>) -> Result<(), RegistryError> {
        let descriptor = command.descriptor();
        let name = descriptor.name.clone();

        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.resolves(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        for spec in &descriptor.arguments {
            if let Err(error) = spec.check() {
                warn!(command = %name, %error, "Command declares a malformed argument");
            }
        }

        for alias in &descriptor.aliases {
            if alias == &name || self.resolves(alias) {
                warn!(command = %name, alias = %alias, "Command alias has already been added, skipping");
                continue;
            }
            self.aliases.insert(alias.clone(), name.clone());
        }

        self.categories
            .entry(descriptor.category_key())
            .or_default()
            .push(name.clone());

        debug!(command = %name, aliases = descriptor.aliases.len(), "Registered command");
        self.commands.insert(name, command);
        Ok(())
    }

    /// Looks a command up by name or alias.
    #[must_use]
    pub fn get(&self, name_or_alias: &str) -> Option<Arc<dyn Command>> {
        let key = name_or_alias.to_lowercase();
        let name = self.aliases.get(&key).unwrap_or(&key);
        self.commands.get(name).cloned()
    }

    /// Registered command names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Help categories and the commands filed under each, in registration order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(category, commands)| (category.as_str(), commands.as_slice()))
    }

    /// Number of registered commands
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn resolves(&self, name: &str) -> bool {
        self.commands.contains_key(name) || self.aliases.contains_key(name)
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .field("aliases", &self.aliases)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop(CommandDescriptor);

    #[async_trait]
    impl Command for Noop {
        fn descriptor(&self) -> &CommandDescriptor {
            &self.0
        }

        async fn execute(&self, _invocation: Invocation) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
    }

    fn noop(descriptor: CommandDescriptor) -> Arc<dyn Command> {
        Arc::new(Noop(descriptor))
    }

    #[test]
    fn test_lookup_by_name_and_alias() {
        let mut registry = CommandRegistry::new();
        registry
            .register(noop(CommandDescriptor::new("Ping").aliases(["p", "latency"])))
            .unwrap();

        assert_eq!(registry.get("ping").unwrap().descriptor().name, "ping");
        assert_eq!(registry.get("P").unwrap().descriptor().name, "ping");
        assert!(registry.get("pong").is_none());
    }

    #[test]
    fn test_duplicates_are_rejected_and_alias_clashes_skipped() {
        let mut registry = CommandRegistry::new();
        registry
            .register(noop(CommandDescriptor::new("ping").aliases(["p"])))
            .unwrap();

        assert_eq!(
            registry.register(noop(CommandDescriptor::new("ping"))),
            Err(RegistryError::DuplicateName("ping".into()))
        );
        assert_eq!(
            registry.register(noop(CommandDescriptor::new("p"))),
            Err(RegistryError::DuplicateName("p".into()))
        );
        assert_eq!(
            registry.register(noop(CommandDescriptor::new(" "))),
            Err(RegistryError::EmptyName)
        );

        registry
            .register(noop(CommandDescriptor::new("purge").aliases(["p", "prune"])))
            .unwrap();
        assert_eq!(registry.get("p").unwrap().descriptor().name, "ping");
        assert_eq!(registry.get("prune").unwrap().descriptor().name, "purge");
    }

    #[test]
    fn test_categories_group_commands() {
        let mut registry = CommandRegistry::new();
        registry
            .register(noop(CommandDescriptor::new("ban").category("Moderation")))
            .unwrap();
        registry
            .register(noop(CommandDescriptor::new("kick").category("moderation")))
            .unwrap();
        registry.register(noop(CommandDescriptor::new("ping"))).unwrap();

        let categories: Vec<(&str, &[String])> = registry.categories().collect();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].0, "moderation");
        assert_eq!(categories[0].1, ["ban".to_string(), "kick".to_string()]);
        assert_eq!(categories[1].0, NO_CATEGORY);
        assert_eq!(registry.names(), vec!["ban", "kick", "ping"]);
    }
}
