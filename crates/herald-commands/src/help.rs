//! `help` command

use crate::arguments::{ArgumentKind, ArgumentSpec};
use crate::descriptor::CommandDescriptor;
use crate::registry::{Command, CommandRegistry, Invocation};
use async_trait::async_trait;
use herald_common::format_duration;
use std::fmt::Write;

/// Lists commands by category, or describes one command.
pub struct Help {
    descriptor: CommandDescriptor,
}

impl Help {
    /// Create the command
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: CommandDescriptor::new("help")
                .aliases(["commands"])
                .category("Utility")
                .description("Lists commands or explains one of them")
                .usage("help [command]")
                .example("help")
                .example("help ping")
                .cannot_disable()
                .argument(ArgumentSpec::new("command", ArgumentKind::freeform()).optional()),
        }
    }
}

impl Default for Help {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for Help {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: Invocation) -> anyhow::Result<Option<String>> {
        let prefix = invocation.prefix.as_str();
        let reply = match invocation.flags.text("command") {
            None => overview(&invocation.registry, prefix),
            Some(name) => match invocation.registry.get(name) {
                Some(command) => details(command.descriptor(), prefix),
                None => format!(
                    "{}, there is no command called `{name}`. Use `{prefix}help` to list them.",
                    invocation.author_name
                ),
            },
        };
        Ok(Some(reply))
    }
}

fn overview(registry: &CommandRegistry, prefix: &str) -> String {
    let mut text = String::from("**Commands**\n");
    for (category, commands) in registry.categories() {
        let names: Vec<String> = commands.iter().map(|name| format!("`{name}`")).collect();
        let _ = writeln!(text, "**{category}**: {}", names.join(", "));
    }
    let _ = write!(text, "Use `{prefix}help <command>` for details.");
    text
}

fn details(descriptor: &CommandDescriptor, prefix: &str) -> String {
    let mut text = format!("**{}**", descriptor.name);
    if !descriptor.description.is_empty() {
        let _ = write!(text, "\n{}", descriptor.description);
    }
    if !descriptor.usage.is_empty() {
        let _ = write!(text, "\nUsage: `{prefix}{}`", descriptor.usage);
    }
    if !descriptor.aliases.is_empty() {
        let aliases: Vec<String> = descriptor.aliases.iter().map(|alias| format!("`{alias}`")).collect();
        let _ = write!(text, "\nAliases: {}", aliases.join(", "));
    }
    if !descriptor.examples.is_empty() {
        let examples: Vec<String> = descriptor
            .examples
            .iter()
            .map(|example| format!("`{prefix}{example}`"))
            .collect();
        let _ = write!(text, "\nExamples: {}", examples.join(", "));
    }
    if !descriptor.cooldown.is_zero() {
        let _ = write!(text, "\nCooldown: `{}`", format_duration(descriptor.cooldown));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ping::Ping;
    use std::sync::Arc;

    #[test]
    fn test_details_lists_metadata() {
        let text = details(Help::new().descriptor(), "!");
        assert!(text.starts_with("**help**\nLists commands"));
        assert!(text.contains("Usage: `!help [command]`"));
        assert!(text.contains("Aliases: `commands`"));
        assert!(text.contains("Examples: `!help`, `!help ping`"));
        assert!(!text.contains("Cooldown"));
    }

    #[test]
    fn test_overview_groups_by_category() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(Ping::new())).unwrap();
        registry.register(Arc::new(Help::new())).unwrap();

        let text = overview(&registry, "?");
        assert!(text.contains("**utility**: `ping`, `help`"));
        assert!(text.ends_with("Use `?help <command>` for details."));
    }
}
