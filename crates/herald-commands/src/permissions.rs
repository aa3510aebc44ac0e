//! Permission gate run before a command is allowed to execute

use crate::context::MemberInfo;
use crate::descriptor::CommandDescriptor;
use herald_common::{format_permission_list, PermissionFlag};
use herald_config::GuildConfig;
use tracing::debug;

/// Outcome of a permission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionOutcome {
    /// Both the bot and the invoking member hold what the command needs.
    Granted,
    /// The bot lacks these permissions in the channel.
    AgentMissing(Vec<PermissionFlag>),
    /// The invoking member lacks these permissions.
    ActorMissing(Vec<PermissionFlag>),
}

impl PermissionOutcome {
    /// Whether the command may proceed.
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// User-facing rejection, addressed to `name`, or `None` when granted.
    #[must_use]
    pub fn message(&self, name: &str) -> Option<String> {
        match self {
            Self::Granted => None,
            Self::AgentMissing(missing) => Some(format!(
                "{name}, I am missing the following permissions: {}",
                format_permission_list(missing)
            )),
            Self::ActorMissing(missing) => Some(format!(
                "{name}, you are missing the following permissions: {}",
                format_permission_list(missing)
            )),
        }
    }
}

/// Checks command requirements against the bot and the invoking member.
pub struct PermissionGate;

impl PermissionGate {
    /// Runs the checks in order, stopping at the first failure.
    ///
    /// 1. The bot must hold the command's agent permissions.
    /// 2. If the guild overrides the command's permissions, the member must
    ///    hold the override set, and the command's own actor set is not consulted.
    /// 3. Otherwise the member must hold the command's actor permissions.
    #[must_use]
    pub fn check(
        descriptor: &CommandDescriptor,
        actor: &MemberInfo,
        agent: &MemberInfo,
        config: &GuildConfig,
    ) -> PermissionOutcome {
        let agent_missing = agent.permissions.missing(&descriptor.agent_permissions);
        if !agent_missing.is_empty() {
            debug!(command = %descriptor.name, ?agent_missing, "Bot lacks command permissions");
            return PermissionOutcome::AgentMissing(agent_missing);
        }

        let required = config
            .permission_override(&descriptor.name)
            .unwrap_or(&descriptor.actor_permissions);
        let actor_missing = actor.permissions.missing(required);
        if !actor_missing.is_empty() {
            debug!(command = %descriptor.name, user = %actor.id, ?actor_missing, "Member lacks command permissions");
            return PermissionOutcome::ActorMissing(actor_missing);
        }

        PermissionOutcome::Granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_common::{PermissionSet, UserId};

    fn member(permissions: impl Into<PermissionSet>) -> MemberInfo {
        MemberInfo {
            permissions: permissions.into(),
            ..MemberInfo::new(UserId(1), "alice")
        }
    }

    fn ban_descriptor() -> CommandDescriptor {
        CommandDescriptor::new("ban")
            .actor_permissions([PermissionFlag::BanMembers])
            .agent_permissions([PermissionFlag::BanMembers, PermissionFlag::EmbedLinks])
    }

    #[test]
    fn test_agent_failure_takes_precedence() {
        let outcome = PermissionGate::check(
            &ban_descriptor(),
            &member(PermissionSet::new()),
            &member([PermissionFlag::BanMembers]),
            &GuildConfig::default(),
        );

        assert_eq!(outcome, PermissionOutcome::AgentMissing(vec![PermissionFlag::EmbedLinks]));
        assert_eq!(
            outcome.message("alice").unwrap(),
            "alice, I am missing the following permissions: `Embed Links`"
        );
    }

    #[test]
    fn test_override_replaces_static_requirement() {
        let agent = member([PermissionFlag::BanMembers, PermissionFlag::EmbedLinks]);
        let mut config = GuildConfig::default();
        config
            .permission_overrides
            .insert("ban".into(), [PermissionFlag::KickMembers].into());

        let with_kick = PermissionGate::check(&ban_descriptor(), &member([PermissionFlag::KickMembers]), &agent, &config);
        assert!(with_kick.is_granted());

        let with_ban = PermissionGate::check(&ban_descriptor(), &member([PermissionFlag::BanMembers]), &agent, &config);
        assert_eq!(with_ban, PermissionOutcome::ActorMissing(vec![PermissionFlag::KickMembers]));
        assert_eq!(
            with_ban.message("alice").unwrap(),
            "alice, you are missing the following permissions: `Kick Members`"
        );
    }

    #[test]
    fn test_static_requirement_and_administrator() {
        let agent = member([PermissionFlag::Administrator]);
        let config = GuildConfig::default();

        assert_eq!(
            PermissionGate::check(&ban_descriptor(), &member(PermissionSet::new()), &agent, &config),
            PermissionOutcome::ActorMissing(vec![PermissionFlag::BanMembers])
        );
        assert!(PermissionGate::check(&ban_descriptor(), &member([PermissionFlag::Administrator]), &agent, &config)
            .is_granted());
    }
}
