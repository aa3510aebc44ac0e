//! Platform permission vocabulary shared by configuration and the permission gate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single guild permission.
///
/// Serialized in `SCREAMING_SNAKE_CASE` so stored overrides read the same way
/// the platform documents them (`MANAGE_MESSAGES`, `BAN_MEMBERS`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum PermissionFlag {
    CreateInstantInvite,
    KickMembers,
    BanMembers,
    Administrator,
    ManageChannels,
    ManageGuild,
    AddReactions,
    ViewAuditLog,
    ViewChannel,
    SendMessages,
    SendTtsMessages,
    ManageMessages,
    EmbedLinks,
    AttachFiles,
    ReadMessageHistory,
    MentionEveryone,
    UseExternalEmojis,
    Connect,
    Speak,
    MuteMembers,
    DeafenMembers,
    MoveMembers,
    ChangeNickname,
    ManageNicknames,
    ManageRoles,
    ManageWebhooks,
    ManageGuildExpressions,
    ManageThreads,
    ModerateMembers,
}

impl PermissionFlag {
    /// Every flag, in platform bit order.
    pub const ALL: [Self; 29] = [
        Self::CreateInstantInvite,
        Self::KickMembers,
        Self::BanMembers,
        Self::Administrator,
        Self::ManageChannels,
        Self::ManageGuild,
        Self::AddReactions,
        Self::ViewAuditLog,
        Self::ViewChannel,
        Self::SendMessages,
        Self::SendTtsMessages,
        Self::ManageMessages,
        Self::EmbedLinks,
        Self::AttachFiles,
        Self::ReadMessageHistory,
        Self::MentionEveryone,
        Self::UseExternalEmojis,
        Self::Connect,
        Self::Speak,
        Self::MuteMembers,
        Self::DeafenMembers,
        Self::MoveMembers,
        Self::ChangeNickname,
        Self::ManageNicknames,
        Self::ManageRoles,
        Self::ManageWebhooks,
        Self::ManageGuildExpressions,
        Self::ManageThreads,
        Self::ModerateMembers,
    ];

    /// Title-cased label used in user-facing messages, e.g. `Manage Messages`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreateInstantInvite => "Create Instant Invite",
            Self::KickMembers => "Kick Members",
            Self::BanMembers => "Ban Members",
            Self::Administrator => "Administrator",
            Self::ManageChannels => "Manage Channels",
            Self::ManageGuild => "Manage Guild",
            Self::AddReactions => "Add Reactions",
            Self::ViewAuditLog => "View Audit Log",
            Self::ViewChannel => "View Channel",
            Self::SendMessages => "Send Messages",
            Self::SendTtsMessages => "Send Tts Messages",
            Self::ManageMessages => "Manage Messages",
            Self::EmbedLinks => "Embed Links",
            Self::AttachFiles => "Attach Files",
            Self::ReadMessageHistory => "Read Message History",
            Self::MentionEveryone => "Mention Everyone",
            Self::UseExternalEmojis => "Use External Emojis",
            Self::Connect => "Connect",
            Self::Speak => "Speak",
            Self::MuteMembers => "Mute Members",
            Self::DeafenMembers => "Deafen Members",
            Self::MoveMembers => "Move Members",
            Self::ChangeNickname => "Change Nickname",
            Self::ManageNicknames => "Manage Nicknames",
            Self::ManageRoles => "Manage Roles",
            Self::ManageWebhooks => "Manage Webhooks",
            Self::ManageGuildExpressions => "Manage Guild Expressions",
            Self::ManageThreads => "Manage Threads",
            Self::ModerateMembers => "Moderate Members",
        }
    }
}

impl fmt::Display for PermissionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An ordered set of permission flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<PermissionFlag>);

impl PermissionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set holds no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of flags in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `flag` is present.
    #[must_use]
    pub fn contains(&self, flag: PermissionFlag) -> bool {
        self.0.contains(&flag)
    }

    /// Adds a flag, returning whether it was newly inserted.
    pub fn insert(&mut self, flag: PermissionFlag) -> bool {
        self.0.insert(flag)
    }

    /// Iterates flags in platform bit order.
    pub fn iter(&self) -> impl Iterator<Item = PermissionFlag> + '_ {
        self.0.iter().copied()
    }

    /// Flags of `required` this set does not grant.
    ///
    /// `Administrator` grants everything, so an administrator never misses a flag.
    #[must_use]
    pub fn missing(&self, required: &Self) -> Vec<PermissionFlag> {
        if self.contains(PermissionFlag::Administrator) {
            return Vec::new();
        }
        required.0.difference(&self.0).copied().collect()
    }

    /// Whether every flag of `required` is granted.
    #[must_use]
    pub fn satisfies(&self, required: &Self) -> bool {
        self.missing(required).is_empty()
    }
}

impl FromIterator<PermissionFlag> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = PermissionFlag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[PermissionFlag; N]> for PermissionSet {
    fn from(flags: [PermissionFlag; N]) -> Self {
        flags.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reports_only_absent_flags() {
        let granted = PermissionSet::from([PermissionFlag::SendMessages, PermissionFlag::EmbedLinks]);
        let required = PermissionSet::from([
            PermissionFlag::SendMessages,
            PermissionFlag::ManageMessages,
            PermissionFlag::BanMembers,
        ]);

        assert_eq!(
            granted.missing(&required),
            vec![PermissionFlag::BanMembers, PermissionFlag::ManageMessages]
        );
        assert!(!granted.satisfies(&required));
    }

    #[test]
    fn test_administrator_satisfies_everything() {
        let granted = PermissionSet::from([PermissionFlag::Administrator]);
        let required = PermissionFlag::ALL.into_iter().collect::<PermissionSet>();

        assert!(granted.satisfies(&required));
    }

    #[test]
    fn test_empty_requirement_always_satisfied() {
        assert!(PermissionSet::new().satisfies(&PermissionSet::new()));
    }

    #[test]
    fn test_flags_serialize_in_platform_spelling() {
        let set = PermissionSet::from([PermissionFlag::ManageMessages, PermissionFlag::KickMembers]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["KICK_MEMBERS","MANAGE_MESSAGES"]"#);

        let parsed: PermissionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
    }
}
