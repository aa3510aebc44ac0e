//! Platform snapshots handed to the dispatch pipeline.
//!
//! The gateway adapter fills these from its cache before dispatching, so the
//! pipeline never performs lookups of its own.

use herald_common::{ChannelId, ChannelKind, GuildId, PermissionSet, RoleId, UserId};
use std::collections::HashMap;

/// Who sent a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// User id.
    pub id: UserId,
    /// Username used when addressing the author in replies.
    pub name: String,
    /// Whether the author is an automated account.
    pub bot: bool,
}

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name.
    pub filename: String,
    /// Download URL.
    pub url: String,
}

impl Attachment {
    /// Whether the file name or URL ends with `extension` (with or without
    /// the leading dot), ignoring case.
    #[must_use]
    pub fn has_extension(&self, extension: &str) -> bool {
        let suffix = format!(".{}", extension.trim_start_matches('.').to_lowercase());
        self.filename.to_lowercase().ends_with(&suffix) || self.url.to_lowercase().ends_with(&suffix)
    }
}

/// An inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Sender.
    pub author: Author,
    /// Guild the message was sent in, absent for direct messages.
    pub guild_id: Option<GuildId>,
    /// Channel the message was sent in.
    pub channel_id: ChannelId,
    /// Kind of that channel.
    pub channel_kind: ChannelKind,
    /// Raw text.
    pub content: String,
    /// Attached files, in upload order.
    pub attachments: Vec<Attachment>,
}

impl InboundMessage {
    /// A guild text message without attachments.
    pub fn text(author: Author, guild_id: GuildId, channel_id: ChannelId, content: impl Into<String>) -> Self {
        Self {
            author,
            guild_id: Some(guild_id),
            channel_id,
            channel_kind: ChannelKind::Text,
            content: content.into(),
            attachments: Vec::new(),
        }
    }
}

/// A guild member as seen by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    /// User id.
    pub id: UserId,
    /// Nickname or username.
    pub display_name: String,
    /// Whether the member is an automated account.
    pub bot: bool,
    /// Assigned roles.
    pub roles: Vec<RoleId>,
    /// Effective permissions. Guild-level for members; for the agent, the
    /// permissions it holds in the channel being dispatched.
    pub permissions: PermissionSet,
}

impl MemberInfo {
    /// A human member with no roles and no permissions.
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            bot: false,
            roles: Vec::new(),
            permissions: PermissionSet::new(),
        }
    }
}

/// A guild role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    /// Role id.
    pub id: RoleId,
    /// Display name.
    pub name: String,
    /// Position in the role hierarchy; higher is more senior.
    pub position: u16,
    /// Whether the role is managed by an integration (bot roles).
    pub managed: bool,
}

/// A guild channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    /// Channel id.
    pub id: ChannelId,
    /// Display name.
    pub name: String,
    /// Channel kind.
    pub kind: ChannelKind,
}

/// Everything the pipeline may look up about the guild of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSnapshot {
    /// Guild id.
    pub id: GuildId,
    /// The bot itself.
    pub agent: MemberInfo,
    /// Channels by id.
    pub channels: HashMap<ChannelId, ChannelInfo>,
    /// Roles by id.
    pub roles: HashMap<RoleId, RoleInfo>,
    /// Members by id, the agent included.
    pub members: HashMap<UserId, MemberInfo>,
}

impl GuildSnapshot {
    /// A guild containing only the agent.
    #[must_use]
    pub fn new(id: GuildId, agent: MemberInfo) -> Self {
        let members = HashMap::from([(agent.id, agent.clone())]);
        Self {
            id,
            agent,
            channels: HashMap::new(),
            roles: HashMap::new(),
            members,
        }
    }

    /// Adds a channel.
    #[must_use]
    pub fn with_channel(mut self, channel: ChannelInfo) -> Self {
        self.channels.insert(channel.id, channel);
        self
    }

    /// Adds a role.
    #[must_use]
    pub fn with_role(mut self, role: RoleInfo) -> Self {
        self.roles.insert(role.id, role);
        self
    }

    /// Adds a member.
    #[must_use]
    pub fn with_member(mut self, member: MemberInfo) -> Self {
        self.members.insert(member.id, member);
        self
    }

    /// Looks up a member.
    #[must_use]
    pub fn member(&self, id: UserId) -> Option<&MemberInfo> {
        self.members.get(&id)
    }

    /// Looks up a role.
    #[must_use]
    pub fn role(&self, id: RoleId) -> Option<&RoleInfo> {
        self.roles.get(&id)
    }

    /// Looks up a channel.
    #[must_use]
    pub fn channel(&self, id: ChannelId) -> Option<&ChannelInfo> {
        self.channels.get(&id)
    }

    /// Hierarchy position of a role; unknown roles rank lowest.
    #[must_use]
    pub fn role_rank(&self, id: RoleId) -> u16 {
        self.role(id).map_or(0, |role| role.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_extension_matching() {
        let attachment = Attachment {
            filename: "Avatar.PNG".into(),
            url: "https://cdn.example/attachments/1/Avatar.PNG?size=64".into(),
        };
        assert!(attachment.has_extension("png"));
        assert!(attachment.has_extension(".png"));
        assert!(!attachment.has_extension("gif"));
    }

    #[test]
    fn test_new_guild_contains_agent() {
        let agent = MemberInfo::new(UserId(1), "herald");
        let guild = GuildSnapshot::new(GuildId(2), agent.clone());
        assert_eq!(guild.member(UserId(1)), Some(&agent));
        assert_eq!(guild.role_rank(RoleId(3)), 0);
    }
}
