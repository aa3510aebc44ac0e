//! Conversion of serenity's cached models into dispatch snapshots.
//!
//! Everything here runs synchronously against the cache so no cache guard is
//! ever held across an await point.

use herald_commands::{Attachment, Author, ChannelInfo, GuildSnapshot, InboundMessage, MemberInfo, RoleInfo};
use herald_common::{ChannelKind, PermissionFlag, PermissionSet};
use regex::Regex;
use serenity::all::{Cache, ChannelId, ChannelType, Guild, GuildChannel, Member, Message, Permissions, Role, RoleId, UserId};
use std::sync::LazyLock;

/// Bare ids in message text that may name members (mentions included).
static USER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{17,20}").expect("Invalid user id regex pattern"));

const PERMISSION_TABLE: [(PermissionFlag, Permissions); 29] = [
    (PermissionFlag::CreateInstantInvite, Permissions::CREATE_INSTANT_INVITE),
    (PermissionFlag::KickMembers, Permissions::KICK_MEMBERS),
    (PermissionFlag::BanMembers, Permissions::BAN_MEMBERS),
    (PermissionFlag::Administrator, Permissions::ADMINISTRATOR),
    (PermissionFlag::ManageChannels, Permissions::MANAGE_CHANNELS),
    (PermissionFlag::ManageGuild, Permissions::MANAGE_GUILD),
    (PermissionFlag::AddReactions, Permissions::ADD_REACTIONS),
    (PermissionFlag::ViewAuditLog, Permissions::VIEW_AUDIT_LOG),
    (PermissionFlag::ViewChannel, Permissions::VIEW_CHANNEL),
    (PermissionFlag::SendMessages, Permissions::SEND_MESSAGES),
    (PermissionFlag::SendTtsMessages, Permissions::SEND_TTS_MESSAGES),
    (PermissionFlag::ManageMessages, Permissions::MANAGE_MESSAGES),
    (PermissionFlag::EmbedLinks, Permissions::EMBED_LINKS),
    (PermissionFlag::AttachFiles, Permissions::ATTACH_FILES),
    (PermissionFlag::ReadMessageHistory, Permissions::READ_MESSAGE_HISTORY),
    (PermissionFlag::MentionEveryone, Permissions::MENTION_EVERYONE),
    (PermissionFlag::UseExternalEmojis, Permissions::USE_EXTERNAL_EMOJIS),
    (PermissionFlag::Connect, Permissions::CONNECT),
    (PermissionFlag::Speak, Permissions::SPEAK),
    (PermissionFlag::MuteMembers, Permissions::MUTE_MEMBERS),
    (PermissionFlag::DeafenMembers, Permissions::DEAFEN_MEMBERS),
    (PermissionFlag::MoveMembers, Permissions::MOVE_MEMBERS),
    (PermissionFlag::ChangeNickname, Permissions::CHANGE_NICKNAME),
    (PermissionFlag::ManageNicknames, Permissions::MANAGE_NICKNAMES),
    (PermissionFlag::ManageRoles, Permissions::MANAGE_ROLES),
    (PermissionFlag::ManageWebhooks, Permissions::MANAGE_WEBHOOKS),
    (PermissionFlag::ManageGuildExpressions, Permissions::MANAGE_GUILD_EXPRESSIONS),
    (PermissionFlag::ManageThreads, Permissions::MANAGE_THREADS),
    (PermissionFlag::ModerateMembers, Permissions::MODERATE_MEMBERS),
];

/// Translates gateway permission bits into the shared vocabulary.
#[must_use]
pub fn permission_set(permissions: Permissions) -> PermissionSet {
    PERMISSION_TABLE
        .iter()
        .filter(|(_, bits)| permissions.contains(*bits))
        .map(|(flag, _)| *flag)
        .collect()
}

/// Translates a gateway channel type.
#[must_use]
pub fn channel_kind(kind: ChannelType) -> ChannelKind {
    match kind {
        ChannelType::Text => ChannelKind::Text,
        ChannelType::Voice => ChannelKind::Voice,
        ChannelType::Category => ChannelKind::Category,
        ChannelType::News => ChannelKind::News,
        ChannelType::Stage => ChannelKind::Stage,
        ChannelType::Forum => ChannelKind::Forum,
        ChannelType::NewsThread | ChannelType::PublicThread | ChannelType::PrivateThread => ChannelKind::Thread,
        ChannelType::Private => ChannelKind::Private,
        _ => ChannelKind::Other,
    }
}

/// Non-zero ids that appear in `content`, in order of appearance.
#[must_use]
pub fn referenced_user_ids(content: &str) -> Vec<u64> {
    USER_ID_PATTERN
        .find_iter(content)
        .filter_map(|m| m.as_str().parse::<u64>().ok())
        .filter(|id| *id != 0)
        .collect()
}

/// Builds the message and guild snapshots the dispatcher needs.
///
/// The guild snapshot is `None` for direct messages and for guilds, or bot
/// members, missing from the cache.
pub fn capture(cache: &Cache, message: &Message) -> (InboundMessage, Option<GuildSnapshot>) {
    let agent_id = cache.current_user().id;
    let guild = message.guild_id.and_then(|id| cache.guild(id));

    let channel_kind = match (message.guild_id, guild.as_deref()) {
        (None, _) => ChannelKind::Private,
        (Some(_), Some(guild)) => guild_channel_kind(guild, message.channel_id),
        (Some(_), None) => ChannelKind::Other,
    };

    let inbound = InboundMessage {
        author: Author {
            id: message.author.id.get().into(),
            name: message.author.name.clone(),
            bot: message.author.bot,
        },
        guild_id: message.guild_id.map(|id| id.get().into()),
        channel_id: message.channel_id.get().into(),
        channel_kind,
        content: message.content.clone(),
        attachments: message
            .attachments
            .iter()
            .map(|attachment| Attachment {
                filename: attachment.filename.clone(),
                url: attachment.url.clone(),
            })
            .collect(),
    };

    let snapshot = guild
        .as_deref()
        .and_then(|guild| guild_snapshot(guild, message, agent_id));
    (inbound, snapshot)
}

fn guild_channel_kind(guild: &Guild, channel_id: ChannelId) -> ChannelKind {
    if let Some(channel) = guild.channels.get(&channel_id) {
        return channel_kind(channel.kind);
    }
    guild
        .threads
        .iter()
        .find(|thread| thread.id == channel_id)
        .map_or(ChannelKind::Other, |thread| channel_kind(thread.kind))
}

fn guild_snapshot(guild: &Guild, message: &Message, agent_id: UserId) -> Option<GuildSnapshot> {
    let agent_member = guild.members.get(&agent_id)?;
    let agent_permissions = match guild.channels.get(&message.channel_id) {
        Some(channel) => guild.user_permissions_in(channel, agent_member),
        None => guild_permissions(guild, agent_id, &agent_member.roles),
    };
    let agent = MemberInfo {
        permissions: permission_set(agent_permissions),
        ..member_info(agent_member)
    };

    let mut snapshot = GuildSnapshot::new(guild.id.get().into(), agent);
    for channel in guild.channels.values() {
        snapshot = snapshot.with_channel(channel_info(channel));
    }
    for role in guild.roles.values() {
        snapshot = snapshot.with_role(role_info(role));
    }

    if let Some(actor) = actor_info(guild, message) {
        snapshot = snapshot.with_member(actor);
    }
    for id in referenced_user_ids(&message.content) {
        let user_id = UserId::new(id);
        if user_id == agent_id {
            continue;
        }
        if let Some(member) = guild.members.get(&user_id) {
            snapshot = snapshot.with_member(member_with_permissions(guild, member));
        }
    }

    Some(snapshot)
}

// The cache may not hold the author; the partial member on the message
// still carries the roles needed for guild permissions.
fn actor_info(guild: &Guild, message: &Message) -> Option<MemberInfo> {
    if let Some(member) = guild.members.get(&message.author.id) {
        return Some(member_with_permissions(guild, member));
    }

    let partial = message.member.as_deref()?;
    Some(MemberInfo {
        id: message.author.id.get().into(),
        display_name: partial
            .nick
            .clone()
            .unwrap_or_else(|| message.author.name.clone()),
        bot: message.author.bot,
        roles: partial.roles.iter().map(|role| role.get().into()).collect(),
        permissions: permission_set(guild_permissions(guild, message.author.id, &partial.roles)),
    })
}

fn member_with_permissions(guild: &Guild, member: &Member) -> MemberInfo {
    MemberInfo {
        permissions: permission_set(guild_permissions(guild, member.user.id, &member.roles)),
        ..member_info(member)
    }
}

fn member_info(member: &Member) -> MemberInfo {
    MemberInfo {
        id: member.user.id.get().into(),
        display_name: member.display_name().to_string(),
        bot: member.user.bot,
        roles: member.roles.iter().map(|role| role.get().into()).collect(),
        permissions: PermissionSet::new(),
    }
}

fn guild_permissions(guild: &Guild, user_id: UserId, roles: &[RoleId]) -> Permissions {
    if user_id == guild.owner_id {
        return Permissions::all();
    }

    let everyone = RoleId::new(guild.id.get());
    let permissions = std::iter::once(&everyone)
        .chain(roles)
        .filter_map(|id| guild.roles.get(id))
        .fold(Permissions::empty(), |acc, role| acc | role.permissions);

    if permissions.contains(Permissions::ADMINISTRATOR) {
        Permissions::all()
    } else {
        permissions
    }
}

fn channel_info(channel: &GuildChannel) -> ChannelInfo {
    ChannelInfo {
        id: channel.id.get().into(),
        name: channel.name.clone(),
        kind: channel_kind(channel.kind),
    }
}

fn role_info(role: &Role) -> RoleInfo {
    RoleInfo {
        id: role.id.get().into(),
        name: role.name.clone(),
        position: role.position,
        managed: role.managed,
    }
}
