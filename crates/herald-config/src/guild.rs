//! Per-guild command settings and their in-memory store.

use crate::defaults::DEFAULT_PREFIX;
use dashmap::DashMap;
use herald_common::{ChannelId, GuildId, PermissionSet, RoleId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Command settings of one guild.
///
/// Configuration commands mutate it through [`GuildConfigStore::update`]; the
/// dispatcher only ever sees an immutable `Arc` snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildConfig {
    /// Prefix that starts a command in this guild.
    pub prefix: String,
    /// Command names muted in this guild.
    pub disabled_commands: HashSet<String>,
    /// Channels in which no command is dispatched.
    pub disabled_channels: HashSet<ChannelId>,
    /// Actor permissions required per command, replacing the command's own.
    pub permission_overrides: HashMap<String, PermissionSet>,
    /// Cooldown in milliseconds per command, per role.
    pub cooldown_overrides: HashMap<String, HashMap<RoleId, u64>>,
    /// Guild-defined alias to command name.
    pub aliases: HashMap<String, String>,
}

impl Default for GuildConfig {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }
}

impl GuildConfig {
    /// Empty settings with the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            disabled_commands: HashSet::new(),
            disabled_channels: HashSet::new(),
            permission_overrides: HashMap::new(),
            cooldown_overrides: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Whether `command` has been muted.
    #[must_use]
    pub fn is_command_disabled(&self, command: &str) -> bool {
        self.disabled_commands.contains(command)
    }

    /// Whether commands are muted in `channel`.
    #[must_use]
    pub fn is_channel_disabled(&self, channel: ChannelId) -> bool {
        self.disabled_channels.contains(&channel)
    }

    /// The actor permission override for `command`, if one is set and non-empty.
    #[must_use]
    pub fn permission_override(&self, command: &str) -> Option<&PermissionSet> {
        self.permission_overrides
            .get(command)
            .filter(|set| !set.is_empty())
    }

    /// Role cooldown overrides (milliseconds) for `command`.
    #[must_use]
    pub fn cooldown_override(&self, command: &str) -> Option<&HashMap<RoleId, u64>> {
        self.cooldown_overrides.get(command)
    }

    /// Command name a guild alias points to.
    #[must_use]
    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Drops `channel` from the muted channels. Returns whether it was muted.
    pub fn remove_channel(&mut self, channel: ChannelId) -> bool {
        self.disabled_channels.remove(&channel)
    }

    /// Drops `role` from every cooldown override, removing commands left
    /// without overrides. Returns whether anything changed.
    pub fn remove_role(&mut self, role: RoleId) -> bool {
        let mut changed = false;
        self.cooldown_overrides.retain(|_, by_role| {
            changed |= by_role.remove(&role).is_some();
            !by_role.is_empty()
        });
        changed
    }

    fn references_role(&self, role: RoleId) -> bool {
        self.cooldown_overrides
            .values()
            .any(|by_role| by_role.contains_key(&role))
    }
}

/// Supplies the configuration snapshot for a guild.
pub trait GuildConfigSource: Send + Sync {
    /// Current settings of `guild_id`.
    fn guild_config(&self, guild_id: GuildId) -> Arc<GuildConfig>;
}

/// In-memory guild configuration store.
///
/// Guilds seen for the first time get default settings, so reads never fail.
#[derive(Debug)]
pub struct GuildConfigStore {
    default_prefix: String,
    guilds: DashMap<GuildId, Arc<GuildConfig>>,
}

impl GuildConfigStore {
    /// Creates an empty store handing out `default_prefix` to new guilds.
    pub fn new(default_prefix: impl Into<String>) -> Self {
        Self {
            default_prefix: default_prefix.into(),
            guilds: DashMap::new(),
        }
    }

    /// Snapshot of a guild's settings, creating defaults on first access.
    pub fn snapshot(&self, guild_id: GuildId) -> Arc<GuildConfig> {
        self.guilds
            .entry(guild_id)
            .or_insert_with(|| Arc::new(GuildConfig::with_prefix(self.default_prefix.as_str())))
            .clone()
    }

    /// Replaces a guild's settings wholesale.
    pub fn insert(&self, guild_id: GuildId, config: GuildConfig) {
        self.guilds.insert(guild_id, Arc::new(config));
    }

    /// Applies `change` to a copy of the guild's settings and publishes the copy.
    ///
    /// Snapshots handed out earlier keep the old settings.
    pub fn update<F>(&self, guild_id: GuildId, change: F) -> Arc<GuildConfig>
    where
        F: FnOnce(&mut GuildConfig),
    {
        let mut entry = self
            .guilds
            .entry(guild_id)
            .or_insert_with(|| Arc::new(GuildConfig::with_prefix(self.default_prefix.as_str())));
        let mut next = GuildConfig::clone(&entry);
        change(&mut next);
        let next = Arc::new(next);
        *entry = Arc::clone(&next);
        next
    }

    /// Forgets a deleted channel. Returns whether the guild's settings changed.
    pub fn forget_channel(&self, guild_id: GuildId, channel_id: ChannelId) -> bool {
        let Some(mut entry) = self.guilds.get_mut(&guild_id) else {
            return false;
        };
        if !entry.is_channel_disabled(channel_id) {
            return false;
        }
        let mut next = GuildConfig::clone(&entry);
        next.remove_channel(channel_id);
        *entry = Arc::new(next);
        debug!(guild = %guild_id, channel = %channel_id, "Removed deleted channel from disabled channels");
        true
    }

    /// Forgets a deleted role. Returns whether the guild's settings changed.
    pub fn forget_role(&self, guild_id: GuildId, role_id: RoleId) -> bool {
        let Some(mut entry) = self.guilds.get_mut(&guild_id) else {
            return false;
        };
        if !entry.references_role(role_id) {
            return false;
        }
        let mut next = GuildConfig::clone(&entry);
        next.remove_role(role_id);
        *entry = Arc::new(next);
        debug!(guild = %guild_id, role = %role_id, "Removed deleted role from cooldown overrides");
        true
    }

    /// Drops everything known about a guild.
    pub fn remove(&self, guild_id: GuildId) -> Option<Arc<GuildConfig>> {
        self.guilds.remove(&guild_id).map(|(_, config)| config)
    }

    /// Number of guilds with settings in memory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guilds.len()
    }

    /// Whether no guild has settings in memory.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guilds.is_empty()
    }
}

impl GuildConfigSource for GuildConfigStore {
    fn guild_config(&self, guild_id: GuildId) -> Arc<GuildConfig> {
        self.snapshot(guild_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_common::PermissionFlag;

    #[test]
    fn test_remove_role_drops_empty_command_entries() {
        let mut config = GuildConfig::default();
        config
            .cooldown_overrides
            .insert("daily".into(), HashMap::from([(RoleId(1), 5_000)]));
        config
            .cooldown_overrides
            .insert("rob".into(), HashMap::from([(RoleId(1), 5_000), (RoleId(2), 9_000)]));

        assert!(config.remove_role(RoleId(1)));
        assert!(!config.cooldown_overrides.contains_key("daily"));
        assert_eq!(config.cooldown_overrides["rob"], HashMap::from([(RoleId(2), 9_000)]));
        assert!(!config.remove_role(RoleId(1)));
    }

    #[test]
    fn test_empty_permission_override_is_ignored() {
        let mut config = GuildConfig::default();
        config
            .permission_overrides
            .insert("ban".into(), PermissionSet::new());
        assert!(config.permission_override("ban").is_none());

        config
            .permission_overrides
            .insert("ban".into(), PermissionSet::from([PermissionFlag::BanMembers]));
        assert!(config.permission_override("ban").is_some());
    }

    #[test]
    fn test_snapshot_creates_defaults_with_store_prefix() {
        let store = GuildConfigStore::new("?");
        let config = store.snapshot(GuildId(7));
        assert_eq!(config.prefix, "?");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_leaves_earlier_snapshots_untouched() {
        let store = GuildConfigStore::new("!");
        let before = store.snapshot(GuildId(7));

        let after = store.update(GuildId(7), |config| config.prefix = ">>".into());

        assert_eq!(before.prefix, "!");
        assert_eq!(after.prefix, ">>");
        assert_eq!(store.snapshot(GuildId(7)).prefix, ">>");
    }

    #[test]
    fn test_forget_channel_only_touches_muted_channels() {
        let store = GuildConfigStore::new("!");
        store.update(GuildId(1), |config| {
            config.disabled_channels.insert(ChannelId(10));
        });

        assert!(!store.forget_channel(GuildId(1), ChannelId(11)));
        assert!(store.forget_channel(GuildId(1), ChannelId(10)));
        assert!(!store.snapshot(GuildId(1)).is_channel_disabled(ChannelId(10)));
        assert!(!store.forget_channel(GuildId(2), ChannelId(10)));
    }
}
