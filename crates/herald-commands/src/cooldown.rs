//! Cooldown ledger for rate limiting command usage

use crate::context::{GuildSnapshot, MemberInfo};
use crate::descriptor::CommandDescriptor;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use herald_common::{GuildId, UserId};
use herald_config::GuildConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Bucket a cooldown is tracked in.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CooldownScope {
    /// Shared across every guild.
    Global,
    /// Tracked separately per guild.
    Guild(GuildId),
}

impl CooldownScope {
    /// Scope a command's cooldown lives in when used in `guild_id`.
    #[must_use]
    pub const fn for_command(descriptor: &CommandDescriptor, guild_id: GuildId) -> Self {
        if descriptor.global_cooldown {
            Self::Global
        } else {
            Self::Guild(guild_id)
        }
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CooldownKey {
    scope: CooldownScope,
    command: String,
    user: UserId,
}

/// Manager for handling command cooldowns
///
/// Each armed entry holds its expiry and is removed when that expiry passes,
/// either by a timer scheduled at arming or by [`CooldownManager::cleanup_expired`].
#[derive(Debug, Default)]
pub struct CooldownManager {
    cooldowns: Arc<DashMap<CooldownKey, Instant>>,
}

impl CooldownManager {
    /// Create a new cooldown manager
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cooldown that applies to `actor` for `descriptor` in a guild.
    ///
    /// A guild override for the command replaces the base cooldown when the
    /// actor holds one of its roles; among several, the highest-ranked role wins
    /// and equal ranks fall back to the higher role id.
    #[must_use]
    pub fn effective_cooldown(
        descriptor: &CommandDescriptor,
        actor: &MemberInfo,
        guild: &GuildSnapshot,
        config: &GuildConfig,
    ) -> Duration {
        let Some(overrides) = config.cooldown_override(&descriptor.name) else {
            return descriptor.cooldown;
        };

        actor
            .roles
            .iter()
            .filter_map(|role| overrides.get(role).map(|millis| (guild.role_rank(*role), *role, *millis)))
            .max_by_key(|(rank, role, _)| (*rank, *role))
            .map_or(descriptor.cooldown, |(_, _, millis)| Duration::from_millis(millis))
    }

    /// Checks the cooldown of `user` on `command` and arms it when clear.
    ///
    /// Returns the remaining time while the user is still cooling down, in
    /// which case the stored expiry is left untouched. A zero cooldown is
    /// never tracked. The check and the arm happen under the same entry lock.
    pub fn check_and_arm(
        &self,
        scope: CooldownScope,
        command: &str,
        user: UserId,
        cooldown: Duration,
    ) -> Option<Duration> {
        if cooldown.is_zero() {
            return None;
        }

        let now = Instant::now();
        let Some(expires_at) = now.checked_add(cooldown) else {
            warn!(command, ?cooldown, "Cooldown too large to track, skipping");
            return None;
        };
        let key = CooldownKey {
            scope,
            command: command.to_string(),
            user,
        };

        match self.cooldowns.entry(key.clone()) {
            Entry::Occupied(entry) if now < *entry.get() => {
                return Some(*entry.get() - now);
            }
            Entry::Occupied(mut entry) => {
                entry.insert(expires_at);
            }
            Entry::Vacant(entry) => {
                entry.insert(expires_at);
            }
        }

        debug!(command, user = %user, ?scope, ?cooldown, "Armed cooldown");
        self.schedule_expiry(key, expires_at);
        None
    }

    /// Time left on a cooldown, if one is active.
    #[must_use]
    pub fn remaining(&self, scope: CooldownScope, command: &str, user: UserId) -> Option<Duration> {
        let key = CooldownKey {
            scope,
            command: command.to_string(),
            user,
        };
        let expires_at = *self.cooldowns.get(&key)?;
        let now = Instant::now();
        (now < expires_at).then(|| expires_at - now)
    }

    /// Removes every entry whose expiry has passed. Returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.cooldowns.len();
        self.cooldowns.retain(|_, expires_at| *expires_at > now);
        before.saturating_sub(self.cooldowns.len())
    }

    /// Clear all cooldowns for a specific command
    pub fn clear_command(&self, command: &str) -> usize {
        let before = self.cooldowns.len();
        self.cooldowns.retain(|key, _| key.command != command);
        let removed = before.saturating_sub(self.cooldowns.len());
        debug!(command, removed, "Cleared command cooldowns");
        removed
    }

    /// Clear all cooldowns for a specific user
    pub fn clear_user(&self, user: UserId) -> usize {
        let before = self.cooldowns.len();
        self.cooldowns.retain(|key, _| key.user != user);
        let removed = before.saturating_sub(self.cooldowns.len());
        debug!(user = %user, removed, "Cleared user cooldowns");
        removed
    }

    /// Number of tracked cooldown entries
    #[must_use]
    pub fn active_cooldowns(&self) -> usize {
        self.cooldowns.len()
    }

    // Deletes only the expiry it was scheduled for; a later re-arm survives.
    fn schedule_expiry(&self, key: CooldownKey, expires_at: Instant) {
        let Ok(handle) = Handle::try_current() else {
            debug!("No runtime available, leaving cooldown expiry to the sweeper");
            return;
        };

        let cooldowns = Arc::clone(&self.cooldowns);
        handle.spawn(async move {
            tokio::time::sleep_until(expires_at).await;
            cooldowns.remove_if(&key, |_, armed| *armed == expires_at);
        });
    }
}

/// Periodically sweeps expired cooldown entries.
pub fn spawn_cooldown_sweeper(manager: Arc<CooldownManager>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval.tick().await;

        loop {
            interval.tick().await;
            let removed = manager.cleanup_expired();
            if removed > 0 {
                debug!(removed, "Swept expired cooldowns");
            }
        }
    })
}
