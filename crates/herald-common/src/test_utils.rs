//! Test utilities and shared test helpers for Herald.
//!
//! Enabled for this crate's own tests and, through the `testing` feature,
//! for the tests of every other crate in the workspace.

use crate::types::{ChannelId, GuildId, RoleId, UserId};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Discord-related identifier fixtures.
pub mod discord_fixtures {
    use super::{ChannelId, GuildId, RoleId, UserId};

    /// A test guild ID.
    #[must_use]
    pub const fn test_guild_id() -> GuildId {
        GuildId(111_111_111_111_111_111)
    }

    /// A test channel ID.
    #[must_use]
    pub const fn test_channel_id() -> ChannelId {
        ChannelId(123_456_789_012_345_678)
    }

    /// A test user ID.
    #[must_use]
    pub const fn test_user_id() -> UserId {
        UserId(987_654_321_098_765_432)
    }

    /// The bot's own user ID in fixtures.
    #[must_use]
    pub const fn test_agent_id() -> UserId {
        UserId(555_555_555_555_555_555)
    }

    /// A test role ID.
    #[must_use]
    pub const fn test_role_id() -> RoleId {
        RoleId(222_222_222_222_222_222)
    }

    /// Create multiple test user IDs.
    #[must_use]
    pub fn test_user_ids(count: usize) -> Vec<UserId> {
        (0..count as u64).map(|i| UserId(100_000_000_000_000_000 + i)).collect()
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use super::UserId;
    use proptest::prelude::*;

    /// Strategy for generating valid Discord user IDs.
    pub fn user_id_strategy() -> impl Strategy<Value = UserId> {
        (100_000_000_000_000_000_u64..=999_999_999_999_999_999_u64).prop_map(UserId)
    }

    /// Strategy for short whitespace-free tokens as users type them.
    pub fn token_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z0-9_\-]{1,12}"
    }
}
