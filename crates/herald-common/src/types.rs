//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the raw snowflake value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

snowflake!(
    /// A Discord user ID.
    UserId
);

snowflake!(
    /// A Discord channel ID.
    ChannelId
);

snowflake!(
    /// A Discord guild (server) ID.
    GuildId
);

snowflake!(
    /// A Discord role ID.
    RoleId
);

/// Kind of a guild channel, as far as command arguments care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Ordinary text channel.
    Text,
    /// Voice channel.
    Voice,
    /// Category grouping other channels.
    Category,
    /// Announcement channel.
    News,
    /// Stage channel.
    Stage,
    /// Forum channel.
    Forum,
    /// Thread inside a text or forum channel.
    Thread,
    /// Direct message channel.
    Private,
    /// Anything the gateway reports that is none of the above.
    Other,
}

impl ChannelKind {
    /// Whether prefix commands are accepted in this kind of channel.
    #[must_use]
    pub const fn accepts_commands(self) -> bool {
        matches!(self, Self::Text)
    }
}
