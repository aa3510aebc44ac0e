//! `uptime` command

use crate::descriptor::CommandDescriptor;
use crate::registry::{Command, Invocation};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use herald_common::{format_duration, format_timestamp};

/// Reports how long the bot has been running.
pub struct Uptime {
    descriptor: CommandDescriptor,
    started_at: DateTime<Utc>,
}

impl Uptime {
    /// Create the command for a process started at `started_at`
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            descriptor: CommandDescriptor::new("uptime")
                .aliases(["up"])
                .category("Utility")
                .description("Shows how long the bot has been online")
                .usage("uptime"),
            started_at,
        }
    }

    fn message(&self, now: DateTime<Utc>) -> String {
        let elapsed = (now - self.started_at).to_std().unwrap_or_default();
        let text = format_duration(elapsed);
        let text = if text.is_empty() { "0s".to_string() } else { text };
        format!(
            "I have been online for `{text}` (since {}).",
            format_timestamp(self.started_at)
        )
    }
}

#[async_trait]
impl Command for Uptime {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, _invocation: Invocation) -> anyhow::Result<Option<String>> {
        Ok(Some(self.message(Utc::now())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_message_formats_elapsed_time() {
        let started_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let uptime = Uptime::new(started_at);

        assert_eq!(
            uptime.message(started_at + chrono::Duration::seconds(3_725)),
            "I have been online for `1h 2m 5s` (since 2024-01-01 12:00:00 UTC)."
        );
        assert_eq!(
            uptime.message(started_at),
            "I have been online for `0s` (since 2024-01-01 12:00:00 UTC)."
        );
    }
}
