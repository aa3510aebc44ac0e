//! `ping` command

use crate::descriptor::CommandDescriptor;
use crate::registry::{Command, Invocation};
use async_trait::async_trait;
use std::time::Duration;

/// Replies with "Pong!".
pub struct Ping {
    descriptor: CommandDescriptor,
}

impl Ping {
    /// Create the command
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: CommandDescriptor::new("ping")
                .category("Utility")
                .description("Checks that the bot is responding")
                .usage("ping")
                .cooldown(Duration::from_secs(3))
                .cannot_disable(),
        }
    }
}

impl Default for Ping {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for Ping {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, _invocation: Invocation) -> anyhow::Result<Option<String>> {
        Ok(Some("Pong!".to_string()))
    }
}
