//! Application-wide error types using thiserror.

use herald_commands::RegistryError;
use herald_common::HeraldError;
use herald_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shared infrastructure error, such as logging setup.
    #[error(transparent)]
    Common(#[from] HeraldError),

    /// The command registry rejected a command.
    #[error("Command registration error: {0}")]
    Registry(#[from] RegistryError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
