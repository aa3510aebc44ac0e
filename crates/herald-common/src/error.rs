//! Error types shared across the Herald workspace

use std::error::Error as StdError;
use thiserror::Error;

type Cause = Box<dyn StdError + Send + Sync>;

/// Result type alias for Herald operations
pub type Result<T> = std::result::Result<T, HeraldError>;

/// Failures outside the dispatch pipeline: start-up, configuration and logging.
///
/// Rejections a user can see (missing permissions, cooldowns, bad arguments)
/// are ordinary outcomes and never travel through this type.
#[derive(Error, Debug)]
pub enum HeraldError {
    /// A configuration value is missing or unusable.
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Cause>,
    },

    /// The tracing subscriber or its file sink could not be set up.
    #[error("Logging error: {message}")]
    Logging {
        /// What failed.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Cause>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HeraldError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a configuration error wrapping its cause
    pub fn config_with_source(msg: impl Into<String>, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a logging error wrapping its cause
    pub fn logging(msg: impl Into<String>, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Logging {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_config_error_display() {
        let error = HeraldError::config("prefix is empty");
        assert_eq!(error.to_string(), "Configuration error: prefix is empty");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_sources_are_chained() {
        let root = io::Error::new(io::ErrorKind::NotFound, "config.yaml");
        let error = HeraldError::config_with_source("cannot read configuration", root);

        let source = error.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("config.yaml"));
    }

    #[test]
    fn test_io_errors_convert() {
        let error: HeraldError = io::Error::new(io::ErrorKind::PermissionDenied, "logs/").into();
        assert!(matches!(error, HeraldError::Io(_)));
        assert!(error.to_string().starts_with("I/O error"));
    }
}
