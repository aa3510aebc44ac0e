//! # Herald Common
//!
//! Shared types, utilities, and common functionality for the Herald bot.
//!
//! This crate provides the identifier newtypes, the permission vocabulary,
//! the workspace error type, logging bootstrap and the human-readable
//! formatting helpers used by every other crate in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod permissions;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{HeraldError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use permissions::{PermissionFlag, PermissionSet};
pub use types::*;
pub use utils::*;
