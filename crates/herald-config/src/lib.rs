//! # Herald Config
//!
//! Configuration management for the Herald bot.
//!
//! Two kinds of configuration live here: the process-wide [`BotConfig`]
//! (token, default prefix, logging, block list), loaded once at start-up and
//! cached behind `arc-swap`, and the per-guild [`GuildConfig`] that the
//! dispatcher reads as an immutable snapshot for every message.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod guild;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use guild::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
