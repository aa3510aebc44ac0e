//! # Herald Bot
//!
//! Discord gateway adapter for the Herald command pipeline.
//!
//! Serenity delivers gateway events; this crate snapshots the cached guild
//! state each message needs, hands it to the dispatcher and sends any reply
//! back to the channel.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod handler;
pub mod snapshot;

pub use bot::*;
pub use error::*;
pub use handler::*;
