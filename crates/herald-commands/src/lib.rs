//! # Herald Commands
//!
//! The command dispatch pipeline of the Herald bot.
//!
//! A message travels through [`Dispatcher::dispatch`]: prefix and name
//! resolution, guild mutes, the [`PermissionGate`], the [`CooldownManager`]
//! and finally the [`arguments`] validator, before the resolved [`Command`]
//! is invoked. Everything the pipeline needs about the platform arrives as
//! plain snapshots from [`context`], so it can be driven without a gateway.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod arguments;
pub mod context;
pub mod cooldown;
pub mod descriptor;
pub mod dispatcher;
pub mod duration;
pub mod framework;
pub mod help;
pub mod mention;
pub mod permissions;
pub mod ping;
pub mod registry;
pub mod uptime;

pub use arguments::{validate, ArgumentKind, ArgumentSpec, FlagValue, Flags, SchemaError, Validation, ValidationContext};
pub use context::{Attachment, Author, ChannelInfo, GuildSnapshot, InboundMessage, MemberInfo, RoleInfo};
pub use cooldown::{spawn_cooldown_sweeper, CooldownManager, CooldownScope};
pub use descriptor::CommandDescriptor;
pub use dispatcher::{DispatchOutcome, Dispatcher, IgnoreReason, RejectReason};
pub use duration::{parse_duration, DurationError};
pub use framework::*;
pub use permissions::{PermissionGate, PermissionOutcome};
pub use registry::{Command, CommandRegistry, Invocation, RegistryError, NO_CATEGORY};
