//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Running without a subcommand
//! performs the install pipeline.

pub mod cache;
pub mod completions;
pub mod dispatcher;
pub mod install;
pub mod needs_update;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
