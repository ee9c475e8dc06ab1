//! Command-line interface for update-discord.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, InstallArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
