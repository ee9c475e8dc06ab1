//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cache::{ArchiveCache, HttpDownloader};
use crate::cli::args::{Cli, Commands};
use crate::config::Config;
use crate::error::Result;
use crate::http::build_client;
use crate::runner::InstallDriver;
use crate::shell::ProcessRunner;
use crate::ui::UserInterface;
use crate::version::VersionResolver;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use.
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// A successful run that reports its answer through the exit code.
    pub fn answer(exit_code: i32) -> Self {
        Self {
            success: true,
            exit_code,
        }
    }
}

/// Shared state every command is built from.
pub struct CommandContext<'a> {
    pub config: &'a Config,
    pub runner: &'a dyn ProcessRunner,
}

impl<'a> CommandContext<'a> {
    /// Archive cache backed by an HTTP downloader.
    pub fn archive_cache(&self, show_progress: bool) -> Result<ArchiveCache> {
        let client = build_client(&self.config.user_agent)?;
        let downloader = HttpDownloader::new(client).with_progress(show_progress);
        Ok(ArchiveCache::new(self.config.cache_dir(), Box::new(downloader)))
    }

    /// Pipeline driver wired to the real network and cache.
    pub fn driver(&self, show_progress: bool) -> Result<InstallDriver<'a>> {
        let client = build_client(&self.config.user_agent)?;
        let resolver = VersionResolver::new(&self.config.endpoint, client)?;
        InstallDriver::new(
            self.config,
            resolver,
            self.archive_cache(show_progress)?,
            self.runner,
        )
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher<'a> {
    context: CommandContext<'a>,
}

impl<'a> CommandDispatcher<'a> {
    /// Create a new dispatcher.
    pub fn new(config: &'a Config, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            context: CommandContext { config, runner },
        }
    }

    /// Dispatch and execute a command.
    ///
    /// Without a subcommand the install pipeline runs.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::NeedsUpdate) => {
                let cmd = super::needs_update::NeedsUpdateCommand::new(&self.context);
                cmd.execute(ui)
            }
            Some(Commands::Cache(args)) => {
                let cmd = super::cache::CacheCommand::new(&self.context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::install::InstallCommand::new(&self.context, cli.install.clone());
                cmd.execute(ui)
            }
        }
    }
}
