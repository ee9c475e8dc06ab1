//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::commands::cache::CacheArgs;

/// update-discord - Repackage the Discord tarball as a Debian package.
///
/// Without a subcommand, checks for a new release and, if one is available,
/// downloads, patches, packages and installs it.
#[derive(Debug, Parser)]
#[command(name = "update-discord")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides the user config directory)
    #[arg(short, long, global = true, env = "UPDATE_DISCORD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub install: InstallArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments for the default install action.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Accept every confirmation and skip the tooling check
    #[arg(long)]
    pub silent: bool,

    /// Rebuild and reinstall even if the latest version is installed
    #[arg(long)]
    pub force: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Exit with 1 if a newer release is available, 0 otherwise
    NeedsUpdate,

    /// Manage downloaded archives
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}

impl Cli {
    /// Whether confirmations should be answered by a human.
    pub fn is_interactive(&self) -> bool {
        self.command.is_some() || !self.install.silent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_runs_install() {
        let cli = Cli::parse_from(["update-discord"]);
        assert!(cli.command.is_none());
        assert!(!cli.install.silent);
        assert!(!cli.install.force);
        assert!(cli.is_interactive());
    }

    #[test]
    fn silent_and_force() {
        let cli = Cli::parse_from(["update-discord", "--silent", "--force"]);
        assert!(cli.install.silent);
        assert!(cli.install.force);
        assert!(!cli.is_interactive());
    }

    #[test]
    fn needs_update_subcommand() {
        let cli = Cli::parse_from(["update-discord", "needs-update"]);
        assert!(matches!(cli.command, Some(Commands::NeedsUpdate)));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "update-discord",
            "needs-update",
            "--config",
            "/tmp/c.yml",
            "--debug",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yml")));
        assert!(cli.debug);
    }

    #[test]
    fn completions_shell() {
        let cli = Cli::parse_from(["update-discord", "completions", "zsh"]);
        match cli.command {
            Some(Commands::Completions(args)) => assert_eq!(args.shell, Shell::Zsh),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
