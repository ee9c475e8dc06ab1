//! Cache command implementation.
//!
//! Provides `update-discord cache list` and `update-discord cache clear`.

use clap::{Args, Subcommand};

use crate::cache::ArchiveCache;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// List downloaded archives.
    List,
    /// Delete every downloaded archive.
    Clear {
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
}

/// The cache command implementation.
pub struct CacheCommand<'c> {
    context: &'c CommandContext<'c>,
    args: CacheArgs,
}

impl<'c> CacheCommand<'c> {
    /// Create a new cache command.
    pub fn new(context: &'c CommandContext<'c>, args: CacheArgs) -> Self {
        Self { context, args }
    }
}

impl Command for CacheCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cache = self.context.archive_cache(false)?;

        match &self.args.command {
            CacheSubcommand::List => {
                list_cache(&cache, ui)?;
                Ok(CommandResult::success())
            }
            CacheSubcommand::Clear { force } => clear_cache(&cache, *force, ui),
        }
    }
}

fn list_cache(cache: &ArchiveCache, ui: &mut dyn UserInterface) -> Result<()> {
    let archives = cache.list()?;

    if archives.is_empty() {
        ui.message("Cache is empty");
        return Ok(());
    }

    ui.message(&format!(
        "{} cached archives in {}:\n",
        archives.len(),
        cache.root().display()
    ));
    for archive in archives {
        let modified = archive
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        ui.message(&format!(
            "  {}  {}  {}",
            archive.file_name,
            archive.size_display(),
            modified
        ));
    }

    Ok(())
}

fn clear_cache(
    cache: &ArchiveCache,
    force: bool,
    ui: &mut dyn UserInterface,
) -> Result<CommandResult> {
    let count = cache.file_count()?;
    if count == 0 {
        ui.message("Cache is already empty");
        return Ok(CommandResult::success());
    }

    if !force {
        // Unattended UIs accept every question.
        if !ui.is_interactive() {
            ui.error("Refusing to clear the cache without a terminal; pass --force");
            return Ok(CommandResult::failure(2));
        }
        if !ui.ask(&format!("Delete {} cached files?", count), false)? {
            ui.message("Cancelled");
            return Ok(CommandResult::success());
        }
    }

    let cleared = cache.clear()?;
    ui.success(&format!("Cleared {} files", cleared));
    Ok(CommandResult::success())
}
