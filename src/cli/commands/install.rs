//! The default action: check tooling, then run the install pipeline.

use crate::error::Result;
use crate::requirements::RequirementsInstaller;
use crate::runner::RunOutcome;
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult};
use crate::cli::args::InstallArgs;

/// The install command implementation.
pub struct InstallCommand<'c> {
    context: &'c CommandContext<'c>,
    args: InstallArgs,
}

impl<'c> InstallCommand<'c> {
    /// Create a new install command.
    pub fn new(context: &'c CommandContext<'c>, args: InstallArgs) -> Self {
        Self { context, args }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.context.config;
        ui.show_header(&format!("update-discord v{}", env!("CARGO_PKG_VERSION")));

        if !self.args.silent {
            RequirementsInstaller::new(self.context.runner, config.use_sudo())?.ensure(ui)?;
        }

        let show_progress = ui.output_mode() != OutputMode::Quiet;
        let driver = self.context.driver(show_progress)?;
        match driver.run(ui, self.args.force)? {
            RunOutcome::AlreadyInstalled { .. } => {}
            RunOutcome::Installed {
                package,
                archive_removed,
                ..
            } => {
                ui.message(&format!("Package: {}", package.path.display()));
                if !archive_removed {
                    ui.message(&format!("Archive kept in {}", driver.cache().root().display()));
                }
            }
        }

        Ok(CommandResult::success())
    }
}
