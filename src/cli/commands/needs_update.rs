//! `update-discord needs-update`: resolve only, answer through the exit code.

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// Exit code when a newer release is available.
pub const UPDATE_AVAILABLE: i32 = 1;

/// The needs-update command implementation.
pub struct NeedsUpdateCommand<'c> {
    context: &'c CommandContext<'c>,
}

impl<'c> NeedsUpdateCommand<'c> {
    /// Create a new needs-update command.
    pub fn new(context: &'c CommandContext<'c>) -> Self {
        Self { context }
    }
}

impl Command for NeedsUpdateCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let check = self.context.driver(false)?.needs_update()?;

        ui.output(&check.latest.download_url);
        ui.output(&format!("Update needed: {}", check.update_needed()));

        Ok(if check.update_needed() {
            CommandResult::answer(UPDATE_AVAILABLE)
        } else {
            CommandResult::success()
        })
    }
}
