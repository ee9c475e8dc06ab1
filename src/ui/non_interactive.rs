//! Non-interactive UI for `--silent` runs and schedulers.

use tracing::debug;

use crate::error::Result;

use super::{Confirmer, NoopSpinner, OutputMode, SpinnerHandle, Theme, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Every confirmation is accepted. Spinners degrade to plain status lines.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: Theme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: Theme::plain(),
        }
    }
}

impl Confirmer for NonInteractiveUI {
    fn ask(&mut self, question: &str, _default: bool) -> Result<bool> {
        debug!("Auto-accepting: {}", question);
        Ok(true)
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn output(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() {
            println!("{}", message);
        }
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_header(title));
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
