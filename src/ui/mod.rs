//! User interaction: confirmations, messages and spinners.
//!
//! This module provides:
//! - [`Confirmer`], the single confirmation capability injected into the pipeline
//! - [`UserInterface`] trait for user-facing output
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for `--silent` runs (accepts every confirmation)
//! - [`MockUI`], [`AlwaysAccept`] and [`AlwaysReject`] for tests
//!
//! # Example
//!
//! ```
//! use update_discord::ui::{create_ui, Confirmer, OutputMode};
//!
//! // Non-interactive mode accepts every confirmation
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! assert!(ui.ask("Install discord-electron?", false).unwrap());
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_confirm;
pub use spinner::{download_bar, ProgressSpinner};
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, Theme};

use crate::error::{RepackError, Result};

/// Capability for yes/no confirmations.
pub trait Confirmer {
    /// Ask a yes/no question; `default` is the answer for a bare Enter.
    fn ask(&mut self, question: &str, default: bool) -> Result<bool>;
}

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface: Confirmer {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Print a command's result; shown even in quiet mode.
    fn output(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Check if a human is answering the confirmations.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// Spinner that draws nothing.
pub struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, _msg: &str) {}
    fn finish_error(&mut self, _msg: &str) {}
}

/// Confirmer that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAccept;

impl Confirmer for AlwaysAccept {
    fn ask(&mut self, _question: &str, _default: bool) -> Result<bool> {
        Ok(true)
    }
}

/// Confirmer that rejects everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReject;

impl Confirmer for AlwaysReject {
    fn ask(&mut self, _question: &str, _default: bool) -> Result<bool> {
        Ok(false)
    }
}

/// Ask a question and turn "no" into [`RepackError::UserDeclined`].
pub fn confirm_or_abort<C: Confirmer + ?Sized>(
    confirmer: &mut C,
    question: &str,
    default: bool,
) -> Result<()> {
    if confirmer.ask(question, default)? {
        Ok(())
    } else {
        Err(RepackError::UserDeclined {
            question: question.to_string(),
        })
    }
}
