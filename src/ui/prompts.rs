//! Interactive prompts.

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::error::{RepackError, Result};

/// Convert dialoguer errors to RepackError.
fn map_dialoguer_err(e: dialoguer::Error) -> RepackError {
    RepackError::Io(e.into())
}

/// Ask a yes/no question on the terminal.
pub fn prompt_confirm(question: &str, default: bool, term: &Term) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}
