//! Progress spinners and download bars.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::Theme;
use super::SpinnerHandle;

/// A progress spinner for long-running operations.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: Theme,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str, theme: Theme) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.magenta} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar, theme }
    }

    /// Create a spinner that doesn't show (for quiet mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: Theme::plain(),
        }
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }
}

/// Create a byte-count progress bar for a download.
///
/// `total` is the expected size when the server reported one; `visible`
/// false returns a hidden bar.
pub fn download_bar(total: Option<u64>, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    match total {
        Some(len) => {
            let bar = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("  {bar:40.magenta/dim} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
            {
                bar.set_style(style.progress_chars("━╸─"));
            }
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {bytes}") {
                bar.set_style(style);
            }
            bar
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner_finishes() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.finish_success("Done");
    }

    #[test]
    fn spinner_finish_error() {
        let mut spinner = ProgressSpinner::new("Testing...", Theme::plain());
        spinner.finish_error("Failed");
    }

    #[test]
    fn download_bar_hidden_when_not_visible() {
        let bar = download_bar(Some(100), false);
        assert!(bar.is_hidden());
    }

    #[test]
    fn download_bar_tracks_length() {
        let bar = download_bar(Some(100), true);
        assert_eq!(bar.length(), Some(100));
        bar.inc(40);
        assert_eq!(bar.position(), 40);
        bar.finish_and_clear();
    }
}
