//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show progress and status.
    #[default]
    Normal,
    /// Show only the final status and errors (no spinners or progress bars).
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows spinners and progress bars.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Check if this mode shows informational messages.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
