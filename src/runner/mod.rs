//! Pipeline orchestration.
//!
//! [`InstallDriver`] walks the stages in [`Stage`] order:
//! resolve, then either short-circuit or fetch, patch, assemble and install.

pub mod driver;
pub mod stage;

pub use driver::{InstallDriver, RunOutcome};
pub use stage::Stage;
