//! Tooling bootstrap.
//!
//! Before a full (interactive) run, the apt packages and global npm packages
//! the pipeline shells out to are checked and, with confirmation, installed.
//!
//! # Modules
//!
//! - [`checker`] - Read-only apt and npm queries
//! - [`installer`] - Prompting installation of gaps
//! - [`status`] - Requirement status types

pub mod checker;
pub mod installer;
pub mod status;

pub use checker::ToolingChecker;
pub use installer::{RequirementsInstaller, APT_PACKAGES, NPM_PACKAGES};
pub use status::{RequirementStatus, Source};
