//! update-discord - Repackage the upstream Discord tarball as a Debian package.
//!
//! The pipeline resolves the latest release from the download endpoint,
//! fetches the archive into a local cache, patches the bundled resources so
//! the application runs on the system Electron runtime, builds a `.deb` with
//! a launcher script, and installs it.
//!
//! # Modules
//!
//! - [`version`] - Latest-release resolution and installed-version lookup
//! - [`cache`] - Archive download and cache management
//! - [`bundle`] - Layout of the extracted archive
//! - [`patch`] - Resource container unpacking, patching and repacking
//! - [`package`] - Staging tree, launcher, metadata template and `dpkg-deb`
//! - [`runner`] - Pipeline orchestration
//! - [`requirements`] - apt/npm tooling checks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and validation
//! - [`shell`] - External process execution
//! - [`ui`] - Confirmations, spinners and terminal output
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use update_discord::version::ReleaseUrlPattern;
//!
//! let pattern = ReleaseUrlPattern::new().unwrap();
//! let info = pattern
//!     .parse("https://dl.discordapp.net/apps/linux/0.0.51/discord-0.0.51.tar.gz")
//!     .unwrap();
//! assert_eq!(info.app_name, "discord");
//! assert_eq!(info.version, "0.0.51");
//! ```

pub mod bundle;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod package;
pub mod patch;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod ui;
pub mod version;

pub use error::{RepackError, Result};
