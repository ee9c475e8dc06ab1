//! Configuration for update-discord.
//!
//! Configuration is built once at process start and passed explicitly to
//! every component that needs it.
//!
//! # Modules
//!
//! - [`schema`] - Config structure and defaults
//! - [`loader`] - File discovery, parsing and validation
//! - [`layout`] - Install paths derived from the prefix

pub mod layout;
pub mod loader;
pub mod schema;

pub use layout::InstallLayout;
pub use loader::{find_user_config, load_config, load_config_file, parse_config};
pub use schema::{
    Config, LauncherConfig, SelfUpdateConfig, DEFAULT_ENDPOINT, PACKAGE_PLACEHOLDER,
    VERSION_PLACEHOLDER,
};
