//! Configuration schema definitions.
//!
//! Every field has a default, so an empty (or missing) config file yields a
//! working setup for the upstream Discord tarball installed under
//! `/usr/local`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default upstream endpoint. It redirects to the versioned tarball.
pub const DEFAULT_ENDPOINT: &str = "https://discord.com/api/download?platform=linux&format=tar.gz";

/// Placeholder substituted with the resolved version in the package template.
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Placeholder substituted with the package name in the package template.
pub const PACKAGE_PLACEHOLDER: &str = "__PACKAGE__";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// URL that redirects to the latest versioned archive.
    pub endpoint: String,

    /// Name of the Debian package that is built and installed.
    pub package: String,

    /// Install identity: binary name, library directory, icon and desktop entry name.
    pub app: String,

    /// Root under which `bin/`, `lib/` and `share/` are installed.
    pub install_prefix: PathBuf,

    /// Where downloaded archives are kept (defaults to the user cache directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Where built packages are written (defaults to the user cache directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<PathBuf>,

    /// Parent for temporary extraction and staging directories (defaults to
    /// the system temp directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,

    /// Package metadata template directory (defaults to the embedded template).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    /// Prefix privileged commands with `sudo` (defaults to "when not root").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sudo: Option<bool>,

    /// Timestamp exported to the packaging tool as `SOURCE_DATE_EPOCH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_date_epoch: Option<i64>,

    /// User agent for upstream requests.
    pub user_agent: String,

    /// Generated launcher script.
    pub launcher: LauncherConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            package: "discord-electron".to_string(),
            app: "discord".to_string(),
            install_prefix: PathBuf::from("/usr/local"),
            cache_dir: None,
            build_dir: None,
            work_dir: None,
            template_dir: None,
            sudo: None,
            source_date_epoch: None,
            user_agent: concat!("update-discord/", env!("CARGO_PKG_VERSION")).to_string(),
            launcher: LauncherConfig::default(),
        }
    }
}

/// Launcher script settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Runtime that executes the packed resources.
    pub runtime: String,

    /// Self-update check run before launching; `null` disables it.
    pub self_update: Option<SelfUpdateConfig>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            runtime: "electron".to_string(),
            self_update: Some(SelfUpdateConfig::default()),
        }
    }
}

/// Self-update check embedded in the launcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SelfUpdateConfig {
    /// Updater command, probed with `which`.
    pub tool: String,

    /// Terminal emulator used to run the update visibly.
    pub terminal: String,
}

impl Default for SelfUpdateConfig {
    fn default() -> Self {
        Self {
            tool: "update-discord".to_string(),
            terminal: "konsole".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_discord() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.package, "discord-electron");
        assert_eq!(config.app, "discord");
        assert_eq!(config.install_prefix, PathBuf::from("/usr/local"));
        assert_eq!(config.launcher.runtime, "electron");
        assert!(config.launcher.self_update.is_some());
    }

    #[test]
    fn empty_yaml_is_default() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_yaml_overrides_fields() {
        let yaml = r#"
install_prefix: /opt/discord
launcher:
  self_update: null
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.install_prefix, PathBuf::from("/opt/discord"));
        assert!(config.launcher.self_update.is_none());
        assert_eq!(config.launcher.runtime, "electron");
        assert_eq!(config.package, "discord-electron");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("prefix: /opt\n");
        assert!(result.is_err());
    }
}
