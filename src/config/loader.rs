//! Configuration file discovery, loading and validation.
//!
//! Lookup order (first hit wins, no merging):
//! 1. the path given with `--config` / `UPDATE_DISCORD_CONFIG`
//! 2. `<config dir>/update-discord/config.yml`
//! 3. built-in defaults

use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::error::{RepackError, Result};

use super::layout::InstallLayout;
use super::schema::Config;

const APP_DIR: &str = "update-discord";

/// Find the user config file, if one exists.
pub fn find_user_config() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join(APP_DIR).join("config.yml");
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load the configuration.
///
/// An explicit path must exist; the user config is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_user_config(),
    };

    let config = match path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config_file(&path)?
        }
        None => {
            debug!("No config file, using defaults");
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}

/// Load a single config file.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| RepackError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a Config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_yaml::from_str(content).map_err(|e| RepackError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

fn default_state_dir(leaf: &str) -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(leaf)
}

impl Config {
    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if !self.install_prefix.is_absolute() {
            return Err(RepackError::ConfigValidation {
                message: format!(
                    "install_prefix must be absolute, got {}",
                    self.install_prefix.display()
                ),
            });
        }

        // The prefix ends up inside single-quoted launcher and JS literals
        // and is joined under the staging root.
        let plain = self
            .install_prefix
            .components()
            .all(|c| matches!(c, Component::RootDir | Component::Normal(_)));
        let quoted = self
            .install_prefix
            .to_string_lossy()
            .contains(&['\'', '"', '\\'][..]);
        if !plain || quoted {
            return Err(RepackError::ConfigValidation {
                message: format!(
                    "install_prefix must not contain '..' or quote characters, got {}",
                    self.install_prefix.display()
                ),
            });
        }

        let package_name = Regex::new(r"^[a-z0-9][a-z0-9+.-]+$").map_err(anyhow::Error::from)?;
        if !package_name.is_match(&self.package) {
            return Err(RepackError::ConfigValidation {
                message: format!("'{}' is not a valid Debian package name", self.package),
            });
        }

        let app_name = Regex::new(r"^[A-Za-z0-9._-]+$").map_err(anyhow::Error::from)?;
        if !app_name.is_match(&self.app) {
            return Err(RepackError::ConfigValidation {
                message: format!("'{}' is not a valid app name", self.app),
            });
        }

        if self.launcher.runtime.trim().is_empty() {
            return Err(RepackError::ConfigValidation {
                message: "launcher.runtime must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Install layout for this config.
    pub fn layout(&self) -> InstallLayout {
        InstallLayout::new(&self.install_prefix, &self.app)
    }

    /// Archive cache directory.
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| default_state_dir("archives"))
    }

    /// Output directory for built packages.
    pub fn build_dir(&self) -> PathBuf {
        self.build_dir
            .clone()
            .unwrap_or_else(|| default_state_dir("build"))
    }

    /// Whether privileged commands need `sudo`.
    pub fn use_sudo(&self) -> bool {
        self.sudo
            .unwrap_or_else(|| !crate::shell::is_elevated())
    }

    /// Timestamp for reproducible packaging.
    ///
    /// Config value, else `SOURCE_DATE_EPOCH` from the environment, else 0.
    pub fn source_date_epoch(&self) -> i64 {
        self.source_date_epoch
            .or_else(|| {
                std::env::var("SOURCE_DATE_EPOCH")
                    .ok()
                    .and_then(|v| v.trim().parse().ok())
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_empty_content_is_default() {
        let config = parse_config("", Path::new("config.yml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_invalid_yaml_reports_path() {
        let err = parse_config("install_prefix: [", Path::new("/etc/x.yml")).unwrap_err();
        assert!(matches!(err, RepackError::ConfigParse { .. }));
        assert!(err.to_string().contains("/etc/x.yml"));
    }

    #[test]
    fn load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "app: chat\ninstall_prefix: /opt/chat\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.app, "chat");
        assert_eq!(config.layout().binary(), PathBuf::from("/opt/chat/bin/chat"));
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let temp = TempDir::new().unwrap();
        let err = load_config(Some(&temp.path().join("nope.yml"))).unwrap_err();
        assert!(matches!(err, RepackError::ConfigParse { .. }));
    }

    #[test]
    fn relative_prefix_is_rejected() {
        let config = Config {
            install_prefix: PathBuf::from("usr/local"),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn prefix_with_parent_dir_is_rejected() {
        let config = Config {
            install_prefix: PathBuf::from("/usr/../../tmp"),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, RepackError::ConfigValidation { .. }));
        assert!(err.to_string().contains("install_prefix"));
    }

    #[test]
    fn prefix_with_quote_is_rejected() {
        let config = Config {
            install_prefix: PathBuf::from("/opt/it's"),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RepackError::ConfigValidation { .. })
        ));
    }

    #[test]
    fn bad_package_name_is_rejected() {
        let config = Config {
            package: "Discord Electron".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_app_name_is_rejected() {
        let config = Config {
            app: "dis/cord".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn explicit_dirs_win() {
        let config = Config {
            cache_dir: Some(PathBuf::from("/tmp/archives")),
            build_dir: Some(PathBuf::from("/tmp/build")),
            ..Default::default()
        };
        assert_eq!(config.cache_dir(), PathBuf::from("/tmp/archives"));
        assert_eq!(config.build_dir(), PathBuf::from("/tmp/build"));
    }

    #[test]
    fn default_dirs_are_namespaced() {
        let config = Config::default();
        assert!(config.cache_dir().ends_with("update-discord/archives"));
        assert!(config.build_dir().ends_with("update-discord/build"));
    }

    #[test]
    fn explicit_sudo_and_epoch() {
        let config = Config {
            sudo: Some(false),
            source_date_epoch: Some(1_700_000_000),
            ..Default::default()
        };
        assert!(!config.use_sudo());
        assert_eq!(config.source_date_epoch(), 1_700_000_000);
    }
}
