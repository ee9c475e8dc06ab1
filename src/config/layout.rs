//! Install layout derived from the configured prefix and app name.

use std::path::{Component, Path, PathBuf};

/// Where each installed artifact lives on the target system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    prefix: PathBuf,
    app: String,
}

impl InstallLayout {
    /// Create a layout for `app` under `prefix`.
    pub fn new(prefix: impl Into<PathBuf>, app: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            app: app.into(),
        }
    }

    /// The install prefix.
    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// The install identity.
    pub fn app(&self) -> &str {
        &self.app
    }

    /// `<prefix>/bin`
    pub fn bin_dir(&self) -> PathBuf {
        self.prefix.join("bin")
    }

    /// `<prefix>/bin/<app>`
    pub fn binary(&self) -> PathBuf {
        self.bin_dir().join(&self.app)
    }

    /// `<prefix>/lib/<app>`
    pub fn lib_dir(&self) -> PathBuf {
        self.prefix.join("lib").join(&self.app)
    }

    /// `<prefix>/lib/<app>/app.asar`
    pub fn packed_resources(&self) -> PathBuf {
        self.lib_dir().join("app.asar")
    }

    /// `<prefix>/share/pixmaps/<app>.png`
    pub fn icon(&self) -> PathBuf {
        self.prefix
            .join("share")
            .join("pixmaps")
            .join(format!("{}.png", self.app))
    }

    /// `<prefix>/share/applications/<app>.desktop`
    pub fn desktop_entry(&self) -> PathBuf {
        self.prefix
            .join("share")
            .join("applications")
            .join(format!("{}.desktop", self.app))
    }

    /// Map an absolute install path into a staging root.
    pub fn staged(staging: &Path, installed: &Path) -> PathBuf {
        let relative: PathBuf = installed
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        staging.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> InstallLayout {
        InstallLayout::new("/usr/local", "discord")
    }

    #[test]
    fn paths_follow_prefix() {
        let l = layout();
        assert_eq!(l.bin_dir(), PathBuf::from("/usr/local/bin"));
        assert_eq!(l.binary(), PathBuf::from("/usr/local/bin/discord"));
        assert_eq!(l.lib_dir(), PathBuf::from("/usr/local/lib/discord"));
        assert_eq!(
            l.packed_resources(),
            PathBuf::from("/usr/local/lib/discord/app.asar")
        );
        assert_eq!(
            l.icon(),
            PathBuf::from("/usr/local/share/pixmaps/discord.png")
        );
        assert_eq!(
            l.desktop_entry(),
            PathBuf::from("/usr/local/share/applications/discord.desktop")
        );
    }

    #[test]
    fn staged_strips_root() {
        let staged = InstallLayout::staged(Path::new("/tmp/stage"), &layout().binary());
        assert_eq!(staged, PathBuf::from("/tmp/stage/usr/local/bin/discord"));
    }

    #[test]
    fn other_prefix() {
        let l = InstallLayout::new("/opt/chat", "chat");
        assert_eq!(l.binary(), PathBuf::from("/opt/chat/bin/chat"));
        assert_eq!(l.app(), "chat");
        assert_eq!(l.prefix(), Path::new("/opt/chat"));
    }
}
