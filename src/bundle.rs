//! The extracted vendor tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RepackError, Result};

/// Desktop entry shipped in the bundle root.
pub const DESKTOP_ENTRY: &str = "discord.desktop";

/// Icon shipped in the bundle root.
pub const ICON: &str = "discord.png";

/// An extracted release archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    root: PathBuf,
}

impl Bundle {
    /// Wrap an already-known bundle root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the bundle inside an extraction directory.
    ///
    /// The archive must contain exactly one top-level directory.
    pub fn locate(extract_dir: &Path) -> Result<Self> {
        let mut dirs = Vec::new();
        let mut others = 0usize;
        for entry in fs::read_dir(extract_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            } else {
                others += 1;
            }
        }

        match (dirs.len(), others) {
            (1, 0) => Ok(Self::new(dirs.remove(0))),
            (0, _) => Err(RepackError::BundleLayout {
                path: extract_dir.to_path_buf(),
                message: "archive contains no top-level directory".to_string(),
            }),
            (n, m) => Err(RepackError::BundleLayout {
                path: extract_dir.to_path_buf(),
                message: format!(
                    "expected a single top-level directory, found {} directories and {} files",
                    n, m
                ),
            }),
        }
    }

    /// Bundle root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `discord.desktop`
    pub fn desktop_entry(&self) -> PathBuf {
        self.root.join(DESKTOP_ENTRY)
    }

    /// `discord.png`
    pub fn icon(&self) -> PathBuf {
        self.root.join(ICON)
    }

    /// `resources/`
    pub fn resources_dir(&self) -> PathBuf {
        self.root.join("resources")
    }

    /// `resources/app.asar`
    pub fn container(&self) -> PathBuf {
        self.resources_dir().join("app.asar")
    }

    /// `resources/app`, the unpacked container.
    pub fn unpacked_dir(&self) -> PathBuf {
        self.resources_dir().join("app")
    }
}
