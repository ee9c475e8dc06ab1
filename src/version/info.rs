//! Upstream release identity parsed from the download URL.

use regex::Regex;
use std::fmt;

use crate::error::{RepackError, Result};

/// Identity of one upstream release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Final (post-redirect) download URL.
    pub download_url: String,

    /// File name of the archive, e.g. `discord-0.0.51.tar.gz`.
    pub archive_filename: String,

    /// Application name from the file name, e.g. `discord`.
    pub app_name: String,

    /// Dotted version, e.g. `0.0.51`.
    pub version: String,
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.app_name, self.version)
    }
}

/// Matcher for `.../<name>-<major>.<minor>.<patch>.tar.gz` URLs.
#[derive(Debug, Clone)]
pub struct ReleaseUrlPattern {
    regex: Regex,
}

impl ReleaseUrlPattern {
    /// Compile the release URL pattern.
    pub fn new() -> Result<Self> {
        let regex = Regex::new(r"^.*/(([^/\s]+)-(\d+\.\d+\.\d+)\.tar\.gz)$")
            .map_err(anyhow::Error::from)?;
        Ok(Self { regex })
    }

    /// Parse a download URL into a [`VersionInfo`].
    pub fn parse(&self, url: &str) -> Result<VersionInfo> {
        let caps = self
            .regex
            .captures(url)
            .ok_or_else(|| RepackError::Resolution {
                url: url.to_string(),
            })?;

        Ok(VersionInfo {
            download_url: url.to_string(),
            archive_filename: caps[1].to_string(),
            app_name: caps[2].to_string(),
            version: caps[3].to_string(),
        })
    }
}
