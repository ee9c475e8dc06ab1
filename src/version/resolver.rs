//! Latest and installed version lookup.

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::error::{RepackError, Result};
use crate::shell::ProcessRunner;

use super::info::{ReleaseUrlPattern, VersionInfo};
use super::installed::AptQuery;

/// Result of comparing the upstream release with the installed package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck {
    /// Latest upstream release.
    pub latest: VersionInfo,

    /// Installed version of the package, if any.
    pub installed: Option<String>,
}

impl UpdateCheck {
    /// Whether the installed package differs from the latest release.
    pub fn update_needed(&self) -> bool {
        self.installed.as_deref() != Some(self.latest.version.as_str())
    }
}

/// Resolves the latest upstream release and the installed version.
pub struct VersionResolver {
    endpoint: String,
    client: Client,
    pattern: ReleaseUrlPattern,
    apt: AptQuery,
}

impl VersionResolver {
    /// Create a resolver for the given redirecting endpoint.
    pub fn new(endpoint: impl Into<String>, client: Client) -> Result<Self> {
        Ok(Self {
            endpoint: endpoint.into(),
            client,
            pattern: ReleaseUrlPattern::new()?,
            apt: AptQuery::new()?,
        })
    }

    /// The endpoint this resolver queries.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Follow the endpoint's redirects and parse the final URL.
    ///
    /// Only the URL decides; a non-success status is logged and ignored.
    pub fn resolve_latest(&self) -> Result<VersionInfo> {
        debug!("Resolving latest release from {}", self.endpoint);

        let response = self
            .client
            .head(&self.endpoint)
            .send()
            .map_err(|e| RepackError::http(&self.endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream answered {} for {}", status, response.url());
        }

        let info = self.pattern.parse(response.url().as_str())?;
        debug!("Latest release: {} ({})", info, info.download_url);
        Ok(info)
    }

    /// Installed version of `package` according to apt, or `None`.
    pub fn resolve_installed(
        &self,
        runner: &dyn ProcessRunner,
        package: &str,
    ) -> Result<Option<String>> {
        let version = self.apt.installed_version(runner, package)?;
        debug!("Installed {}: {:?}", package, version);
        Ok(version)
    }

    /// Resolve both sides of the update decision.
    pub fn check(&self, runner: &dyn ProcessRunner, package: &str) -> Result<UpdateCheck> {
        let latest = self.resolve_latest()?;
        let installed = self.resolve_installed(runner, package)?;
        Ok(UpdateCheck { latest, installed })
    }
}
