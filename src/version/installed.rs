//! Installed package versions from `apt list --installed`.

use regex::Regex;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::shell::{Invocation, ProcessRunner};

/// Queries apt for installed package versions.
#[derive(Debug, Clone)]
pub struct AptQuery {
    line: Regex,
}

impl AptQuery {
    /// Create a query with the listing-line parser compiled.
    pub fn new() -> Result<Self> {
        Ok(Self {
            line: Regex::new(r"^(\S+)/\S+ (\S+) ").map_err(anyhow::Error::from)?,
        })
    }

    /// Parse `<name>/<suite> <version> <arch> [...]` lines into name → version.
    pub fn parse(&self, stdout: &str) -> BTreeMap<String, String> {
        stdout
            .lines()
            .filter_map(|line| self.line.captures(line))
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect()
    }

    /// Installed versions of `packages`; absent packages are simply missing
    /// from the map.
    pub fn installed_versions(
        &self,
        runner: &dyn ProcessRunner,
        packages: &[&str],
    ) -> Result<BTreeMap<String, String>> {
        let invocation = Invocation::new("apt")
            .arg("list")
            .args(packages.iter().copied())
            .arg("--installed");
        let output = runner.run_checked(&invocation)?;
        Ok(self.parse(&output.stdout))
    }

    /// Installed version of a single package.
    pub fn installed_version(
        &self,
        runner: &dyn ProcessRunner,
        package: &str,
    ) -> Result<Option<String>> {
        Ok(self.installed_versions(runner, &[package])?.remove(package))
    }
}
