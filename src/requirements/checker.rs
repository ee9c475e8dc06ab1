//! Probes for the tools the pipeline shells out to.

use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{RepackError, Result};
use crate::shell::{Invocation, ProcessRunner};
use crate::version::AptQuery;

use super::status::RequirementStatus;

/// Shape of `npm -g --json list <name>` output.
#[derive(Debug, Default, Deserialize)]
struct NpmList {
    #[serde(default)]
    dependencies: BTreeMap<String, NpmPackage>,
}

#[derive(Debug, Deserialize)]
struct NpmPackage {
    version: Option<String>,
}

/// Read-only queries against apt and npm.
pub struct ToolingChecker<'a> {
    runner: &'a dyn ProcessRunner,
    apt: AptQuery,
}

impl<'a> ToolingChecker<'a> {
    /// Checker that probes tools through `runner`.
    pub fn new(runner: &'a dyn ProcessRunner) -> Result<Self> {
        Ok(Self {
            runner,
            apt: AptQuery::new()?,
        })
    }

    /// Installed apt package versions for `names`, in order.
    pub fn apt_statuses(&self, names: &[&str]) -> Result<Vec<(String, RequirementStatus)>> {
        let mut versions = self.apt.installed_versions(self.runner, names)?;
        Ok(names
            .iter()
            .map(|name| {
                let status = RequirementStatus::compare(versions.remove(*name), None);
                (name.to_string(), status)
            })
            .collect())
    }

    /// Version of the npm CLI itself.
    pub fn npm_version(&self) -> Result<String> {
        let output = self
            .runner
            .run_checked(&Invocation::new("npm").arg("--version"))?;
        Ok(output.stdout.trim().to_string())
    }

    /// Latest published version of an npm package.
    pub fn npm_latest(&self, name: &str) -> Result<String> {
        let output = self
            .runner
            .run_checked(&Invocation::new("npm").args(["-g", "view", name, "version"]))?;
        Ok(output.stdout.trim().to_string())
    }

    /// Globally installed version of an npm package.
    ///
    /// `npm list` exits nonzero when the package is absent, so only the JSON
    /// body is consulted.
    pub fn npm_installed(&self, name: &str) -> Result<Option<String>> {
        let invocation = Invocation::new("npm").args(["-g", "--json", "list", name]);
        let output = self.runner.run(&invocation)?;

        let stdout = output.stdout.trim();
        if stdout.is_empty() {
            return Ok(None);
        }

        let list: NpmList =
            serde_json::from_str(stdout).map_err(|e| RepackError::ToolInvocation {
                command: invocation.command_line(),
                code: output.exit_code,
                stderr: format!("unexpected output: {}", e),
            })?;

        let version = list.dependencies.get(name).and_then(|p| p.version.clone());
        debug!("npm {}: {:?}", name, version);
        Ok(version)
    }

    /// Installed vs. latest for a global npm package.
    pub fn npm_status(&self, name: &str) -> Result<RequirementStatus> {
        let latest = self.npm_latest(name)?;
        let installed = self.npm_installed(name)?;
        Ok(RequirementStatus::compare(installed, Some(latest)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockRunner, ProcessOutput};

    #[test]
    fn apt_statuses_keep_order() {
        let runner = MockRunner::new();
        runner.respond(
            "apt",
            ProcessOutput::ok("Listing...\ndpkg/jammy,now 1.21.1 amd64 [installed]\n"),
        );

        let checker = ToolingChecker::new(&runner).unwrap();
        let statuses = checker.apt_statuses(&["npm", "dpkg"]).unwrap();

        assert_eq!(statuses[0].0, "npm");
        assert!(statuses[0].1.is_missing());
        assert_eq!(statuses[1].1.installed_version(), Some("1.21.1"));
    }

    #[test]
    fn npm_installed_reads_json() {
        let runner = MockRunner::new();
        runner.respond(
            "npm",
            ProcessOutput::ok(
                r#"{"name":"lib","dependencies":{"electron":{"version":"28.1.0","overridden":false}}}"#,
            ),
        );

        let checker = ToolingChecker::new(&runner).unwrap();
        assert_eq!(
            checker.npm_installed("electron").unwrap().as_deref(),
            Some("28.1.0")
        );
    }

    #[test]
    fn npm_installed_missing_package() {
        let runner = MockRunner::new();
        runner.respond(
            "npm",
            ProcessOutput {
                exit_code: Some(1),
                stdout: "{}".to_string(),
                stderr: String::new(),
            },
        );

        let checker = ToolingChecker::new(&runner).unwrap();
        assert_eq!(checker.npm_installed("@electron/asar").unwrap(), None);
    }

    #[test]
    fn npm_installed_rejects_garbage() {
        let runner = MockRunner::new();
        runner.respond("npm", ProcessOutput::ok("not json"));

        let checker = ToolingChecker::new(&runner).unwrap();
        assert!(checker.npm_installed("electron").is_err());
    }

    #[test]
    fn npm_status_compares_with_latest() {
        let runner = MockRunner::new();
        runner.on("npm", |inv| {
            if inv.args.iter().any(|a| a == "view") {
                ProcessOutput::ok("28.1.0\n")
            } else {
                ProcessOutput::ok(r#"{"dependencies":{"electron":{"version":"27.0.0"}}}"#)
            }
        });

        let checker = ToolingChecker::new(&runner).unwrap();
        assert_eq!(
            checker.npm_status("electron").unwrap(),
            RequirementStatus::Outdated {
                installed: "27.0.0".into(),
                latest: "28.1.0".into()
            }
        );
    }

    #[test]
    fn npm_version_trims() {
        let runner = MockRunner::new();
        runner.respond("npm", ProcessOutput::ok("10.2.4\n"));

        let checker = ToolingChecker::new(&runner).unwrap();
        assert_eq!(checker.npm_version().unwrap(), "10.2.4");
    }
}
