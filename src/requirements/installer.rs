//! Interactive installation of missing or outdated tooling.
//!
//! Missing requirements must be installed (declining aborts the run);
//! updates for outdated ones are optional and default to "no".

use tracing::info;

use crate::error::Result;
use crate::shell::{elevate, Invocation, ProcessRunner};
use crate::ui::{confirm_or_abort, UserInterface};

use super::checker::ToolingChecker;
use super::status::{RequirementStatus, Source};

/// apt packages the pipeline needs.
pub const APT_PACKAGES: &[&str] = &["npm", "dpkg"];

/// Global npm packages the pipeline needs.
pub const NPM_PACKAGES: &[&str] = &["electron", "@electron/asar"];

/// Checks and installs the tooling the pipeline shells out to.
pub struct RequirementsInstaller<'a> {
    runner: &'a dyn ProcessRunner,
    checker: ToolingChecker<'a>,
    use_sudo: bool,
}

impl<'a> RequirementsInstaller<'a> {
    /// Installer running tools through `runner`; installs go through `sudo`
    /// when `use_sudo` is set.
    pub fn new(runner: &'a dyn ProcessRunner, use_sudo: bool) -> Result<Self> {
        Ok(Self {
            runner,
            checker: ToolingChecker::new(runner)?,
            use_sudo,
        })
    }

    /// Make sure apt and npm tooling is present, prompting for each gap.
    pub fn ensure(&self, ui: &mut dyn UserInterface) -> Result<()> {
        self.ensure_apt(ui)?;
        self.ensure_npm(ui)?;
        for name in NPM_PACKAGES {
            self.ensure_npm_package(ui, name)?;
        }
        Ok(())
    }

    fn ensure_apt(&self, ui: &mut dyn UserInterface) -> Result<()> {
        for (name, status) in self.checker.apt_statuses(APT_PACKAGES)? {
            match status.installed_version() {
                Some(version) => ui.message(&format!("{} - {} found: v{}", Source::Apt, name, version)),
                None => {
                    confirm_or_abort(
                        ui,
                        &format!("{} - {} not found! Install (required)?", Source::Apt, name),
                        true,
                    )?;
                    self.install(Invocation::new("apt").args(["install", "-y", name.as_str()]))?;
                }
            }
        }
        Ok(())
    }

    fn ensure_npm(&self, ui: &mut dyn UserInterface) -> Result<()> {
        let version = self.checker.npm_version()?;
        ui.message(&format!("npm found: v{}", version));

        let latest = self.checker.npm_latest("npm")?;
        let status = RequirementStatus::compare(Some(version), Some(latest));
        self.offer_update(ui, "npm", &status)
    }

    fn ensure_npm_package(&self, ui: &mut dyn UserInterface, name: &str) -> Result<()> {
        let status = self.checker.npm_status(name)?;
        match &status {
            RequirementStatus::Missing { latest } => {
                let target = latest.as_deref().unwrap_or("latest");
                confirm_or_abort(
                    ui,
                    &format!(
                        "{} - {} not found! Install {} v{} (required)?",
                        Source::Npm,
                        name,
                        name,
                        target
                    ),
                    true,
                )?;
                self.npm_install(name, target)
            }
            other => {
                if let Some(version) = other.installed_version() {
                    ui.message(&format!("{} - {} found: v{}", Source::Npm, name, version));
                }
                self.offer_update(ui, name, other)
            }
        }
    }

    fn offer_update(
        &self,
        ui: &mut dyn UserInterface,
        name: &str,
        status: &RequirementStatus,
    ) -> Result<()> {
        if let RequirementStatus::Outdated { latest, .. } = status {
            let question = format!("{} - Update {} to v{}?", Source::Npm, name, latest);
            if ui.ask(&question, false)? {
                self.npm_install(name, latest)?;
            }
        }
        Ok(())
    }

    fn npm_install(&self, name: &str, version: &str) -> Result<()> {
        self.install(Invocation::new("npm").args([
            "-g".to_string(),
            "install".to_string(),
            format!("{}@{}", name, version),
        ]))
    }

    fn install(&self, invocation: Invocation) -> Result<()> {
        let invocation = elevate(invocation.interactive(), self.use_sudo);
        info!("Installing: {}", invocation.command_line());
        self.runner.run_checked(&invocation)?;
        Ok(())
    }
}
