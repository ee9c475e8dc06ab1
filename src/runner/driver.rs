//! The update/patch/assemble/install pipeline.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::bundle::Bundle;
use crate::cache::ArchiveCache;
use crate::config::Config;
use crate::error::Result;
use crate::package::{scratch_dir, BuiltPackage, PackageAssembler};
use crate::patch::ResourcePatcher;
use crate::shell::{elevate, Invocation, ProcessRunner};
use crate::ui::{confirm_or_abort, UserInterface};
use crate::version::{UpdateCheck, VersionInfo, VersionResolver};

use super::stage::Stage;

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The resolved version is already installed; nothing was done.
    AlreadyInstalled { version: String },

    /// A package was built and installed.
    Installed {
        info: VersionInfo,
        package: BuiltPackage,
        archive_removed: bool,
    },
}

/// Drives a single pipeline run.
pub struct InstallDriver<'a> {
    package: String,
    build_dir: PathBuf,
    work_dir: Option<PathBuf>,
    use_sudo: bool,
    resolver: VersionResolver,
    cache: ArchiveCache,
    patcher: ResourcePatcher,
    assembler: PackageAssembler,
    runner: &'a dyn ProcessRunner,
}

impl<'a> InstallDriver<'a> {
    /// Build a driver from configuration and injected capabilities.
    pub fn new(
        config: &Config,
        resolver: VersionResolver,
        cache: ArchiveCache,
        runner: &'a dyn ProcessRunner,
    ) -> Result<Self> {
        Ok(Self {
            package: config.package.clone(),
            build_dir: config.build_dir(),
            work_dir: config.work_dir.clone(),
            use_sudo: config.use_sudo(),
            resolver,
            cache,
            patcher: ResourcePatcher::new(&config.layout())?,
            assembler: PackageAssembler::from_config(config),
            runner,
        })
    }

    /// The archive cache used by this driver.
    pub fn cache(&self) -> &ArchiveCache {
        &self.cache
    }

    /// Resolve only: compare the latest release with the installed package.
    ///
    /// Has no side effects.
    pub fn needs_update(&self) -> Result<UpdateCheck> {
        self.resolver.check(self.runner, &self.package)
    }

    /// Run the pipeline.
    ///
    /// With `force`, the package is rebuilt even when the installed version
    /// matches the latest release.
    pub fn run(&self, ui: &mut dyn UserInterface, force: bool) -> Result<RunOutcome> {
        let mut stage = Stage::Resolving;
        debug!("Stage: {}", stage);

        let check = self.needs_update()?;
        let info = check.latest.clone();

        if !check.update_needed() && !force {
            advance(&mut stage, Stage::ShortCircuit);
            ui.success(&format!("{} is already installed", info));
            return Ok(RunOutcome::AlreadyInstalled {
                version: info.version,
            });
        }

        match &check.installed {
            Some(installed) if installed != &info.version => {
                ui.message(&format!("Update available: {} -> {}", installed, info.version))
            }
            Some(_) => ui.message(&format!("Reinstalling {}", info)),
            None => ui.message(&format!("{} is not installed", self.package)),
        }

        confirm_or_abort(
            ui,
            &format!("Build Debian package for {}?", info),
            true,
        )?;

        advance(&mut stage, Stage::Fetching);
        let lookup = self.cache.ensure_local(&info)?;
        let extract = scratch_dir(self.work_dir.as_deref(), "update-discord-")?;
        let bundle = spin(ui, "Extracting archive...", || {
            self.extract(&lookup.path, extract.path())
        })?;

        advance(&mut stage, Stage::Patching);
        spin(ui, "Patching resources...", || {
            self.patcher.patch(self.runner, &bundle)
        })?;

        advance(&mut stage, Stage::Assembling);
        let package = spin(ui, "Building package...", || {
            self.assembler
                .assemble(self.runner, &bundle, &info, &self.build_dir)
        })?;
        drop(extract);

        advance(&mut stage, Stage::Installing);
        let deb = std::path::absolute(&package.path)?;
        let file_name = deb
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| deb.display().to_string());
        confirm_or_abort(ui, &format!("Install {}?", file_name), true)?;
        self.install(&deb)?;
        ui.success(&format!("Installed {}", info));

        let mut archive_removed = false;
        if lookup.downloaded
            && ui.is_interactive()
            && ui.ask("Delete downloaded archive?", true)?
        {
            archive_removed = self.cache.remove(&info)?;
            self.cache.prune()?;
        }

        advance(&mut stage, Stage::Done);
        Ok(RunOutcome::Installed {
            info,
            package,
            archive_removed,
        })
    }

    fn extract(&self, archive: &Path, dest: &Path) -> Result<Bundle> {
        let invocation = Invocation::new("tar")
            .arg("-xzf")
            .path_arg(archive)
            .arg("-C")
            .path_arg(dest);
        self.runner.run_checked(&invocation)?;
        Bundle::locate(dest)
    }

    fn install(&self, deb: &Path) -> Result<()> {
        let invocation = Invocation::new("apt")
            .args(["install", "--reinstall", "-y"])
            .path_arg(deb)
            .interactive();
        let invocation = elevate(invocation, self.use_sudo);
        info!("Installing {}", deb.display());
        self.runner.run_checked(&invocation)?;
        Ok(())
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug_assert!(stage.can_advance_to(next), "{} -> {}", stage, next);
    debug!("Stage: {} -> {}", stage, next);
    *stage = next;
    if stage.is_terminal() {
        info!("Pipeline finished ({})", stage);
    }
}

/// Run `f` behind a spinner, finishing it according to the outcome.
fn spin<T>(
    ui: &mut dyn UserInterface,
    message: &str,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    let mut spinner = ui.start_spinner(message);
    match f() {
        Ok(value) => {
            spinner.finish_success(message.trim_end_matches("..."));
            Ok(value)
        }
        Err(e) => {
            spinner.finish_error(message.trim_end_matches("..."));
            Err(e)
        }
    }
}
