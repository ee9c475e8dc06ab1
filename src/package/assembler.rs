//! Staging tree assembly and package build.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::bundle::Bundle;
use crate::config::{Config, InstallLayout, LauncherConfig};
use crate::error::Result;
use crate::shell::{Invocation, ProcessRunner};
use crate::version::VersionInfo;

use super::launcher::render_launcher;
use super::template::{set_mode, TemplateSource, TemplateVars};
use super::tree::{copy_file, copy_tree, scratch_dir, tree_digest};

/// A package produced by [`PackageAssembler::assemble`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPackage {
    /// Path of the `.deb` file.
    pub path: PathBuf,

    /// Digest of the staged tree the package was built from.
    pub tree_digest: String,
}

/// Builds an installable package from a patched bundle.
#[derive(Debug, Clone)]
pub struct PackageAssembler {
    package: String,
    layout: InstallLayout,
    launcher: LauncherConfig,
    template: TemplateSource,
    source_date_epoch: i64,
    work_dir: Option<PathBuf>,
}

impl PackageAssembler {
    /// Assembler for `package` installed at `layout`.
    ///
    /// `source_date_epoch` is passed to `dpkg-deb` for reproducible archives.
    pub fn new(
        package: impl Into<String>,
        layout: InstallLayout,
        launcher: LauncherConfig,
        template: TemplateSource,
        source_date_epoch: i64,
    ) -> Self {
        Self {
            package: package.into(),
            layout,
            launcher,
            template,
            source_date_epoch,
            work_dir: None,
        }
    }

    /// Create staging directories under `dir` instead of the system temp dir.
    pub fn with_work_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.work_dir = dir;
        self
    }

    /// Assembler configured from `config`, including its work dir.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.package.clone(),
            config.layout(),
            config.launcher.clone(),
            TemplateSource::from_config(config.template_dir.as_deref()),
            config.source_date_epoch(),
        )
        .with_work_dir(config.work_dir.clone())
    }

    /// File name of the package for `info`.
    pub fn package_file_name(&self, info: &VersionInfo) -> String {
        format!("{}_{}.deb", self.package, info.version)
    }

    /// Lay out the package tree for `bundle` under `staging`.
    pub fn stage(&self, bundle: &Bundle, info: &VersionInfo, staging: &Path) -> Result<()> {
        let vars = TemplateVars {
            package: self.package.clone(),
            version: info.version.clone(),
        };
        self.template.render_into(&staging.join("DEBIAN"), &vars)?;

        let binary = InstallLayout::staged(staging, &self.layout.binary());
        if let Some(parent) = binary.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&binary, render_launcher(&self.layout, &self.launcher))?;
        set_mode(&binary, 0o755)?;

        let lib = InstallLayout::staged(staging, &self.layout.lib_dir());
        let copied = copy_tree(&bundle.resources_dir(), &lib)?;
        debug!("Copied {} resource files to {}", copied, lib.display());

        copy_file(
            &bundle.icon(),
            &InstallLayout::staged(staging, &self.layout.icon()),
        )?;
        copy_file(
            &bundle.desktop_entry(),
            &InstallLayout::staged(staging, &self.layout.desktop_entry()),
        )?;

        Ok(())
    }

    /// Stage the bundle in a temporary directory and build the package into
    /// `output_dir`.
    pub fn assemble(
        &self,
        runner: &dyn ProcessRunner,
        bundle: &Bundle,
        info: &VersionInfo,
        output_dir: &Path,
    ) -> Result<BuiltPackage> {
        let temp = scratch_dir(self.work_dir.as_deref(), "update-discord-stage-")?;
        let staging = temp.path().join("root");
        fs::create_dir(&staging)?;
        set_mode(&staging, 0o755)?;

        self.stage(bundle, info, &staging)?;
        let digest = tree_digest(&staging)?;
        info!("Staged {} ({})", info, digest);

        fs::create_dir_all(output_dir)?;
        let deb = output_dir.join(self.package_file_name(info));

        let invocation = Invocation::new("dpkg-deb")
            .args(["--root-owner-group", "--build"])
            .path_arg(&staging)
            .path_arg(&deb)
            .env("SOURCE_DATE_EPOCH", self.source_date_epoch.to_string());
        runner.run_checked(&invocation)?;

        Ok(BuiltPackage {
            path: deb,
            tree_digest: digest,
        })
    }
}
