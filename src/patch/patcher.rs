//! In-place rewriting of an extracted bundle.

use std::fs;
use tracing::debug;

use crate::bundle::{Bundle, DESKTOP_ENTRY};
use crate::config::InstallLayout;
use crate::error::Result;
use crate::shell::ProcessRunner;

use super::container;
use super::rules::{desktop_entry_patch, FilePatch, PatchSpec};

/// Points a bundle's embedded paths at the install layout.
pub struct ResourcePatcher {
    desktop: FilePatch,
    spec: PatchSpec,
}

impl ResourcePatcher {
    /// Patcher for the given install layout.
    pub fn new(layout: &InstallLayout) -> Result<Self> {
        Ok(Self {
            desktop: desktop_entry_patch(layout, DESKTOP_ENTRY)?,
            spec: PatchSpec::for_layout(layout)?,
        })
    }

    /// Patcher with an explicit rule set.
    pub fn with_rules(desktop: FilePatch, spec: PatchSpec) -> Self {
        Self { desktop, spec }
    }

    /// Rewrite the bundle in place.
    ///
    /// The container is unpacked, patched and repacked; on success
    /// `resources/app.asar` holds the patched tree and no working directory
    /// is left behind. Any failure aborts.
    pub fn patch(&self, runner: &dyn ProcessRunner, bundle: &Bundle) -> Result<()> {
        self.desktop.apply(bundle.root())?;

        let archive = bundle.container();
        let work = bundle.unpacked_dir();

        container::extract(runner, &archive, &work)?;
        fs::remove_file(&archive)?;
        debug!("Unpacked {}", archive.display());

        self.spec.apply(&work)?;

        container::pack(runner, &work, &archive)?;
        fs::remove_dir_all(&work)?;
        debug!("Repacked {}", archive.display());

        Ok(())
    }
}
