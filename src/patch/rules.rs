//! Declarative text substitutions applied to bundle files.

use regex::{NoExpand, Regex};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::InstallLayout;
use crate::error::{RepackError, Result};

/// A pure text substitution.
#[derive(Debug, Clone)]
pub enum Substitution {
    /// Replace every occurrence of `find` with `replace`.
    Literal { find: String, replace: String },

    /// Replace every match of `regex` with `replacement` (taken verbatim).
    Pattern { regex: Regex, replacement: String },
}

impl Substitution {
    /// Literal substitution.
    pub fn literal(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Substitution::Literal {
            find: find.into(),
            replace: replace.into(),
        }
    }

    /// Regex substitution.
    pub fn pattern(regex: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Substitution::Pattern {
            regex: Regex::new(regex).map_err(anyhow::Error::from)?,
            replacement: replacement.into(),
        })
    }

    /// Apply to `text`, returning the new text and the number of matches.
    pub fn apply(&self, text: &str) -> (String, usize) {
        match self {
            Substitution::Literal { find, replace } => {
                let count = text.matches(find.as_str()).count();
                (text.replace(find.as_str(), replace), count)
            }
            Substitution::Pattern { regex, replacement } => {
                let count = regex.find_iter(text).count();
                let out = regex.replace_all(text, NoExpand(replacement));
                (out.into_owned(), count)
            }
        }
    }

    fn describe(&self) -> &str {
        match self {
            Substitution::Literal { find, .. } => find,
            Substitution::Pattern { regex, .. } => regex.as_str(),
        }
    }
}

/// Substitutions for one file, relative to a base directory.
#[derive(Debug, Clone)]
pub struct FilePatch {
    /// Path relative to the base directory.
    pub path: PathBuf,

    /// Substitutions applied in order.
    pub rules: Vec<Substitution>,
}

impl FilePatch {
    /// Patch `path` with `rules`.
    pub fn new(path: impl Into<PathBuf>, rules: Vec<Substitution>) -> Self {
        Self {
            path: path.into(),
            rules,
        }
    }

    /// Rewrite `<base>/<path>` in place.
    ///
    /// A missing file is an error. A rule that matches nothing only warns.
    pub fn apply(&self, base: &Path) -> Result<()> {
        let target = base.join(&self.path);
        let original = fs::read_to_string(&target).map_err(|e| RepackError::Patch {
            path: self.path.clone(),
            message: if e.kind() == io::ErrorKind::NotFound {
                "file not found".to_string()
            } else {
                e.to_string()
            },
        })?;

        let mut text = original.clone();
        for rule in &self.rules {
            let (next, count) = rule.apply(&text);
            if count == 0 {
                warn!(
                    "Pattern {:?} matched nothing in {}",
                    rule.describe(),
                    self.path.display()
                );
            }
            text = next;
        }

        if text != original {
            fs::write(&target, text).map_err(|e| RepackError::Patch {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
            debug!("Patched {}", self.path.display());
        }
        Ok(())
    }
}

/// Ordered file patches applied to the unpacked resource container.
#[derive(Debug, Clone, Default)]
pub struct PatchSpec {
    pub files: Vec<FilePatch>,
}

impl PatchSpec {
    /// Rules that point the bundle's resource lookups at the install layout.
    pub fn for_layout(layout: &InstallLayout) -> Result<Self> {
        let lib = format!("'{}'", layout.lib_dir().display());
        let binary = layout.binary().display().to_string();
        let app = layout.app();

        Ok(Self {
            files: vec![
                FilePatch::new(
                    "app_bootstrap/buildInfo.js",
                    vec![Substitution::literal("process.resourcesPath", lib.as_str())],
                ),
                FilePatch::new(
                    "common/paths.js",
                    vec![
                        Substitution::pattern(r"\s*(?:let )?resourcesPath = .*;", "")?,
                        Substitution::literal(
                            "return resourcesPath",
                            format!("return {}", lib),
                        ),
                    ],
                ),
                FilePatch::new(
                    "app_bootstrap/autoStart/linux.js",
                    vec![
                        Substitution::pattern(r"Exec=.*", format!("Exec={}", binary))?,
                        Substitution::pattern(r"Name=.*", format!("Name={}", app))?,
                        Substitution::pattern(r"Icon=.*", format!("Icon={}", app))?,
                    ],
                ),
            ],
        })
    }

    /// Apply every file patch under `base`, stopping at the first failure.
    pub fn apply(&self, base: &Path) -> Result<()> {
        for file in &self.files {
            file.apply(base)?;
        }
        Ok(())
    }
}

/// Rewrite of the bundle's desktop entry for the install layout.
pub fn desktop_entry_patch(layout: &InstallLayout, file_name: &str) -> Result<FilePatch> {
    Ok(FilePatch::new(
        file_name,
        vec![
            Substitution::pattern(r"Exec=.*", format!("Exec={}", layout.binary().display()))?,
            Substitution::pattern(r"Path=.*", format!("Path={}", layout.bin_dir().display()))?,
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout() -> InstallLayout {
        InstallLayout::new("/usr/local", "discord")
    }

    #[test]
    fn literal_counts_matches() {
        let rule = Substitution::literal("a", "b");
        assert_eq!(rule.apply("banana"), ("bbnbnb".to_string(), 3));
    }

    #[test]
    fn pattern_replacement_is_verbatim() {
        let rule = Substitution::pattern(r"Exec=.*", "Exec=$1/bin").unwrap();
        let (out, count) = rule.apply("Exec=/opt/Discord/Discord\nType=Application");
        assert_eq!(out, "Exec=$1/bin\nType=Application");
        assert_eq!(count, 1);
    }

    #[test]
    fn build_info_points_at_lib_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("app_bootstrap")).unwrap();
        fs::write(
            temp.path().join("app_bootstrap/buildInfo.js"),
            "const buildInfo = require(path.join(process.resourcesPath, 'build_info.json'));\n",
        )
        .unwrap();

        PatchSpec::for_layout(&layout()).unwrap().files[0]
            .apply(temp.path())
            .unwrap();

        let text = fs::read_to_string(temp.path().join("app_bootstrap/buildInfo.js")).unwrap();
        assert_eq!(
            text,
            "const buildInfo = require(path.join('/usr/local/lib/discord', 'build_info.json'));\n"
        );
    }

    #[test]
    fn paths_js_drops_assignment_and_returns_lib_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("common")).unwrap();
        let source = "function getResourcesPath() {\n  let resourcesPath = process.resourcesPath;\n  return resourcesPath;\n}\n";
        fs::write(temp.path().join("common/paths.js"), source).unwrap();

        PatchSpec::for_layout(&layout()).unwrap().files[1]
            .apply(temp.path())
            .unwrap();

        let text = fs::read_to_string(temp.path().join("common/paths.js")).unwrap();
        assert_eq!(
            text,
            "function getResourcesPath() {\n  return '/usr/local/lib/discord';\n}\n"
        );
    }

    #[test]
    fn autostart_entry_is_rewritten() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("app_bootstrap/autoStart")).unwrap();
        let source = "const desktopFile = `[Desktop Entry]\nType=Application\nExec=${exePath}\nHidden=false\nName=${appName}\nIcon=${appName}\n`;\n";
        fs::write(temp.path().join("app_bootstrap/autoStart/linux.js"), source).unwrap();

        PatchSpec::for_layout(&layout()).unwrap().files[2]
            .apply(temp.path())
            .unwrap();

        let text =
            fs::read_to_string(temp.path().join("app_bootstrap/autoStart/linux.js")).unwrap();
        assert!(text.contains("Exec=/usr/local/bin/discord\n"));
        assert!(text.contains("Name=discord\n"));
        assert!(text.contains("Icon=discord\n"));
        assert!(text.contains("Hidden=false"));
    }

    #[test]
    fn desktop_entry_uses_layout() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("discord.desktop"),
            "[Desktop Entry]\nName=Discord\nExec=/usr/share/discord/Discord\nPath=/usr/share/discord\n",
        )
        .unwrap();

        desktop_entry_patch(&layout(), "discord.desktop")
            .unwrap()
            .apply(temp.path())
            .unwrap();

        let text = fs::read_to_string(temp.path().join("discord.desktop")).unwrap();
        assert_eq!(
            text,
            "[Desktop Entry]\nName=Discord\nExec=/usr/local/bin/discord\nPath=/usr/local/bin\n"
        );
    }

    #[test]
    fn missing_file_is_patch_error() {
        let temp = TempDir::new().unwrap();
        let err = PatchSpec::for_layout(&layout())
            .unwrap()
            .apply(temp.path())
            .unwrap_err();

        match err {
            RepackError::Patch { path, message } => {
                assert_eq!(path, PathBuf::from("app_bootstrap/buildInfo.js"));
                assert_eq!(message, "file not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unmatched_rule_leaves_file_untouched() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("x.js"), "nothing here\n").unwrap();

        FilePatch::new("x.js", vec![Substitution::literal("absent", "present")])
            .apply(temp.path())
            .unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("x.js")).unwrap(),
            "nothing here\n"
        );
    }
}
