//! Package metadata (`DEBIAN/`) template rendering.

use include_dir::{include_dir, Dir, DirEntry};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{PACKAGE_PLACEHOLDER, VERSION_PLACEHOLDER};
use crate::error::{RepackError, Result};

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Maintainer scripts that must be executable.
const MAINTAINER_SCRIPTS: &[&str] = &["preinst", "postinst", "prerm", "postrm", "config"];

/// Values substituted into template files.
#[derive(Debug, Clone)]
pub struct TemplateVars {
    /// Replaces `__PACKAGE__`.
    pub package: String,

    /// Replaces `__VERSION__`.
    pub version: String,
}

impl TemplateVars {
    /// Replace every placeholder in `text`.
    pub fn render(&self, text: &str) -> String {
        text.replace(VERSION_PLACEHOLDER, &self.version)
            .replace(PACKAGE_PLACEHOLDER, &self.package)
    }

    fn render_bytes(&self, bytes: &[u8]) -> Vec<u8> {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.render(text).into_bytes(),
            Err(_) => bytes.to_vec(),
        }
    }
}

/// Where the `DEBIAN/` template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The template compiled into the binary.
    Embedded,

    /// A directory on disk whose contents become `DEBIAN/`.
    Directory(PathBuf),
}

impl TemplateSource {
    /// Source for an optional configured directory.
    pub fn from_config(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => TemplateSource::Directory(dir.to_path_buf()),
            None => TemplateSource::Embedded,
        }
    }

    /// Render the template into `dest` (the staging `DEBIAN` directory).
    pub fn render_into(&self, dest: &Path, vars: &TemplateVars) -> Result<()> {
        fs::create_dir_all(dest)?;
        match self {
            TemplateSource::Embedded => {
                let dir = TEMPLATES_DIR.get_dir("DEBIAN").ok_or_else(|| {
                    anyhow::anyhow!("embedded templates are missing the DEBIAN directory")
                })?;
                render_embedded(dir, Path::new("DEBIAN"), dest, vars)
            }
            TemplateSource::Directory(src) => render_directory(src, dest, vars),
        }
    }
}

fn render_embedded(dir: &Dir<'_>, base: &Path, dest: &Path, vars: &TemplateVars) -> Result<()> {
    for entry in dir.entries() {
        let rel = entry
            .path()
            .strip_prefix(base)
            .map_err(anyhow::Error::from)?;
        let target = dest.join(rel);
        match entry {
            DirEntry::Dir(sub) => {
                fs::create_dir_all(&target)?;
                render_embedded(sub, base, dest, vars)?;
            }
            DirEntry::File(file) => {
                fs::write(&target, vars.render_bytes(file.contents()))?;
                set_mode(&target, default_mode(&target))?;
            }
        }
    }
    Ok(())
}

fn render_directory(src: &Path, dest: &Path, vars: &TemplateVars) -> Result<()> {
    if !src.is_dir() {
        return Err(RepackError::ConfigValidation {
            message: format!("template_dir {} is not a directory", src.display()),
        });
    }

    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(anyhow::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(anyhow::Error::from)?;
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            let bytes = fs::read(entry.path())?;
            fs::write(&target, vars.render_bytes(&bytes))?;
            let metadata = entry.metadata().map_err(anyhow::Error::from)?;
            fs::set_permissions(&target, metadata.permissions())?;
        }
    }
    Ok(())
}

fn default_mode(path: &Path) -> u32 {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if MAINTAINER_SCRIPTS.contains(&name) {
        0o755
    } else {
        0o644
    }
}

#[cfg(unix)]
pub(crate) fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vars() -> TemplateVars {
        TemplateVars {
            package: "discord-electron".to_string(),
            version: "0.0.51".to_string(),
        }
    }

    #[test]
    fn render_replaces_every_placeholder() {
        assert_eq!(
            vars().render("Package: __PACKAGE__\nVersion: __VERSION__\nX: __VERSION__"),
            "Package: discord-electron\nVersion: 0.0.51\nX: 0.0.51"
        );
    }

    #[test]
    fn embedded_template_renders_control() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("DEBIAN");
        TemplateSource::Embedded.render_into(&dest, &vars()).unwrap();

        let control = fs::read_to_string(dest.join("control")).unwrap();
        assert!(control.contains("Package: discord-electron\n"));
        assert!(control.contains("Version: 0.0.51\n"));
        assert!(!control.contains("__"));
    }

    #[cfg(unix)]
    #[test]
    fn directory_template_preserves_modes() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let src = temp.path().join("tpl");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("control"), "Version: __VERSION__\n").unwrap();
        fs::write(src.join("postinst"), "#!/bin/sh\necho __PACKAGE__\n").unwrap();
        set_mode(&src.join("postinst"), 0o755).unwrap();

        let dest = temp.path().join("DEBIAN");
        TemplateSource::Directory(src)
            .render_into(&dest, &vars())
            .unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("control")).unwrap(),
            "Version: 0.0.51\n"
        );
        assert_eq!(
            fs::read_to_string(dest.join("postinst")).unwrap(),
            "#!/bin/sh\necho discord-electron\n"
        );
        let mode = fs::metadata(dest.join("postinst")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn missing_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        let err = TemplateSource::Directory(temp.path().join("nope"))
            .render_into(&temp.path().join("DEBIAN"), &vars())
            .unwrap_err();
        assert!(matches!(err, RepackError::ConfigValidation { .. }));
    }

    #[test]
    fn from_config_picks_source() {
        assert_eq!(TemplateSource::from_config(None), TemplateSource::Embedded);
        assert_eq!(
            TemplateSource::from_config(Some(Path::new("/etc/tpl"))),
            TemplateSource::Directory(PathBuf::from("/etc/tpl"))
        );
    }

    #[test]
    fn maintainer_scripts_are_executable() {
        assert_eq!(default_mode(Path::new("DEBIAN/postinst")), 0o755);
        assert_eq!(default_mode(Path::new("DEBIAN/control")), 0o644);
    }
}
