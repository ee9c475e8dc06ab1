//! Staging tree helpers: copies and content digests.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::error::Result;

/// Create a scoped temporary directory, under `parent` when given.
///
/// The directory is removed when the returned value is dropped.
pub fn scratch_dir(parent: Option<&Path>, prefix: &str) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(prefix);
    let dir = match parent {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            builder.tempdir_in(parent)?
        }
        None => builder.tempdir()?,
    };
    Ok(dir)
}

/// Recursively copy `src` into `dst`, preserving file modes.
///
/// `dst` is created if missing; existing files are overwritten.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<u64> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;

    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(anyhow::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(anyhow::Error::from)?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copy one file, creating parent directories. `fs::copy` keeps the mode.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

/// Content digest of a directory tree.
///
/// Covers every file's relative path, permission bits and bytes, in sorted
/// path order. Timestamps and ownership are ignored.
pub fn tree_digest(root: &Path) -> Result<String> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(anyhow::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(anyhow::Error::from)?
            .to_string_lossy()
            .replace('\\', "/");
        let mode = file_mode(entry.path())?;
        let content = Sha256::digest(fs::read(entry.path())?);
        files.push((rel, mode, hex::encode(&content[..])));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut hasher = Sha256::new();
    for (path, mode, checksum) in &files {
        hasher.update(format!("{}:{:o}:{}\n", path, mode, checksum).as_bytes());
    }
    let digest = hasher.finalize();
    Ok(format!("sha256:{}", hex::encode(&digest[..])))
}

#[cfg(unix)]
fn file_mode(path: &Path) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::metadata(path)?.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> Result<u32> {
    Ok(0o644)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populate(root: &Path) {
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/one.txt"), "one").unwrap();
        fs::write(root.join("a/b/two.txt"), "two").unwrap();
    }

    #[test]
    fn scratch_dir_is_removed_on_drop() {
        let temp = TempDir::new().unwrap();
        let parent = temp.path().join("work");

        let scratch = scratch_dir(Some(&parent), "update-discord-").unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.starts_with(&parent));
        assert!(path.is_dir());

        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn copy_tree_copies_nested_files() {
        let temp = TempDir::new().unwrap();
        populate(&temp.path().join("src"));

        let copied = copy_tree(&temp.path().join("src"), &temp.path().join("dst")).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(temp.path().join("dst/a/b/two.txt")).unwrap(),
            "two"
        );
    }

    #[test]
    fn digest_is_stable_across_copies() {
        let temp = TempDir::new().unwrap();
        populate(&temp.path().join("src"));
        copy_tree(&temp.path().join("src"), &temp.path().join("dst")).unwrap();

        let a = tree_digest(&temp.path().join("src")).unwrap();
        let b = tree_digest(&temp.path().join("dst")).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("sha256:"));
    }

    #[test]
    fn digest_changes_with_content() {
        let temp = TempDir::new().unwrap();
        populate(temp.path());
        let before = tree_digest(temp.path()).unwrap();

        fs::write(temp.path().join("a/one.txt"), "uno").unwrap();
        assert_ne!(before, tree_digest(temp.path()).unwrap());
    }

    #[test]
    fn digest_changes_with_path() {
        let temp = TempDir::new().unwrap();
        populate(temp.path());
        let before = tree_digest(temp.path()).unwrap();

        fs::rename(temp.path().join("a/one.txt"), temp.path().join("a/uno.txt")).unwrap();
        assert_ne!(before, tree_digest(temp.path()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn digest_covers_modes() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        populate(temp.path());
        let before = tree_digest(temp.path()).unwrap();

        fs::set_permissions(
            temp.path().join("a/one.txt"),
            fs::Permissions::from_mode(0o755),
        )
        .unwrap();
        assert_ne!(before, tree_digest(temp.path()).unwrap());
    }
}
