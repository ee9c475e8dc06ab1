//! Archive cache keyed by release.

use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;
use crate::version::VersionInfo;

use super::download::Downloader;

/// Outcome of [`ArchiveCache::ensure_local`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLookup {
    /// Local path of the archive.
    pub path: PathBuf,

    /// Whether the archive was downloaded by this call.
    pub downloaded: bool,
}

/// A cached archive on disk.
#[derive(Debug, Clone)]
pub struct CachedArchive {
    /// File name, e.g. `discord-0.0.51.tar.gz`.
    pub file_name: String,

    /// Full path.
    pub path: PathBuf,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time.
    pub modified: Option<DateTime<Local>>,
}

impl CachedArchive {
    /// Size as a human-readable string.
    pub fn size_display(&self) -> String {
        format_size(self.size)
    }
}

/// Archive cache rooted at a directory.
///
/// One file per release, named after the archive. Partial downloads carry a
/// `.part` suffix and are never treated as entries.
pub struct ArchiveCache {
    root: PathBuf,
    downloader: Box<dyn Downloader>,
}

impl ArchiveCache {
    /// Create a cache at `root` that fetches misses with `downloader`.
    pub fn new(root: impl Into<PathBuf>, downloader: Box<dyn Downloader>) -> Self {
        Self {
            root: root.into(),
            downloader,
        }
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an archive for `info` lives at.
    pub fn entry_path(&self, info: &VersionInfo) -> PathBuf {
        self.root.join(&info.archive_filename)
    }

    /// Whether `info` is cached.
    pub fn contains(&self, info: &VersionInfo) -> bool {
        self.entry_path(info).is_file()
    }

    /// Return the local archive for `info`, downloading it on a miss.
    pub fn ensure_local(&self, info: &VersionInfo) -> Result<CacheLookup> {
        let path = self.entry_path(info);
        if path.is_file() {
            debug!("Cache hit: {}", path.display());
            return Ok(CacheLookup {
                path,
                downloaded: false,
            });
        }

        fs::create_dir_all(&self.root)?;
        info!("Downloading {}", info.download_url);
        self.downloader.download(&info.download_url, &path)?;

        Ok(CacheLookup {
            path,
            downloaded: true,
        })
    }

    /// Delete the entry for `info`. Returns whether a file was removed.
    pub fn remove(&self, info: &VersionInfo) -> Result<bool> {
        let path = self.entry_path(info);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the cache directory if it is empty.
    pub fn prune(&self) -> Result<bool> {
        let Ok(mut entries) = fs::read_dir(&self.root) else {
            return Ok(false);
        };
        if entries.next().is_some() {
            return Ok(false);
        }
        fs::remove_dir(&self.root)?;
        debug!("Removed empty cache directory {}", self.root.display());
        Ok(true)
    }

    /// List cached archives, sorted by file name.
    pub fn list(&self) -> Result<Vec<CachedArchive>> {
        let read = match fs::read_dir(&self.root) {
            Ok(read) => read,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut archives = Vec::new();
        for entry in read {
            let entry = entry?;
            let metadata = entry.metadata()?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if !metadata.is_file() || file_name.ends_with(".part") {
                continue;
            }
            archives.push(CachedArchive {
                file_name,
                path: entry.path(),
                size: metadata.len(),
                modified: metadata.modified().ok().map(DateTime::<Local>::from),
            });
        }

        archives.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(archives)
    }

    /// Delete every cached file, including partial downloads.
    ///
    /// Returns the number of files removed.
    pub fn clear(&self) -> Result<usize> {
        let files = self.files()?;
        for path in &files {
            fs::remove_file(path)?;
        }
        self.prune()?;
        Ok(files.len())
    }

    /// Number of files [`ArchiveCache::clear`] would remove.
    pub fn file_count(&self) -> Result<usize> {
        Ok(self.files()?.len())
    }

    fn files(&self) -> Result<Vec<PathBuf>> {
        let read = match fs::read_dir(&self.root) {
            Ok(read) => read,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in read {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        Ok(files)
    }
}

/// Format a byte count for display.
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;

    let b = bytes as f64;
    if b >= MIB {
        format!("{:.1} MiB", b / MIB)
    } else if b >= KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepackError;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct FakeDownloader {
        count: Rc<Cell<usize>>,
    }

    impl Downloader for FakeDownloader {
        fn download(&self, _url: &str, dest: &Path) -> Result<u64> {
            self.count.set(self.count.get() + 1);
            fs::write(dest, b"tarball")?;
            Ok(7)
        }
    }

    struct FailingDownloader;

    impl Downloader for FailingDownloader {
        fn download(&self, url: &str, _dest: &Path) -> Result<u64> {
            Err(RepackError::Http {
                url: url.to_string(),
                message: "HTTP 500".to_string(),
            })
        }
    }

    fn info(version: &str) -> VersionInfo {
        VersionInfo {
            download_url: format!("https://x/discord-{version}.tar.gz"),
            archive_filename: format!("discord-{version}.tar.gz"),
            app_name: "discord".to_string(),
            version: version.to_string(),
        }
    }

    fn cache(root: &Path) -> (ArchiveCache, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let downloader = FakeDownloader {
            count: Rc::clone(&count),
        };
        (ArchiveCache::new(root, Box::new(downloader)), count)
    }

    #[test]
    fn second_lookup_does_not_download() {
        let temp = TempDir::new().unwrap();
        let (cache, count) = cache(&temp.path().join("archives"));

        let first = cache.ensure_local(&info("0.0.51")).unwrap();
        let second = cache.ensure_local(&info("0.0.51")).unwrap();

        assert!(first.downloaded);
        assert!(!second.downloaded);
        assert_eq!(first.path, second.path);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn cache_dir_is_created_lazily() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("archives");
        let (cache, _) = cache(&root);

        assert!(!root.exists());
        cache.ensure_local(&info("0.0.51")).unwrap();
        assert!(root.join("discord-0.0.51.tar.gz").is_file());
    }

    #[test]
    fn failed_download_leaves_no_entry() {
        let temp = TempDir::new().unwrap();
        let cache = ArchiveCache::new(temp.path(), Box::new(FailingDownloader));

        assert!(cache.ensure_local(&info("0.0.51")).is_err());
        assert!(!cache.contains(&info("0.0.51")));
    }

    #[test]
    fn remove_then_prune() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("archives");
        let (cache, _) = cache(&root);

        cache.ensure_local(&info("0.0.51")).unwrap();
        assert!(cache.remove(&info("0.0.51")).unwrap());
        assert!(!cache.remove(&info("0.0.51")).unwrap());
        assert!(cache.prune().unwrap());
        assert!(!root.exists());
    }

    #[test]
    fn prune_keeps_non_empty_dir() {
        let temp = TempDir::new().unwrap();
        let (cache, _) = cache(temp.path());

        cache.ensure_local(&info("0.0.50")).unwrap();
        assert!(!cache.prune().unwrap());
        assert!(temp.path().exists());
    }

    #[test]
    fn list_skips_partial_downloads() {
        let temp = TempDir::new().unwrap();
        let (cache, _) = cache(temp.path());

        cache.ensure_local(&info("0.0.51")).unwrap();
        cache.ensure_local(&info("0.0.50")).unwrap();
        fs::write(temp.path().join("discord-0.0.52.tar.gz.part"), b"half").unwrap();

        let names: Vec<_> = cache
            .list()
            .unwrap()
            .into_iter()
            .map(|a| a.file_name)
            .collect();
        assert_eq!(names, vec!["discord-0.0.50.tar.gz", "discord-0.0.51.tar.gz"]);
    }

    #[test]
    fn list_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let (cache, _) = cache(&temp.path().join("nope"));
        assert!(cache.list().unwrap().is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("archives");
        let (cache, _) = cache(&root);

        cache.ensure_local(&info("0.0.51")).unwrap();
        fs::write(root.join("discord-0.0.52.tar.gz.part"), b"half").unwrap();

        assert_eq!(cache.file_count().unwrap(), 2);
        assert_eq!(cache.clear().unwrap(), 2);
        assert!(!root.exists());
        assert_eq!(cache.file_count().unwrap(), 0);
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(80 * 1024 * 1024), "80.0 MiB");
    }
}
