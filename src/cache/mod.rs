//! Local cache of downloaded release archives.
//!
//! Archives are stored as `<cache_dir>/<name>-<version>.tar.gz`; a file's
//! presence means the release has been downloaded. Downloads go through the
//! [`Downloader`] capability so tests can count or fake them.

pub mod download;
pub mod store;

pub use download::{partial_path, Downloader, HttpDownloader};
pub use store::{format_size, ArchiveCache, CacheLookup, CachedArchive};
