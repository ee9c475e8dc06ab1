//! Resumable archive downloads.
//!
//! Data is streamed into `<dest>.part`. When a partial file already exists
//! the request carries `Range: bytes=<len>-`; a `206` reply is appended, any
//! other success restarts the file. A `416` whose `Content-Range` total
//! equals the partial length means the partial already holds the whole
//! archive; any other `416` discards the partial and starts over. The partial
//! file is renamed into place only once the body has been read completely.

use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::{CONTENT_RANGE, RANGE};
use reqwest::StatusCode;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{RepackError, Result};
use crate::ui::download_bar;

/// Capability for fetching a URL into a local file.
pub trait Downloader {
    /// Download `url` to `dest`, returning the final file size.
    ///
    /// `dest` must not exist until the download has fully completed.
    fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Path of the in-progress file for `dest`.
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// HTTP downloader over reqwest's blocking client.
pub struct HttpDownloader {
    client: Client,
    show_progress: bool,
}

impl HttpDownloader {
    /// Create a downloader using `client`.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            show_progress: false,
        }
    }

    /// Draw a progress bar while downloading.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        let part = partial_path(dest);
        let resume_from = fs::metadata(&part).map(|m| m.len()).unwrap_or(0);

        let mut request = self.client.get(url);
        if resume_from > 0 {
            debug!("Resuming {} from byte {}", part.display(), resume_from);
            request = request.header(RANGE, format!("bytes={}-", resume_from));
        }

        let response = request.send().map_err(|e| RepackError::http(url, e))?;
        let status = response.status();
        if resume_from > 0 && status == StatusCode::RANGE_NOT_SATISFIABLE {
            if unsatisfiable_total(&response) == Some(resume_from) {
                debug!("{} is already complete", part.display());
                fs::rename(&part, dest)?;
                return Ok(resume_from);
            }
            debug!("Discarding unusable partial {}", part.display());
            fs::remove_file(&part)?;
            return self.download(url, dest);
        }
        if !status.is_success() {
            return Err(RepackError::Http {
                url: url.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let appending = resume_from > 0 && status == StatusCode::PARTIAL_CONTENT;
        let (file, offset) = if appending {
            (OpenOptions::new().append(true).open(&part)?, resume_from)
        } else {
            if resume_from > 0 {
                debug!("Server ignored range request, restarting download");
            }
            (File::create(&part)?, 0)
        };

        let total = response.content_length().map(|len| len + offset);
        let bar = download_bar(total, self.show_progress);
        bar.set_position(offset);

        let mut writer = BufWriter::new(file);
        let mut reader = bar.wrap_read(response);
        io::copy(&mut reader, &mut writer).map_err(|e| RepackError::Http {
            url: url.to_string(),
            message: format!("download interrupted: {}", e),
        })?;
        writer.flush()?;
        bar.finish_and_clear();

        fs::rename(&part, dest)?;
        let size = fs::metadata(dest)?.len();
        debug!("Downloaded {} ({} bytes)", dest.display(), size);
        Ok(size)
    }
}

/// Total length from a `Content-Range: bytes */<len>` header.
fn unsatisfiable_total(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_RANGE)?
        .to_str()
        .ok()?
        .trim()
        .strip_prefix("bytes */")?
        .parse()
        .ok()
}
