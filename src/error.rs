//! Error types for update-discord operations.
//!
//! This module defines [`RepackError`], the primary error type used throughout
//! the pipeline, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every fatal condition maps to a distinct `RepackError` variant
//! - `UserDeclined` is a clean abort, not a failure (see [`RepackError::is_declined`])
//! - Use `anyhow::Error` (via `RepackError::Other`) for unexpected errors
//! - Nothing is retried and nothing is swallowed

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for update-discord operations.
#[derive(Debug, Error)]
pub enum RepackError {
    /// The upstream endpoint did not redirect to a versioned archive URL.
    #[error("Unexpected download URL (expected <name>-<major>.<minor>.<patch>.tar.gz): {url}")]
    Resolution { url: String },

    /// An external tool exited with a nonzero status or could not be started.
    #[error("Command failed with exit code {code:?}: {command}")]
    ToolInvocation {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The resource container could not be unpacked.
    #[error("Failed to unpack {} (exit code {code:?})", archive.display())]
    Unpack { archive: PathBuf, code: Option<i32> },

    /// An interactive confirmation was rejected.
    #[error("Cancelled: {question}")]
    UserDeclined { question: String },

    /// A network request failed.
    #[error("Request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// A bundle resource could not be patched.
    #[error("Failed to patch {}: {message}", path.display())]
    Patch { path: PathBuf, message: String },

    /// The extracted archive does not look like a vendor bundle.
    #[error("Unexpected bundle layout in {}: {message}", path.display())]
    BundleLayout { path: PathBuf, message: String },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config at {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepackError {
    /// Whether this error is a user declining a confirmation.
    pub fn is_declined(&self) -> bool {
        matches!(self, RepackError::UserDeclined { .. })
    }

    /// Build an HTTP error from a reqwest failure.
    pub fn http(url: &str, err: reqwest::Error) -> Self {
        RepackError::Http {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for update-discord operations.
pub type Result<T> = std::result::Result<T, RepackError>;
