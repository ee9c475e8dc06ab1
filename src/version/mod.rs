//! Version resolution.
//!
//! The latest upstream release is read from the redirect target of the
//! download endpoint; installed versions come from apt.

pub mod info;
pub mod installed;
pub mod resolver;

pub use info::{ReleaseUrlPattern, VersionInfo};
pub use installed::AptQuery;
pub use resolver::{UpdateCheck, VersionResolver};
