//! Bundle resource patching.
//!
//! The vendor bundle hard-codes lookups relative to its own location. The
//! [`ResourcePatcher`] rewrites the desktop entry, unpacks the resource
//! container, applies a fixed [`PatchSpec`] and repacks it.

pub mod container;
pub mod patcher;
pub mod rules;

pub use patcher::ResourcePatcher;
pub use rules::{desktop_entry_patch, FilePatch, PatchSpec, Substitution};
