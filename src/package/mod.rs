//! Debian package assembly.
//!
//! # Modules
//!
//! - [`assembler`] - Staging tree layout and `dpkg-deb` invocation
//! - [`launcher`] - Launcher script rendering
//! - [`template`] - `DEBIAN/` metadata template rendering
//! - [`tree`] - Tree copies and content digests

pub mod assembler;
pub mod launcher;
pub mod template;
pub mod tree;

pub use assembler::{BuiltPackage, PackageAssembler};
pub use launcher::render_launcher;
pub use template::{TemplateSource, TemplateVars};
pub use tree::{copy_tree, scratch_dir, tree_digest};
