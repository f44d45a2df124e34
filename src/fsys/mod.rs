//! Filesystem capability
//!
//! All core components take their filesystem access through the [`FileSystem`]
//! trait so the filtering, replication, and backup logic can be exercised
//! against an in-memory tree in tests. [`RealFileSystem`] is the on-disk
//! implementation used by the CLI.

mod mem;
mod real;

pub use mem::MemFileSystem;
pub use real::RealFileSystem;

use crate::types::{FsEntry, MirrorError};
use std::path::Path;

/// Filesystem operations required by the core.
pub trait FileSystem: Send + Sync {
    /// Recursively list every file and directory beneath `root`, excluding
    /// `root` itself. The listing is a snapshot; hidden files are included
    /// and no ignore-file semantics apply.
    fn list_recursive(&self, root: &Path) -> Result<Vec<FsEntry>, MirrorError>;

    /// Test whether `path` exists and is a directory.
    fn dir_exists(&self, path: &Path) -> bool;

    /// Create a directory and all missing ancestors. Idempotent.
    fn create_dir_all(&self, path: &Path) -> Result<(), MirrorError>;

    /// Copy a file's bytes to `dest`, overwriting an existing file.
    /// The destination's parent directory must already exist.
    fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64, MirrorError>;
}

/// Case-insensitive node identity key for a path.
///
/// Two entries are the same filesystem node when their keys are equal;
/// trailing separators do not change identity.
pub fn path_key(path: &Path) -> String {
    let lowered = path.to_string_lossy().to_lowercase();
    let trimmed = lowered.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
