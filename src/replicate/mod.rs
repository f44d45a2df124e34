//! Tree replication
//!
//! Materializes a filtered copy set under a destination root. Entries are
//! fanned out across a rayon pool; destination paths are disjoint per entry
//! and directory creation is idempotent, so no ordering is imposed between
//! tasks. File tasks create their own destination parent chain instead of
//! relying on the directory tasks having run first.

use crate::filter::select_entries;
use crate::fsys::FileSystem;
use crate::types::{FsEntry, MirrorError};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Copies a source tree's selected entries into a destination tree.
pub struct Replicator {
    fs: Arc<dyn FileSystem>,
}

impl Replicator {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Replicate `source_root` into `dest_root`, excluding entries matched
    /// by `ignore_pattern`. Existing destination files are overwritten;
    /// destination entries outside the copy set are left untouched.
    pub fn copy_tree(
        &self,
        source_root: &Path,
        dest_root: &Path,
        ignore_pattern: Option<&str>,
    ) -> Result<(), MirrorError> {
        let entries = select_entries(self.fs.as_ref(), source_root, ignore_pattern)?;
        debug!(
            source = %source_root.display(),
            dest = %dest_root.display(),
            entries = entries.len(),
            "replicating tree"
        );

        entries
            .par_iter()
            .try_for_each(|entry| self.copy_entry(source_root, dest_root, entry))
    }

    fn copy_entry(
        &self,
        source_root: &Path,
        dest_root: &Path,
        entry: &FsEntry,
    ) -> Result<(), MirrorError> {
        let dest_path = dest_root.join(entry.relative_to(source_root));
        match entry {
            FsEntry::Dir(_) => self.fs.create_dir_all(&dest_path),
            FsEntry::File(path) => {
                if let Some(parent) = dest_path.parent() {
                    self.fs.create_dir_all(parent)?;
                }
                self.fs.copy_file(path, &dest_path)?;
                Ok(())
            }
        }
    }
}
