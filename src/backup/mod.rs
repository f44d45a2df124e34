//! Destination snapshots
//!
//! Before a mirroring run overwrites a destination, its entire current
//! contents can be copied into a timestamped subdirectory of the backup
//! root. Backups never apply the job's ignore pattern.

use crate::config::CopyJob;
use crate::fsys::FileSystem;
use crate::replicate::Replicator;
use crate::types::MirrorError;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Naming function for backup subdirectories: original base name plus the
/// phase's capture timestamp.
pub type BackupNamer = Arc<dyn Fn(&str, DateTime<Utc>) -> String + Send + Sync>;

/// Default backup folder name: `yyyy-MM-dd_HH-mm-ss_<originalName>`.
pub fn default_backup_name(original_name: &str, stamp: DateTime<Utc>) -> String {
    format!("{}_{}", stamp.format("%Y-%m-%d_%H-%M-%S"), original_name)
}

/// Snapshots destination trees under a shared backup root.
pub struct Snapshotter {
    fs: Arc<dyn FileSystem>,
    namer: BackupNamer,
}

impl Snapshotter {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            namer: Arc::new(default_backup_name),
        }
    }

    /// Replace the backup folder naming function (tests inject a
    /// timestamp-free namer to get deterministic paths).
    pub fn with_namer(mut self, namer: BackupNamer) -> Self {
        self.namer = namer;
        self
    }

    /// Snapshot every destination of `job` into `job.backup_dir`.
    ///
    /// One UTC capture timestamp is taken per invocation and shared by all
    /// destinations, so a single call yields one timestamp prefix.
    pub fn backup(&self, job: &CopyJob) -> Result<(), MirrorError> {
        let stamp = Utc::now();
        for dest_dir in &job.dest_dirs {
            self.backup_one(dest_dir, &job.backup_dir, stamp)?;
        }
        Ok(())
    }

    fn backup_one(
        &self,
        source: &Path,
        backup_root: &Path,
        stamp: DateTime<Utc>,
    ) -> Result<(), MirrorError> {
        let base_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                MirrorError::Config(format!("backup source has no base name: {}", source.display()))
            })?;

        let backup_path = backup_root.join((self.namer)(&base_name, stamp));
        info!(source = %source.display(), backup = %backup_path.display(), "snapshotting destination");

        self.fs.create_dir_all(&backup_path)?;
        Replicator::new(Arc::clone(&self.fs)).copy_tree(source, &backup_path, None)
    }
}
