//! JSON job store

use super::CopyJob;
use crate::types::MirrorError;
use std::fs;
use std::path::{Path, PathBuf};

/// Read the ordered job list from a JSON store file.
pub fn load_jobs(path: &Path) -> Result<Vec<CopyJob>, MirrorError> {
    let json = fs::read_to_string(path)?;
    let jobs = serde_json::from_str(&json)?;
    Ok(jobs)
}

/// Write the job list to a JSON store file, pretty-printed.
pub fn save_jobs(jobs: &[CopyJob], path: &Path) -> Result<(), MirrorError> {
    let json = serde_json::to_string_pretty(jobs)?;
    fs::write(path, json)?;
    Ok(())
}

/// Starter job list written by `mirrorcp init`.
pub fn seed_jobs() -> Vec<CopyJob> {
    vec![CopyJob {
        name: "example".to_string(),
        source_dir: PathBuf::from("/tmp/mirrorcp/src"),
        dest_dirs: vec![
            PathBuf::from("/tmp/mirrorcp/dest1"),
            PathBuf::from("/tmp/mirrorcp/dest2"),
        ],
        ignore_pattern: Some("ignore1|ignore2|ignore\\.txt".to_string()),
        backup_dir: PathBuf::from("/tmp/mirrorcp/backup"),
        always_backup: false,
    }]
}
