//! Job configuration

mod cli;
mod store;

pub use cli::{Cli, Command};
pub use store::{load_jobs, save_jobs, seed_jobs};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named mirroring job.
///
/// Field names are serialized in the PascalCase form the original JSON job
/// files used, so existing stores keep loading unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CopyJob {
    /// Job identifier shown in listings and selected on the command line.
    pub name: String,

    /// Directory tree to replicate.
    pub source_dir: PathBuf,

    /// Destination trees, each receiving a full copy of the source.
    pub dest_dirs: Vec<PathBuf>,

    /// Regular-expression fragment matched (anchored) against paths
    /// relative to the source root; matches are excluded from the copy.
    /// Absent or empty excludes nothing.
    #[serde(default)]
    pub ignore_pattern: Option<String>,

    /// Parent directory receiving timestamped destination snapshots.
    pub backup_dir: PathBuf,

    /// Take a backup unconditionally before copying.
    #[serde(default)]
    pub always_backup: bool,
}
