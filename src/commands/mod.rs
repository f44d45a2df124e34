//! Front-end commands

pub mod run;

pub use run::{run, BackupChoice};

use crate::config::{load_jobs, save_jobs, seed_jobs};
use anyhow::{bail, Context};
use console::style;
use std::path::Path;

/// List the jobs defined in the store.
pub fn list(store_path: &Path) -> anyhow::Result<()> {
    let jobs = load_jobs(store_path)
        .with_context(|| format!("loading job store {}", store_path.display()))?;

    if jobs.is_empty() {
        println!("No jobs defined in {}", store_path.display());
        return Ok(());
    }

    for job in &jobs {
        println!(
            "{}  {} -> {} destination(s){}",
            style(&job.name).bold(),
            job.source_dir.display(),
            job.dest_dirs.len(),
            if job.always_backup {
                " [always backup]"
            } else {
                ""
            }
        );
    }
    Ok(())
}

/// Write a starter job store.
pub fn init(store_path: &Path, force: bool) -> anyhow::Result<()> {
    if store_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            store_path.display()
        );
    }

    save_jobs(&seed_jobs(), store_path)
        .with_context(|| format!("writing job store {}", store_path.display()))?;
    println!("Wrote starter job store to {}", store_path.display());
    Ok(())
}
