//! The `run` command: execute one named job

use crate::config::{load_jobs, CopyJob};
use crate::executor::{Executor, RunHooks};
use crate::fsys::RealFileSystem;
use crate::ui::{confirm, PhaseReporter};
use anyhow::{bail, Context};
use console::{style, Term};
use std::path::Path;
use std::sync::Arc;

/// How the backup decision is made for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupChoice {
    /// Prompt on the terminal (unless the job forces a backup).
    Ask,
    /// Take a backup without asking.
    Always,
    /// Skip the backup without asking.
    Never,
}

pub fn run(store_path: &Path, name: &str, backup: BackupChoice, yes: bool) -> anyhow::Result<()> {
    let jobs = load_jobs(store_path)
        .with_context(|| format!("loading job store {}", store_path.display()))?;
    let job = jobs
        .iter()
        .find(|job| job.name == name)
        .with_context(|| format!("no job named '{name}' in {}", store_path.display()))?;

    let term = Term::stdout();
    print_job(&term, job)?;

    if !yes && !confirm(&term, "Proceed (y/n)? ")? {
        return Ok(());
    }

    let hooks = RunHooks {
        backup_decision: match backup {
            BackupChoice::Always => Some(Box::new(|| true)),
            BackupChoice::Never => None,
            BackupChoice::Ask => Some(Box::new(|| {
                confirm(&Term::stdout(), "Create backup (y/n)? ").unwrap_or(false)
            })),
        },
        backup: PhaseReporter::new("Creating backup").into_hooks(),
        copy: PhaseReporter::new("Copying files").into_hooks(),
    };

    let executor = Executor::new(Arc::new(RealFileSystem::new()))?;
    let outcome = executor.execute(Some(job), &hooks);

    if outcome.success {
        term.write_line(&format!("{}", style("Copy operation successful!").green()))?;
        Ok(())
    } else {
        bail!("Copy operation failed! Message: {}", outcome.message);
    }
}

fn print_job(term: &Term, job: &CopyJob) -> std::io::Result<()> {
    term.write_line(&format!("Name: {}", style(&job.name).bold()))?;
    term.write_line(&format!("Source dir: {}", job.source_dir.display()))?;
    for dest_dir in &job.dest_dirs {
        term.write_line(&format!("Dest dir: {}", dest_dir.display()))?;
    }
    term.write_line(&format!(
        "Ignore pattern: {}",
        job.ignore_pattern.as_deref().unwrap_or("<none>")
    ))?;
    term.write_line(&format!("Backup dir: {}", job.backup_dir.display()))?;
    term.write_line(&format!("Always backup: {}", job.always_backup))?;
    Ok(())
}
