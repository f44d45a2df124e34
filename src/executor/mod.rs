//! Execution coordinator
//!
//! Validates a job, decides whether a backup snapshot runs, and drives the
//! backup and copy phases as single units of work on a tokio blocking task.
//! While a unit of work is outstanding the caller's lifecycle hooks receive
//! a tick per poll interval; `on_start` fires exactly once before the work
//! and `on_end` exactly once after it, but only if the work succeeded.

use crate::backup::{BackupNamer, Snapshotter};
use crate::config::CopyJob;
use crate::fsys::FileSystem;
use crate::replicate::Replicator;
use crate::types::MirrorError;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::{info, warn};

/// Poll interval between tick callbacks while a phase is outstanding.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Caller-supplied backup decision predicate.
pub type DecisionHook = Box<dyn Fn() -> bool + Send + Sync>;

/// Caller-supplied lifecycle notification.
pub type LifecycleHook = Box<dyn Fn() + Send + Sync>;

/// Start/tick/end hooks for one phase. All optional.
#[derive(Default)]
pub struct PhaseHooks {
    pub on_start: Option<LifecycleHook>,
    pub on_tick: Option<LifecycleHook>,
    pub on_end: Option<LifecycleHook>,
}

/// All hooks for one run.
///
/// `backup_decision` is only consulted when the job does not force a backup
/// via `always_backup`; without a hook, no backup is taken.
#[derive(Default)]
pub struct RunHooks {
    pub backup_decision: Option<DecisionHook>,
    pub backup: PhaseHooks,
    pub copy: PhaseHooks,
}

/// Result of one run: a success flag and a human-readable message,
/// empty on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    fn ok() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Coordinates validation, backup, and copy for one job at a time.
pub struct Executor {
    fs: Arc<dyn FileSystem>,
    namer: Option<BackupNamer>,
    tick_interval: Duration,
    runtime: Runtime,
}

impl Executor {
    pub fn new(fs: Arc<dyn FileSystem>) -> Result<Self, MirrorError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("mirrorcp-worker")
            .enable_all()
            .build()
            .map_err(MirrorError::Io)?;

        Ok(Self {
            fs,
            namer: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            runtime,
        })
    }

    /// Replace the backup folder naming function.
    pub fn with_backup_namer(mut self, namer: BackupNamer) -> Self {
        self.namer = Some(namer);
        self
    }

    /// Replace the tick poll interval (tests shorten it).
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Run one job end to end.
    ///
    /// Short-circuits on the first failure: validation reports a specific
    /// message with zero filesystem writes, a failed backup skips the copy
    /// phase entirely, and a failed copy reports a copy error. No phase is
    /// retried.
    pub fn execute(&self, job: Option<&CopyJob>, hooks: &RunHooks) -> Outcome {
        let job = match self.validate(job) {
            Ok(job) => job,
            Err(message) => return Outcome::failed(message),
        };

        let wants_backup = job.always_backup
            || hooks
                .backup_decision
                .as_ref()
                .map(|decide| decide())
                .unwrap_or(false);

        if wants_backup {
            let snapshotter = self.snapshotter();
            let backup_job = job.clone();
            let backup_ok =
                self.run_phase(&hooks.backup, move || snapshotter.backup(&backup_job));
            if !backup_ok {
                return Outcome::failed("Error while doing backup.");
            }
        }

        let replicator = Replicator::new(Arc::clone(&self.fs));
        let copy_job = job.clone();
        let copy_ok = self.run_phase(&hooks.copy, move || {
            for dest_dir in &copy_job.dest_dirs {
                replicator.copy_tree(
                    &copy_job.source_dir,
                    dest_dir,
                    copy_job.ignore_pattern.as_deref(),
                )?;
            }
            Ok(())
        });
        if !copy_ok {
            return Outcome::failed("Error while copying files.");
        }

        info!(job = %job.name, "run completed");
        Outcome::ok()
    }

    /// Validate the job against the filesystem capability. Pure: performs
    /// no writes. The first failing rule determines the message.
    fn validate<'a>(&self, job: Option<&'a CopyJob>) -> Result<&'a CopyJob, String> {
        let job = match job {
            Some(job) => job,
            None => return Err("Configuration is null.".to_string()),
        };

        if job.name.trim().is_empty() {
            return Err("Configuration has no name.".to_string());
        }
        if !self.dir_valid(&job.source_dir) {
            return Err("'SourceDir' is invalid or missing.".to_string());
        }
        if job.dest_dirs.is_empty() {
            return Err("'DestDirs' has no entries.".to_string());
        }
        if job.dest_dirs.iter().any(|dir| !self.dir_valid(dir)) {
            return Err("'DestDirs' has an invalid entry.".to_string());
        }
        // Required even when this run takes no backup.
        if !self.dir_valid(&job.backup_dir) {
            return Err("'BackupDir' is invalid or missing.".to_string());
        }

        Ok(job)
    }

    fn dir_valid(&self, path: &Path) -> bool {
        !path.as_os_str().is_empty() && self.fs.dir_exists(path)
    }

    fn snapshotter(&self) -> Snapshotter {
        let snapshotter = Snapshotter::new(Arc::clone(&self.fs));
        match &self.namer {
            Some(namer) => snapshotter.with_namer(Arc::clone(namer)),
            None => snapshotter,
        }
    }

    /// Run one unit of work with the start/tick/end contract.
    ///
    /// The work runs on a blocking task; this thread polls its completion
    /// and emits a tick per interval while it is outstanding. Returns
    /// whether the work succeeded; `on_end` is not invoked on failure
    /// (including panics inside the work).
    fn run_phase<F>(&self, hooks: &PhaseHooks, work: F) -> bool
    where
        F: FnOnce() -> Result<(), MirrorError> + Send + 'static,
    {
        if let Some(on_start) = &hooks.on_start {
            on_start();
        }

        let handle = self.runtime.spawn_blocking(work);
        while !handle.is_finished() {
            std::thread::sleep(self.tick_interval);
            if let Some(on_tick) = &hooks.on_tick {
                on_tick();
            }
        }

        match self.runtime.block_on(handle) {
            Ok(Ok(())) => {
                if let Some(on_end) = &hooks.on_end {
                    on_end();
                }
                true
            }
            Ok(Err(error)) => {
                warn!(%error, "phase failed");
                false
            }
            Err(join_error) => {
                warn!(%join_error, "phase worker did not finish");
                false
            }
        }
    }
}
