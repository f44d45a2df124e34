//! Command-line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Directory mirroring and backup driven by named copy jobs.
#[derive(Debug, Parser)]
#[command(name = "mirrorcp", version, about)]
pub struct Cli {
    /// Path to the JSON job store.
    #[arg(long, global = true, default_value = "copyjobs.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the jobs defined in the store.
    List,

    /// Write a starter job store.
    Init {
        /// Overwrite an existing store file.
        #[arg(long)]
        force: bool,
    },

    /// Run one job by name.
    Run {
        /// Name of the job to run.
        name: String,

        /// Take a backup without asking.
        #[arg(long, conflicts_with = "no_backup")]
        backup: bool,

        /// Skip the backup without asking.
        #[arg(long)]
        no_backup: bool,

        /// Do not prompt for confirmation before running.
        #[arg(short = 'y', long)]
        yes: bool,
    },
}
