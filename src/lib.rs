//! # mirrorcp - Directory Mirroring and Backup
//!
//! Replicates a source directory tree into one or more destinations,
//! optionally snapshotting each destination into a timestamped backup
//! folder first. Runs are driven by named jobs with a regular-expression
//! ignore pattern matched against source-relative paths.

// Module declarations
pub mod backup;
pub mod commands;
pub mod config;
pub mod executor;
pub mod filter;
pub mod fsys;
pub mod replicate;
pub mod types;
pub mod ui;

// Re-export commonly used types
pub use config::CopyJob;
pub use executor::{Executor, Outcome, PhaseHooks, RunHooks};
pub use fsys::{FileSystem, MemFileSystem, RealFileSystem};
pub use types::{FsEntry, MirrorError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
