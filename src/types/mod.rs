//! Core type definitions for mirrorcp

mod entry;
mod error;

pub use entry::FsEntry;
pub use error::MirrorError;
