//! FsEntry - tagged filesystem entry as seen by a recursive listing

use std::path::{Path, PathBuf};

/// A single node of a recursive directory listing.
///
/// Entries carry the full path; relative paths are derived against the
/// listing root when matching ignore patterns or building destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsEntry {
    /// A directory node
    Dir(PathBuf),
    /// A file node
    File(PathBuf),
}

impl FsEntry {
    /// Full path of this entry.
    pub fn path(&self) -> &Path {
        match self {
            FsEntry::Dir(path) | FsEntry::File(path) => path,
        }
    }

    /// True for directory entries.
    pub fn is_dir(&self) -> bool {
        matches!(self, FsEntry::Dir(_))
    }

    /// Path relative to `root`, with no leading or trailing separator.
    ///
    /// Falls back to the full path if the entry does not live under `root`;
    /// listings produced by a `FileSystem` provider always do.
    pub fn relative_to(&self, root: &Path) -> PathBuf {
        self.path()
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.path().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_kind() {
        let dir = FsEntry::Dir(PathBuf::from("/data/src/folder"));
        let file = FsEntry::File(PathBuf::from("/data/src/folder/file.txt"));

        assert!(dir.is_dir());
        assert!(!file.is_dir());
        assert_eq!(dir.path(), Path::new("/data/src/folder"));
        assert_eq!(file.path(), Path::new("/data/src/folder/file.txt"));
    }

    #[test]
    fn test_relative_to_strips_root() {
        let file = FsEntry::File(PathBuf::from("/data/src/folder/file.txt"));
        assert_eq!(
            file.relative_to(Path::new("/data/src")),
            PathBuf::from("folder/file.txt")
        );
    }

    #[test]
    fn test_relative_to_outside_root_returns_full_path() {
        let file = FsEntry::File(PathBuf::from("/elsewhere/file.txt"));
        assert_eq!(
            file.relative_to(Path::new("/data/src")),
            PathBuf::from("/elsewhere/file.txt")
        );
    }
}
