//! In-memory filesystem provider for hermetic tests
//!
//! Mirrors the shape of a real tree closely enough for the filter,
//! replicator, and coordinator to run against it: case-insensitive node
//! identity, parent directories required before file writes, and a poison
//! switch to force copy failures on selected source files.

use super::{path_key, FileSystem};
use crate::types::{FsEntry, MirrorError};
use std::collections::{BTreeMap, HashSet};
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
struct MemNode {
    path: PathBuf,
    /// `None` for directories, file contents otherwise.
    data: Option<Vec<u8>>,
}

/// Thread-safe in-memory filesystem.
#[derive(Debug, Default)]
pub struct MemFileSystem {
    nodes: Mutex<BTreeMap<String, MemNode>>,
    poisoned: Mutex<HashSet<String>>,
    copy_latency: Option<Duration>,
}

impl MemFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every `copy_file` call, to give tick-based
    /// progress tests an observable unit-of-work duration.
    pub fn with_copy_latency(mut self, latency: Duration) -> Self {
        self.copy_latency = Some(latency);
        self
    }

    /// Seed a directory, creating missing ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut nodes = self.nodes.lock().expect("mem fs lock");
        Self::insert_dir_chain(&mut nodes, path.as_ref());
    }

    /// Seed a file with contents, creating missing ancestor directories.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let mut nodes = self.nodes.lock().expect("mem fs lock");
        if let Some(parent) = path.parent() {
            Self::insert_dir_chain(&mut nodes, parent);
        }
        nodes.insert(
            path_key(path),
            MemNode {
                path: path.to_path_buf(),
                data: Some(contents.as_ref().to_vec()),
            },
        );
    }

    /// Make every future `copy_file` with this source path fail.
    pub fn poison(&self, path: impl AsRef<Path>) {
        self.poisoned
            .lock()
            .expect("mem fs poison lock")
            .insert(path_key(path.as_ref()));
    }

    /// True if a file node exists at `path`.
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.nodes
            .lock()
            .expect("mem fs lock")
            .get(&path_key(path.as_ref()))
            .is_some_and(|node| node.data.is_some())
    }

    /// Contents of the file at `path`, if present.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.nodes
            .lock()
            .expect("mem fs lock")
            .get(&path_key(path.as_ref()))
            .and_then(|node| node.data.clone())
    }

    /// Sorted identity keys of every node, for whole-tree assertions.
    pub fn snapshot_keys(&self) -> Vec<String> {
        self.nodes
            .lock()
            .expect("mem fs lock")
            .keys()
            .cloned()
            .collect()
    }

    fn insert_dir_chain(nodes: &mut BTreeMap<String, MemNode>, path: &Path) {
        let mut current = Some(path);
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            let key = path_key(dir);
            if key == "/" {
                break;
            }
            nodes.entry(key).or_insert_with(|| MemNode {
                path: dir.to_path_buf(),
                data: None,
            });
            current = dir.parent();
        }
    }
}

impl FileSystem for MemFileSystem {
    fn list_recursive(&self, root: &Path) -> Result<Vec<FsEntry>, MirrorError> {
        if !self.dir_exists(root) {
            return Err(MirrorError::Io(IoError::new(
                ErrorKind::NotFound,
                format!("not a directory: {}", root.display()),
            )));
        }

        let prefix = format!("{}/", path_key(root));
        let nodes = self.nodes.lock().expect("mem fs lock");
        let entries = nodes
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, node)| match &node.data {
                Some(_) => FsEntry::File(node.path.clone()),
                None => FsEntry::Dir(node.path.clone()),
            })
            .collect();

        Ok(entries)
    }

    fn dir_exists(&self, path: &Path) -> bool {
        self.nodes
            .lock()
            .expect("mem fs lock")
            .get(&path_key(path))
            .is_some_and(|node| node.data.is_none())
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), MirrorError> {
        let mut nodes = self.nodes.lock().expect("mem fs lock");
        if nodes
            .get(&path_key(path))
            .is_some_and(|node| node.data.is_some())
        {
            return Err(MirrorError::Io(IoError::new(
                ErrorKind::AlreadyExists,
                format!("a file exists at {}", path.display()),
            )));
        }
        Self::insert_dir_chain(&mut nodes, path);
        Ok(())
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64, MirrorError> {
        if let Some(latency) = self.copy_latency {
            std::thread::sleep(latency);
        }

        if self
            .poisoned
            .lock()
            .expect("mem fs poison lock")
            .contains(&path_key(src))
        {
            return Err(MirrorError::Io(IoError::other(format!(
                "poisoned source: {}",
                src.display()
            ))));
        }

        let mut nodes = self.nodes.lock().expect("mem fs lock");
        let data = nodes
            .get(&path_key(src))
            .and_then(|node| node.data.clone())
            .ok_or_else(|| {
                MirrorError::Io(IoError::new(
                    ErrorKind::NotFound,
                    format!("no such file: {}", src.display()),
                ))
            })?;

        let parent_exists = dest
            .parent()
            .map(|parent| {
                nodes
                    .get(&path_key(parent))
                    .is_some_and(|node| node.data.is_none())
            })
            .unwrap_or(false);
        if !parent_exists {
            return Err(MirrorError::Io(IoError::new(
                ErrorKind::NotFound,
                format!("missing parent directory for {}", dest.display()),
            )));
        }

        let len = data.len() as u64;
        nodes.insert(
            path_key(dest),
            MemNode {
                path: dest.to_path_buf(),
                data: Some(data),
            },
        );
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeding_creates_ancestor_dirs() {
        let fsys = MemFileSystem::new();
        fsys.add_file("/data/src/folder/file.txt", b"content");

        assert!(fsys.dir_exists(Path::new("/data/src/folder")));
        assert!(fsys.dir_exists(Path::new("/data/src")));
        assert!(fsys.file_exists("/data/src/folder/file.txt"));
    }

    #[test]
    fn test_list_recursive_excludes_root_and_siblings() {
        let fsys = MemFileSystem::new();
        fsys.add_file("/data/src/a.txt", b"a");
        fsys.add_dir("/data/src/sub");
        fsys.add_file("/data/other/b.txt", b"b");

        let entries = fsys.list_recursive(Path::new("/data/src")).expect("list");
        let paths: Vec<&Path> = entries.iter().map(|e| e.path()).collect();

        assert_eq!(entries.len(), 2);
        assert!(paths.contains(&Path::new("/data/src/a.txt")));
        assert!(paths.contains(&Path::new("/data/src/sub")));
    }

    #[test]
    fn test_copy_file_overwrites_existing() {
        let fsys = MemFileSystem::new();
        fsys.add_file("/src/file.txt", b"new");
        fsys.add_file("/dest/file.txt", b"old");

        let bytes = fsys
            .copy_file(Path::new("/src/file.txt"), Path::new("/dest/file.txt"))
            .expect("copy");

        assert_eq!(bytes, 3);
        assert_eq!(fsys.read_file("/dest/file.txt"), Some(b"new".to_vec()));
    }

    #[test]
    fn test_copy_file_requires_parent_dir() {
        let fsys = MemFileSystem::new();
        fsys.add_file("/src/file.txt", b"data");

        let result = fsys.copy_file(Path::new("/src/file.txt"), Path::new("/dest/file.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_poisoned_source_fails_copy() {
        let fsys = MemFileSystem::new();
        fsys.add_file("/src/file.txt", b"data");
        fsys.add_dir("/dest");
        fsys.poison("/src/file.txt");

        let result = fsys.copy_file(Path::new("/src/file.txt"), Path::new("/dest/file.txt"));
        assert!(result.is_err());
        assert!(!fsys.file_exists("/dest/file.txt"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let fsys = MemFileSystem::new();
        fsys.add_file("/Data/Src/File.TXT", b"x");

        assert!(fsys.file_exists("/data/src/file.txt"));
        assert!(fsys.dir_exists(Path::new("/DATA/SRC")));
    }
}
