//! On-disk filesystem provider

use super::FileSystem;
use crate::types::{FsEntry, MirrorError};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Filesystem provider backed by the real disk.
///
/// Listings use the `ignore` crate's walker with every standard filter
/// disabled: a mirroring run must see hidden files and must not honor
/// `.gitignore`-style files, since exclusion is the ignore pattern's job.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn list_recursive(&self, root: &Path) -> Result<Vec<FsEntry>, MirrorError> {
        if !root.is_dir() {
            return Err(MirrorError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("not a directory: {}", root.display()),
            )));
        }

        let walker = ignore::WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = result.map_err(|e| MirrorError::Io(std::io::Error::other(e)))?;
            if entry.depth() == 0 {
                continue; // the root itself is not part of the copy set
            }

            let file_type = match entry.file_type() {
                Some(ft) => ft,
                None => continue,
            };

            let path = entry.path().to_path_buf();
            if file_type.is_dir() {
                entries.push(FsEntry::Dir(path));
            } else {
                // Symlinks are treated as files; copying dereferences them.
                entries.push(FsEntry::File(path));
            }
        }

        Ok(entries)
    }

    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), MirrorError> {
        fs::create_dir_all(path).map_err(MirrorError::Io)
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64, MirrorError> {
        let mut src_file = File::open(src).map_err(MirrorError::Io)?;
        let mut dest_file = File::create(dest).map_err(MirrorError::Io)?;

        let mut buffer = vec![0u8; 128 * 1024];
        let mut total_bytes = 0u64;

        loop {
            let bytes_read = src_file.read(&mut buffer).map_err(MirrorError::Io)?;
            if bytes_read == 0 {
                break;
            }
            dest_file
                .write_all(&buffer[0..bytes_read])
                .map_err(MirrorError::Io)?;
            total_bytes += bytes_read as u64;
        }

        dest_file.flush().map_err(MirrorError::Io)?;
        drop(dest_file);

        // Carry the source mtime so repeated mirror runs stay comparable.
        let src_metadata = fs::metadata(src).map_err(MirrorError::Io)?;
        let mtime = src_metadata.modified().map_err(MirrorError::Io)?;
        let filetime_mtime = filetime::FileTime::from_system_time(mtime);
        filetime::set_file_mtime(dest, filetime_mtime).map_err(MirrorError::Io)?;

        Ok(total_bytes)
    }
}
