//! `std::fs` backed [`FileSystem`].

use std::fs;
use std::io;
use std::path::Path;

use super::{DirEntry, FileSystem};

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a handle to the real filesystem.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let path = entry.path();
            // Follow symlinks so a linked app bundle still counts as a directory.
            let is_dir = path.is_dir();
            entries.push(DirEntry { path, is_dir });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
