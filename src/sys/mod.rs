//! Read-only system access used by discovery.
//!
//! Everything the probe learns about the machine goes through the
//! [`FileSystem`] trait, so discovery can run against the real disk
//! ([`LocalFs`]) or an in-memory tree ([`MemoryFs`]) in tests.
//!
//! # Modules
//!
//! - [`local`] - `std::fs` backed implementation
//! - [`memory`] - in-memory implementation with failure injection
//! - [`plist`] - property-list value extraction

pub mod local;
pub mod memory;
pub mod plist;

pub use local::LocalFs;
pub use memory::MemoryFs;

use std::io;
use std::path::{Path, PathBuf};

/// A single entry returned by [`FileSystem::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Whether the entry is a directory (symlinks are followed).
    pub is_dir: bool,
}

impl DirEntry {
    /// The final path component as a string, lossily converted.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Filesystem operations needed by discovery and plugin validation.
///
/// All operations are read-only. Implementations must be shareable across
/// threads because validators run concurrently.
pub trait FileSystem: Send + Sync {
    /// List the direct children of a directory.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Read a whole file as bytes.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Whether `path` exists as either a file or a directory.
    fn exists(&self, path: &Path) -> bool {
        self.is_dir(path) || self.is_file(path)
    }
}
