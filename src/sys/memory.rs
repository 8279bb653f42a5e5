//! In-memory [`FileSystem`] for tests.
//!
//! `MemoryFs` holds a tree of directories and files and can be told to
//! fail reads under a path, which is how tests simulate permission errors
//! on install roots.
//!
//! # Example
//!
//! ```
//! use ideprobe::sys::{FileSystem, MemoryFs};
//! use std::path::Path;
//!
//! let fs = MemoryFs::new()
//!     .with_file("/home/dev/.IdeaIC2021.1/system/.home", "/opt/idea")
//!     .with_dir("/opt/idea");
//!
//! assert!(fs.is_dir(Path::new("/home/dev/.IdeaIC2021.1/system")));
//! assert_eq!(
//!     fs.read_to_string(Path::new("/home/dev/.IdeaIC2021.1/system/.home")).unwrap(),
//!     "/opt/idea"
//! );
//! ```

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use super::{DirEntry, FileSystem};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// In-memory filesystem tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    nodes: BTreeMap<PathBuf, Node>,
    denied: HashMap<PathBuf, io::ErrorKind>,
}

impl MemoryFs {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and its parents).
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes.insert(path.to_path_buf(), Node::Dir);
        self
    }

    /// Add a file with the given contents (and its parent directories).
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes
            .insert(path.to_path_buf(), Node::File(contents.into()));
        self
    }

    /// Make every read of `path` fail with `PermissionDenied`.
    pub fn with_denied(self, path: impl AsRef<Path>) -> Self {
        self.with_failure(path, io::ErrorKind::PermissionDenied)
    }

    /// Make every read of `path` fail with the given error kind.
    pub fn with_failure(mut self, path: impl AsRef<Path>, kind: io::ErrorKind) -> Self {
        self.denied.insert(path.as_ref().to_path_buf(), kind);
        self
    }

    fn add_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir);
        }
    }

    fn check_access(&self, path: &Path) -> io::Result<()> {
        match self.denied.get(path) {
            Some(kind) => Err(io::Error::new(
                *kind,
                format!("{}: {}", kind_text(*kind), path.display()),
            )),
            None => Ok(()),
        }
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("No such file or directory: {}", path.display()),
        )
    }
}

fn kind_text(kind: io::ErrorKind) -> &'static str {
    match kind {
        io::ErrorKind::PermissionDenied => "Permission denied",
        io::ErrorKind::NotFound => "No such file or directory",
        _ => "I/O error",
    }
}

impl FileSystem for MemoryFs {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        self.check_access(path)?;
        match self.nodes.get(path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Not a directory: {}", path.display()),
                ))
            }
            None => return Err(Self::not_found(path)),
        }

        Ok(self
            .nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(path))
            .map(|(child, node)| DirEntry {
                path: child.clone(),
                is_dir: matches!(node, Node::Dir),
            })
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.check_access(path)?;
        match self.nodes.get(path) {
            Some(Node::File(bytes)) => Ok(bytes.clone()),
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("Is a directory: {}", path.display()),
            )),
            None => Err(Self::not_found(path)),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.get(path), Some(Node::Dir))
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.nodes.get(path), Some(Node::File(_)))
    }
}
