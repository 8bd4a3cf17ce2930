//! FileSystem trait definition

use anyhow::Result;
use std::path::Path;

/// Kind of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Read-only view of the file system used by project scanning.
///
/// Implementations must not cache: every call reflects the tree as it is when
/// the call is made.
pub trait FileSystem: Send + Sync {
    /// Check if a path exists (file or directory)
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as UTF-8
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Kind of the entry at `path`, if any
    fn kind(&self, path: &Path) -> Option<EntryKind> {
        if self.is_dir(path) {
            Some(EntryKind::Directory)
        } else if self.exists(path) {
            Some(EntryKind::File)
        } else {
            None
        }
    }
}
