//! Evidence scanner over a project tree

use crate::error::EvidenceError;
use crate::fs::{FileSystem, RealFileSystem};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Read-only view of a project rooted at a fixed path.
///
/// All paths passed to the scanner are relative to the root captured at
/// construction. Nothing is cached: each call touches the file system again.
#[derive(Clone)]
pub struct ProjectScanner {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl ProjectScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, Arc::new(RealFileSystem::new()))
    }

    pub fn with_fs(root: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative_path: &str) -> PathBuf {
        self.root.join(relative_path)
    }

    /// True if anything exists at the path, file or directory
    pub fn file_exists(&self, relative_path: &str) -> bool {
        self.fs.exists(&self.resolve(relative_path))
    }

    pub fn dir_exists(&self, relative_path: &str) -> bool {
        self.fs.is_dir(&self.resolve(relative_path))
    }

    /// True if any of the paths exists
    pub fn any_file_exists(&self, relative_paths: &[&str]) -> bool {
        relative_paths.iter().any(|p| self.file_exists(p))
    }

    pub fn any_dir_exists(&self, relative_paths: &[&str]) -> bool {
        relative_paths.iter().any(|p| self.dir_exists(p))
    }

    /// First existing path in the list
    pub fn first_existing<'a>(&self, relative_paths: &[&'a str]) -> Option<&'a str> {
        relative_paths.iter().copied().find(|p| self.file_exists(p))
    }

    pub fn read_file(&self, relative_path: &str) -> Result<String, EvidenceError> {
        let path = self.resolve(relative_path);
        if !self.fs.exists(&path) {
            return Err(EvidenceError::NotFound { path });
        }

        self.fs
            .read_to_string(&path)
            .map_err(|source| EvidenceError::Read { path, source })
    }

    /// Contents of `relative_path` if it can be read, with failures logged and
    /// swallowed.
    pub fn try_read(&self, relative_path: &str) -> Option<String> {
        if !self.file_exists(relative_path) {
            return None;
        }

        match self.read_file(relative_path) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(path = relative_path, error = %e, "Skipping unreadable file");
                None
            }
        }
    }

    /// Contents of a dependency manifest if it mentions `token`, compared
    /// case-insensitively.
    pub fn manifest_mentioning(&self, relative_path: &str, token: &str) -> Option<String> {
        let content = self.try_read(relative_path)?;
        if content.to_lowercase().contains(&token.to_lowercase()) {
            Some(content)
        } else {
            None
        }
    }
}

impl fmt::Debug for ProjectScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectScanner")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
