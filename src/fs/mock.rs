use super::{EntryKind, FileSystem};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
enum MockEntry {
    File(String),
    /// A file that exists but cannot be decoded
    Unreadable,
    Directory,
}

/// In-memory file system for tests.
///
/// Relative paths are resolved against `root`; parent directories are created
/// implicitly when a file is added.
pub struct MockFileSystem {
    entries: RwLock<HashMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            entries: RwLock::new(HashMap::new()),
            root,
        };
        let root = fs.root.clone();
        fs.insert(&root, MockEntry::Directory);
        fs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        self.insert(&path, MockEntry::File(content.to_string()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.insert(&path, MockEntry::Directory);
    }

    /// Add a file whose contents fail to read, e.g. invalid UTF-8.
    pub fn add_unreadable(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.insert(&path, MockEntry::Unreadable);
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|p, _| !p.starts_with(&path));
        }
    }

    fn insert(&self, path: &Path, entry: MockEntry) {
        let Ok(mut entries) = self.entries.write() else {
            return;
        };

        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                entries
                    .entry(current.clone())
                    .or_insert(MockEntry::Directory);
            }
        }

        entries.insert(path.to_path_buf(), entry);
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn get(&self, path: &Path) -> Option<MockEntry> {
        let path = self.normalize_path(path);
        self.entries.read().ok()?.get(&path).cloned()
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.get(path), Some(MockEntry::Directory))
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(
            self.get(path),
            Some(MockEntry::File(_)) | Some(MockEntry::Unreadable)
        )
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        match self.get(path) {
            Some(MockEntry::File(content)) => Ok(content),
            Some(MockEntry::Unreadable) => {
                Err(anyhow!("stream did not contain valid UTF-8: {:?}", path))
            }
            Some(MockEntry::Directory) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn kind(&self, path: &Path) -> Option<EntryKind> {
        match self.get(path)? {
            MockEntry::Directory => Some(EntryKind::Directory),
            MockEntry::File(_) | MockEntry::Unreadable => Some(EntryKind::File),
        }
    }
}
