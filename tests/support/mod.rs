use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Expected detection and validation outcome, stored as `expected.json` in
/// each backend fixture
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub struct ExpectedOutcome {
    pub backend: Option<String>,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub indicators: Vec<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub is_valid: Option<bool>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/backends")
        .join(name)
}

#[allow(dead_code)]
pub fn load_expected(name: &str) -> ExpectedOutcome {
    let path = fixture_path(name).join("expected.json");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read expected JSON: {}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

/// Scratch project with the given files; directories are created as needed
#[allow(dead_code)]
pub fn scratch_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (relative, content) in files {
        write_file(dir.path(), relative, content);
    }
    dir
}

#[allow(dead_code)]
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    fs::write(&path, content).expect("Failed to write fixture file");
}
