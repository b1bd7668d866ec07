//! Common test utilities for nodefetch integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A scratch directory the binary runs in, with its own data directory
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Data directory handed to the binary through `NODEFETCH_DATA_DIR`
    pub fn data_dir(&self) -> PathBuf {
        self.path.join("data")
    }

    /// The real binary, running inside this workspace with a clean environment
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("nodefetch").expect("binary should build");
        cmd.current_dir(&self.path)
            .env("NODEFETCH_DATA_DIR", self.data_dir())
            .env_remove("NODEFETCH_CONFIG")
            .env_remove("NODEFETCH_LOG");
        cmd
    }

    /// Write a file in workspace
    #[allow(dead_code)]
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Copy a fixture (relative to `tests/common/fixtures`) into the workspace root
    #[allow(dead_code)]
    pub fn copy_fixture(&self, fixture: &str) -> String {
        let source = fixture_path(fixture);
        let name = source
            .file_name()
            .expect("fixture has a file name")
            .to_string_lossy()
            .to_string();
        std::fs::copy(&source, self.path.join(&name)).expect("Failed to copy fixture");
        name
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute path of a fixture file
pub fn fixture_path(fixture: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("common")
        .join("fixtures")
        .join(fixture)
}

/// A resource list entry with a fixed id, shaped like `nodefetch resolve` output
#[allow(dead_code)]
pub fn resource_json(index: u32, raw_name: &str, resource_type: &str, url: &str) -> String {
    let is_node = resource_type == "CustomNode";
    format!(
        r#"{{"id": "00000000-0000-4000-8000-{index:012}", "rawName": "{raw_name}", "isNode": {is_node}, "name": "{raw_name}", "type": "{resource_type}", "description": "", "targetPath": "", "downloadUrl": "{url}", "confidence": 0.9, "fileSize": "N/A"}}"#
    )
}

/// A JSON array of entries
#[allow(dead_code)]
pub fn resource_list(entries: &[String]) -> String {
    format!("[{}]", entries.join(",\n"))
}
