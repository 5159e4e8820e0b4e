//! [`TestProject`] builder for scriptsync test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with helper methods for test setup and
/// assertion.
///
/// # Example
///
/// ```rust,no_run
/// use scriptsync_test_utils::TestProject;
///
/// let project = TestProject::with_script_id("abc123")
///     .file("appsscript.json", "{}")
///     .file("Code.js", "function main() {}");
/// project.assert_file_exists(".clasp.json");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory with no config.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a project whose `.clasp.json` names `script_id`.
    pub fn with_script_id(script_id: &str) -> Self {
        let project = Self::new();
        project.write_config(&format!("{{\"scriptId\": \"{}\"}}", script_id));
        project
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Path of the project's `.clasp.json`.
    pub fn config_path(&self) -> PathBuf {
        self.path(".clasp.json")
    }

    /// Overwrite `.clasp.json` with raw JSON.
    pub fn write_config(&self, json: &str) {
        self.write_file(".clasp.json", json);
    }

    /// Overwrite `.claspignore`.
    pub fn write_ignore(&self, content: &str) {
        self.write_file(".claspignore", content);
    }

    /// Write a file, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    /// Builder form of [`write_file`](Self::write_file).
    pub fn file(self, relative: &str, content: &str) -> Self {
        self.write_file(relative, content);
        self
    }

    /// Read a file inside the project.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read_file(&self, relative: &str) -> String {
        let full_path = self.path(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read_file(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
