//! [`TestProject`] builder for Pack test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with helpers for writing fixtures.
///
/// # Example
///
/// ```rust,no_run
/// use pack_test_utils::fixtures::HELLO_WORLD;
/// use pack_test_utils::project::TestProject;
///
/// let project = TestProject::new();
/// project.write_pyproject(HELLO_WORLD);
/// project.write_file("LICENSE", "MIT");
/// project.assert_file_exists("pyproject.toml");
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
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_pyproject(&self, content: &str) -> PathBuf {
        self.write_file("pyproject.toml", content)
    }

    /// Write `content` to `path` (relative to the root), creating parents.
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("TestProject::write_file: failed to create {}: {e}", parent.display())
            });
        }
        fs::write(&full_path, content).unwrap_or_else(|e| {
            panic!("TestProject::write_file: failed to write {}: {e}", full_path.display())
        });
        full_path
    }

    /// Write a bundle's `pack.toml` at the standard bundle location.
    ///
    /// Platform and format are lowercased the way bundle paths are.
    pub fn write_path_index(&self, app: &str, platform: &str, format: &str, content: &str) -> PathBuf {
        let path = format!(
            "build/{app}/{}/{}/pack.toml",
            platform.to_lowercase(),
            format.to_lowercase()
        );
        self.write_file(&path, content)
    }

    /// Delete a file (relative to the root).
    ///
    /// # Panics
    /// Panics if the file cannot be removed.
    pub fn remove_file(&self, path: &str) {
        let full_path = self.root().join(path);
        fs::remove_file(&full_path)
            .unwrap_or_else(|e| panic!("Could not remove {}: {e}", full_path.display()));
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
