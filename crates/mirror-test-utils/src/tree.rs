//! [`TestTree`] builder for directory-tree test scenarios.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// A temporary directory tree with helpers for setup and assertion.
///
/// The root is canonicalized on creation, so it compares equal to the
/// resolved root the library reports for it.
///
/// # Example
///
/// ```rust,no_run
/// use mirror_test_utils::tree::TestTree;
///
/// let tree = TestTree::new();
/// tree.write("docs/readme.txt", "v1");
/// tree.age("docs/readme.txt", 3600);
/// tree.assert_file_contains("docs/readme.txt", "v1");
/// ```
pub struct TestTree {
    _temp_dir: TempDir,
    root: PathBuf,
    root_str: String,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary tree.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = dunce::canonicalize(temp_dir.path()).unwrap();
        let root_str = root.to_string_lossy().into_owned();
        Self {
            _temp_dir: temp_dir,
            root,
            root_str,
        }
    }

    /// Root directory of the tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root directory as a string, as accepted by the comparison entry points.
    pub fn root_str(&self) -> &str {
        &self.root_str
    }

    /// Native path of `relative` below the root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write a file, creating missing parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Create a directory and its parents.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        let path = self.path(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Move the modification time of a file `secs` seconds into the past.
    pub fn age(&self, relative: &str, secs: u64) {
        self.set_modified(relative, SystemTime::now() - Duration::from_secs(secs));
    }

    /// Set the modification time of a file.
    pub fn set_modified(&self, relative: &str, time: SystemTime) {
        let path = self.path(relative);
        OpenOptions::new()
            .write(true)
            .open(&path)
            .and_then(|file| file.set_modified(time))
            .unwrap_or_else(|e| panic!("Could not set mtime of {}: {}", path.display(), e));
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `relative` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            self.path(relative).display(),
            content,
            file_content
        );
    }
}
