//! [`TestLibrary`]: a temporary folder of symbol library files.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory with helpers for writing library files and
/// asserting on them afterwards.
///
/// # Example
///
/// ```rust,no_run
/// use symfield_test_utils::TestLibrary;
/// use symfield_test_utils::fixtures::RESISTOR_WITH_FITPART;
///
/// let lib = TestLibrary::new();
/// lib.write("Device.kicad_sym", RESISTOR_WITH_FITPART);
/// lib.assert_file_exists("Device.kicad_sym");
/// ```
pub struct TestLibrary {
    temp_dir: TempDir,
}

impl Default for TestLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLibrary {
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

    /// Absolute path of `rel`.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let full_path = self.path(rel);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Read `rel` as UTF-8 text.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel))
            .unwrap_or_else(|e| panic!("TestLibrary::read: {rel}: {e}"))
    }

    /// Read `rel` as raw bytes.
    pub fn read_bytes(&self, rel: &str) -> Vec<u8> {
        fs::read(self.path(rel)).unwrap_or_else(|e| panic!("TestLibrary::read_bytes: {rel}: {e}"))
    }

    /// Assert that `rel` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` does not exist.
    pub fn assert_file_missing(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            !full_path.exists(),
            "Expected file to be absent: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` holds exactly `expected` bytes.
    pub fn assert_bytes(&self, rel: &str, expected: impl AsRef<[u8]>) {
        let actual = self.read_bytes(rel);
        assert!(
            actual == expected.as_ref(),
            "File {} differs.\nExpected: {:?}\nActual: {:?}",
            rel,
            String::from_utf8_lossy(expected.as_ref()),
            String::from_utf8_lossy(&actual)
        );
    }

    /// Names of all files under the root, relative and sorted.
    pub fn list_files(&self) -> Vec<String> {
        let mut found = Vec::new();
        let mut pending = vec![self.root().to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    pending.push(path);
                } else {
                    let rel = path.strip_prefix(self.root()).unwrap();
                    found.push(rel.to_string_lossy().replace('\\', "/"));
                }
            }
        }
        found.sort();
        found
    }
}
