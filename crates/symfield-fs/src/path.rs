//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Library folders are often shared between Windows and Linux machines, so
/// paths are displayed with forward slashes and reports print the same path
/// on every platform. The exact OS path is kept alongside for I/O, so names
/// that are not valid UTF-8 still resolve to the file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Display form, always with forward slashes
    inner: String,
    /// Path as the OS spells it
    native: PathBuf,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let native = path.as_ref().to_path_buf();
        let inner = native.to_string_lossy().replace('\\', "/");
        Self { inner, native }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// The exact path for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        self.native.clone()
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        Self::new(self.native.join(segment))
    }

    /// Append `suffix` to the file name, keeping the existing extension.
    ///
    /// `lib/Device.kicad_sym` with `.bak` becomes `lib/Device.kicad_sym.bak`.
    pub fn with_appended_suffix(&self, suffix: &str) -> Self {
        let mut native = self.native.clone().into_os_string();
        native.push(suffix);
        Self::new(native)
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.native.is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.native.is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        &self.native
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl serde::Serialize for NormalizedPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}
