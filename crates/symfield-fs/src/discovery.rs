//! Candidate file discovery
//!
//! Enumerates the files a batch run should visit: everything in a root
//! directory (optionally the whole tree) whose extension matches.

use std::collections::HashSet;
use std::fs::{self, DirEntry};
use std::io;
use std::path::{Path, PathBuf};

use crate::{Error, NormalizedPath, Result};

/// Which files count as candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Extension without the leading dot, compared case-insensitively.
    pub extension: String,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// File names ending with this suffix are skipped (backup copies).
    pub exclude_suffix: Option<String>,
}

impl CandidateFilter {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_string(),
            recursive: false,
            exclude_suffix: None,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn excluding_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.exclude_suffix = Some(suffix.into());
        self
    }

    /// Whether a file name passes the filter.
    pub fn matches(&self, file_name: &str) -> bool {
        if let Some(suffix) = &self.exclude_suffix
            && !suffix.is_empty()
            && file_name.ends_with(suffix.as_str())
        {
            return false;
        }
        NormalizedPath::new(file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }
}

/// A directory below the root that could not be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableDir {
    pub path: NormalizedPath,
    pub message: String,
}

/// Outcome of a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Candidate files, sorted by path.
    pub files: Vec<NormalizedPath>,
    /// Subdirectories skipped because they could not be read.
    pub unreadable: Vec<UnreadableDir>,
}

/// Find candidate files under `root`.
///
/// Directories are walked iteratively. Each directory is visited once even
/// when symlinks form a cycle. Paths are built from the directory entries
/// themselves, so file names that are not valid UTF-8 are still found.
///
/// # Errors
/// Only a root that is missing, not a directory, or unreadable fails the
/// walk. An unreadable subdirectory is logged and listed in
/// [`Discovery::unreadable`].
pub fn find_candidates(root: &NormalizedPath, filter: &CandidateFilter) -> Result<Discovery> {
    if !root.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_native(),
        });
    }

    let mut discovery = Discovery::default();
    let mut visited = HashSet::new();
    let mut pending = vec![root.clone()];

    while let Some(dir) = pending.pop() {
        let native = dir.to_native();
        let entries = match read_unvisited(&native, &mut visited) {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                tracing::debug!(dir = %dir, "directory already visited, skipping");
                continue;
            }
            Err(e) if &dir == root => return Err(Error::io(&native, e)),
            Err(e) => {
                tracing::warn!(dir = %dir, error = %e, "skipping unreadable directory");
                discovery.unreadable.push(UnreadableDir {
                    path: dir,
                    message: e.to_string(),
                });
                continue;
            }
        };

        for entry in entries {
            let path = NormalizedPath::new(entry.path());
            let name = entry.file_name();

            if path.is_dir() {
                if filter.recursive {
                    pending.push(path);
                }
            } else if path.is_file() && filter.matches(&name.to_string_lossy()) {
                discovery.files.push(path);
            }
        }
    }

    discovery.files.sort();
    tracing::debug!(
        root = %root,
        count = discovery.files.len(),
        unreadable = discovery.unreadable.len(),
        "candidate discovery finished"
    );
    Ok(discovery)
}

/// List `dir` unless its canonical form was already visited.
fn read_unvisited(dir: &Path, visited: &mut HashSet<PathBuf>) -> io::Result<Option<Vec<DirEntry>>> {
    let canonical = dunce::canonicalize(dir)?;
    if !visited.insert(canonical) {
        return Ok(None);
    }
    fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>().map(Some)
}
