//! Per-file outcomes and the batch report

use serde::Serialize;
use symfield_fs::NormalizedPath;

use crate::Result;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// No block found. The file was not written.
    Unchanged { backup: NormalizedPath },
    /// Blocks were removed and the file rewritten (or would be, in a dry run).
    Modified {
        backup: NormalizedPath,
        blocks_removed: usize,
        lines_removed: usize,
        /// The last block never closed and was removed to end of file.
        unterminated: bool,
        /// Unified diff of the change, produced for dry runs.
        #[serde(skip_serializing_if = "Option::is_none")]
        diff: Option<String>,
    },
    /// The file could not be processed. Other files were unaffected.
    Error { message: String },
}

impl FileOutcome {
    pub fn is_modified(&self) -> bool {
        matches!(self, Self::Modified { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn backup(&self) -> Option<&NormalizedPath> {
        match self {
            Self::Unchanged { backup } | Self::Modified { backup, .. } => Some(backup),
            Self::Error { .. } => None,
        }
    }
}

/// One line of the batch report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: NormalizedPath,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Ordered results of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub field: String,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(field: impl Into<String>, dry_run: bool) -> Self {
        Self {
            field: field.into(),
            dry_run,
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, path: NormalizedPath, outcome: FileOutcome) {
        self.files.push(FileReport { path, outcome });
    }

    pub fn modified(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_modified()).count()
    }

    pub fn unchanged(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Unchanged { .. }))
            .count()
    }

    pub fn errors(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_error()).count()
    }

    /// True when no file failed.
    pub fn success(&self) -> bool {
        self.errors() == 0
    }

    /// Look up the outcome for a path.
    pub fn outcome_for(&self, path: &NormalizedPath) -> Option<&FileOutcome> {
        self.files
            .iter()
            .find(|f| &f.path == path)
            .map(|f| &f.outcome)
    }

    /// Pretty JSON including summary counts.
    pub fn to_json(&self) -> Result<String> {
        let value = serde_json::json!({
            "field": self.field,
            "dry_run": self.dry_run,
            "success": self.success(),
            "summary": {
                "modified": self.modified(),
                "unchanged": self.unchanged(),
                "errors": self.errors(),
            },
            "files": self.files,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
